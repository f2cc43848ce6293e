//! The decorated error type.
//!
//! [`DecoratedError`] wraps an optional cause with an optional message and
//! adds everything a command-line program needs to report it: an exit code,
//! whether retrying might help, and extra display lines around an annotated
//! rendering of the offending command line.
//!
//! # Display layout
//!
//! ```text
//! Optional lines before the error message.      <- before message
//! This is the error message.                    <- message line
//! Some lines between message and options.       <- between message and options
//! zero one --two three                          <- options
//!                ^~~~~ cannot find this file    <- option comments
//!          ^~~~~ for this option
//! Zero or more additional lines.                <- after options
//! ```

use std::{error::Error, fmt};

use log::warn;

use decor_core::options::{self, Annotation};

use crate::resolve;

/// A boxed error that can be wrapped by a [`DecoratedError`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Message line used when there is neither a message nor a wrapped error.
pub const PLACEHOLDER_MESSAGE: &str = "error without message or wrapped error";

/// An error decorated with an exit code, a temporary flag, and display lines.
///
/// Exit code and temporariness are explicit overrides: when unset, they are
/// resolved from the wrapped error (see [`crate::exit_code`] and
/// [`crate::is_temporary`]).
///
/// # Example
///
/// ```
/// # use decor::DecoratedError;
/// let err = DecoratedError::new("cannot do thing")
///     .with_line_after_options("line 2")
///     .with_lines_after_options(["line 3", "line 4"])
///     .with_line_between_message_and_options("line 1")
///     .with_line_before_message("line 0");
///
/// assert_eq!(
///     err.to_string(),
///     "line 0\ncannot do thing\nline 1\nline 2\nline 3\nline 4"
/// );
/// ```
#[derive(Debug, Default)]
pub struct DecoratedError {
    wrapped: Option<BoxError>,
    message: Option<String>,
    exit_code: Option<i32>,
    temporary: Option<bool>,
    before_message: Vec<String>,
    between_message_and_options: Vec<String>,
    options: Vec<String>,
    annotations: Vec<Annotation>,
    after_options: Vec<String>,
}

impl DecoratedError {
    /// Create an error with a message and no wrapped error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Create an error that wraps `err` without a message of its own.
    pub fn wrap(err: impl Into<BoxError>) -> Self {
        Self {
            wrapped: Some(err.into()),
            ..Self::default()
        }
    }

    /// Create an error that wraps `err` and prefixes it with `message`.
    pub fn wrap_with_message(err: impl Into<BoxError>, message: impl Into<String>) -> Self {
        Self::wrap(err).with_message(message)
    }

    /// Wrap `err` if there is one.
    ///
    /// Use [`crate::Decorate`] to keep calling setters on the result; they do
    /// nothing when there was no error to wrap.
    pub fn maybe_wrap<E: Into<BoxError>>(err: Option<E>) -> Option<Self> {
        err.map(Self::wrap)
    }

    /// Get the message, if one was set.
    ///
    /// An empty message is treated as no message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }

    /// Get the wrapped error, if any.
    pub fn wrapped(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.wrapped.as_deref()
    }

    /// Get the exit code set on this error, ignoring the wrapped error.
    pub fn explicit_exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Get the temporary flag set on this error, ignoring the wrapped error.
    pub fn explicit_temporary(&self) -> Option<bool> {
        self.temporary
    }

    /// Resolve the exit code, starting at this error.
    pub fn exit_code(&self) -> i32 {
        resolve::exit_code(Some(self))
    }

    /// Resolve whether this error is temporary, starting at this error.
    pub fn is_temporary(&self) -> bool {
        resolve::is_temporary(Some(self))
    }

    /// Get the lines printed before the message line.
    pub fn before_message(&self) -> &[String] {
        &self.before_message
    }

    /// Get the lines printed between the message line and the options.
    pub fn between_message_and_options(&self) -> &[String] {
        &self.between_message_and_options
    }

    /// Get the option tokens.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Get the option comments, in the order they were added.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Get the lines printed after the options.
    pub fn after_options(&self) -> &[String] {
        &self.after_options
    }

    /// Set the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the wrapped error.
    ///
    /// The wrapped error can only be set once. If this error already wraps
    /// another, the existing one is kept and `err` is dropped.
    pub fn with_wrap(mut self, err: impl Into<BoxError>) -> Self {
        let err = err.into();
        match &self.wrapped {
            Some(existing) => {
                warn!(
                    existing:% = existing,
                    ignored:% = err;
                    "Error already wraps a cause, ignoring new cause"
                );
            }
            None => self.wrapped = Some(err),
        }
        self
    }

    /// Set the exit code, overriding any wrapped error's exit code.
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Set the temporary flag, overriding any wrapped error's flag.
    pub fn with_temporary(mut self, temporary: bool) -> Self {
        self.temporary = Some(temporary);
        self
    }

    /// Add a line before the message line.
    pub fn with_line_before_message(mut self, line: impl Into<String>) -> Self {
        self.before_message.push(line.into());
        self
    }

    /// Add lines before the message line.
    pub fn with_lines_before_message(
        mut self,
        lines: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.before_message.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Add a line between the message line and the options.
    pub fn with_line_between_message_and_options(mut self, line: impl Into<String>) -> Self {
        self.between_message_and_options.push(line.into());
        self
    }

    /// Add lines between the message line and the options.
    pub fn with_lines_between_message_and_options(
        mut self,
        lines: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.between_message_and_options
            .extend(lines.into_iter().map(Into::into));
        self
    }

    /// Set the option tokens, replacing any previously set.
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Underline the option at `index` with `comment`.
    ///
    /// An index that does not name an option points past the end of the
    /// option line.
    pub fn with_option_comment(mut self, index: isize, comment: impl Into<String>) -> Self {
        self.annotations.push(Annotation::new(index, comment));
        self
    }

    /// Add a line after the options.
    pub fn with_line_after_options(mut self, line: impl Into<String>) -> Self {
        self.after_options.push(line.into());
        self
    }

    /// Add lines after the options.
    pub fn with_lines_after_options(
        mut self,
        lines: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.after_options.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Build the display lines, in order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.before_message.clone();
        lines.push(self.message_line());
        lines.extend(self.between_message_and_options.iter().cloned());
        lines.extend(options::render(&self.options, &self.annotations));
        lines.extend(self.after_options.iter().cloned());
        lines
    }

    fn message_line(&self) -> String {
        match (self.message(), self.wrapped()) {
            (Some(message), Some(wrapped)) => format!("{message}: {wrapped}"),
            (Some(message), None) => message.to_string(),
            (None, Some(wrapped)) => wrapped.to_string(),
            (None, None) => PLACEHOLDER_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for DecoratedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

impl Error for DecoratedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.wrapped
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

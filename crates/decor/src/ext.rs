//! Extension traits for decorating errors in flight.
//!
//! [`ResultExt`] turns any `Result` into one carrying a [`DecoratedError`].
//! [`Decorate`] forwards the builder methods of [`DecoratedError`] through
//! `Option` and `Result`, doing nothing when there is no error. Together they
//! let a function decorate whatever error it might return without branching:
//!
//! ```
//! # use decor::{Decorate, DecoratedError, ResultExt};
//! fn parse_integer_option(s: &str) -> Result<i32, DecoratedError> {
//!     s.parse::<i32>()
//!         .decorate_with("cannot parse option")
//!         .with_exit_code(2)
//! }
//!
//! let ok = parse_integer_option("123");
//! assert_eq!(ok.as_ref().ok(), Some(&123));
//! assert_eq!(ok.exit_code(), 0);
//!
//! let err = parse_integer_option("123abc");
//! assert_eq!(err.exit_code(), 2);
//! assert_eq!(
//!     err.unwrap_err().to_string(),
//!     "cannot parse option: invalid digit found in string"
//! );
//! ```

use crate::{BoxError, DecoratedError};

/// Wrap the error of a `Result` in a [`DecoratedError`].
pub trait ResultExt<T> {
    /// Wrap the error without adding a message.
    fn decorate(self) -> Result<T, DecoratedError>;

    /// Wrap the error and prefix it with `message`.
    fn decorate_with(self, message: impl Into<String>) -> Result<T, DecoratedError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn decorate(self) -> Result<T, DecoratedError> {
        self.map_err(DecoratedError::wrap)
    }

    fn decorate_with(self, message: impl Into<String>) -> Result<T, DecoratedError> {
        self.map_err(|err| DecoratedError::wrap_with_message(err, message))
    }
}

/// Builder methods of [`DecoratedError`] for values that may not hold one.
///
/// Every setter is a no-op when there is no error, and the resolved
/// attributes of a missing error are `0` and `false`.
pub trait Decorate: Sized {
    /// Apply `f` to the contained error, if any.
    fn map_decorated<F>(self, f: F) -> Self
    where
        F: FnOnce(DecoratedError) -> DecoratedError;

    /// Get the contained error, if any.
    fn decorated(&self) -> Option<&DecoratedError>;

    /// Resolve the exit code of the contained error, or `0` without one.
    fn exit_code(&self) -> i32 {
        self.decorated().map_or(0, DecoratedError::exit_code)
    }

    /// Resolve whether the contained error is temporary, or `false` without one.
    fn is_temporary(&self) -> bool {
        self.decorated().is_some_and(DecoratedError::is_temporary)
    }

    /// See [`DecoratedError::with_message`].
    fn with_message(self, message: impl Into<String>) -> Self {
        self.map_decorated(|err| err.with_message(message))
    }

    /// See [`DecoratedError::with_wrap`].
    fn with_wrap(self, err: impl Into<BoxError>) -> Self {
        self.map_decorated(|decorated| decorated.with_wrap(err))
    }

    /// See [`DecoratedError::with_exit_code`].
    fn with_exit_code(self, code: i32) -> Self {
        self.map_decorated(|err| err.with_exit_code(code))
    }

    /// See [`DecoratedError::with_temporary`].
    fn with_temporary(self, temporary: bool) -> Self {
        self.map_decorated(|err| err.with_temporary(temporary))
    }

    /// See [`DecoratedError::with_line_before_message`].
    fn with_line_before_message(self, line: impl Into<String>) -> Self {
        self.map_decorated(|err| err.with_line_before_message(line))
    }

    /// See [`DecoratedError::with_lines_before_message`].
    fn with_lines_before_message(self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.map_decorated(|err| err.with_lines_before_message(lines))
    }

    /// See [`DecoratedError::with_line_between_message_and_options`].
    fn with_line_between_message_and_options(self, line: impl Into<String>) -> Self {
        self.map_decorated(|err| err.with_line_between_message_and_options(line))
    }

    /// See [`DecoratedError::with_lines_between_message_and_options`].
    fn with_lines_between_message_and_options(
        self,
        lines: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.map_decorated(|err| err.with_lines_between_message_and_options(lines))
    }

    /// See [`DecoratedError::with_options`].
    fn with_options(self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.map_decorated(|err| err.with_options(options))
    }

    /// See [`DecoratedError::with_option_comment`].
    fn with_option_comment(self, index: isize, comment: impl Into<String>) -> Self {
        self.map_decorated(|err| err.with_option_comment(index, comment))
    }

    /// See [`DecoratedError::with_line_after_options`].
    fn with_line_after_options(self, line: impl Into<String>) -> Self {
        self.map_decorated(|err| err.with_line_after_options(line))
    }

    /// See [`DecoratedError::with_lines_after_options`].
    fn with_lines_after_options(self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.map_decorated(|err| err.with_lines_after_options(lines))
    }
}

impl Decorate for Option<DecoratedError> {
    fn map_decorated<F>(self, f: F) -> Self
    where
        F: FnOnce(DecoratedError) -> DecoratedError,
    {
        self.map(f)
    }

    fn decorated(&self) -> Option<&DecoratedError> {
        self.as_ref()
    }
}

impl<T> Decorate for Result<T, DecoratedError> {
    fn map_decorated<F>(self, f: F) -> Self
    where
        F: FnOnce(DecoratedError) -> DecoratedError,
    {
        self.map_err(f)
    }

    fn decorated(&self) -> Option<&DecoratedError> {
        self.as_ref().err()
    }
}

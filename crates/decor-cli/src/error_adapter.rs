//! Error adapter for rendering decorated errors as miette diagnostics.
//!
//! The plain rendering of a [`DecoratedError`] draws carets under the option
//! tokens itself. The fancy rendering hands the same information to miette
//! instead: the joined option line becomes the source code, each annotation
//! becomes a label, and the lines after the options become the help text.

use std::{error::Error, fmt};

use miette::{Diagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan};

use decor::{DecoratedError, PLACEHOLDER_MESSAGE};
use decor_core::options::OptionLine;

/// Adapter presenting a [`DecoratedError`] as a miette [`Diagnostic`].
pub struct DecoratedAdapter<'a> {
    /// The adapted error
    err: &'a DecoratedError,
    /// Joined option tokens, if the error has any
    src: Option<String>,
    /// One label per annotation, in insertion order
    labels: Vec<LabeledSpan>,
}

impl<'a> DecoratedAdapter<'a> {
    /// Create a new adapter.
    ///
    /// The first annotation is the primary label. Annotations that do not
    /// name a token point at the end of the option line.
    pub fn new(err: &'a DecoratedError) -> Self {
        let Some(line) = OptionLine::new(err.options()) else {
            return Self {
                err,
                src: None,
                labels: Vec::new(),
            };
        };

        let labels = err
            .annotations()
            .iter()
            .enumerate()
            .map(|(i, annotation)| {
                let span = match line.span(annotation.index()) {
                    Some(token) => SourceSpan::new(token.offset().into(), token.len()),
                    None => SourceSpan::new(line.text().len().into(), 0),
                };
                let message = Some(annotation.comment().to_string());
                if i == 0 {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            err,
            src: Some(line.text().to_string()),
            labels,
        }
    }

    /// The headline shown for the error.
    ///
    /// A wrapped error is left to the cause chain when there is a message.
    fn headline(&self) -> String {
        match (self.err.message(), self.err.wrapped()) {
            (Some(message), _) => message.to_string(),
            (None, Some(wrapped)) => wrapped.to_string(),
            (None, None) => PLACEHOLDER_MESSAGE.to_string(),
        }
    }
}

impl fmt::Debug for DecoratedAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratedAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DecoratedAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.err.before_message() {
            writeln!(f, "{line}")?;
        }
        f.write_str(&self.headline())?;
        for line in self.err.between_message_and_options() {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

impl Error for DecoratedAdapter<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.err.message() {
            Some(_) => self.err.source(),
            None => self.err.source().and_then(|wrapped| wrapped.source()),
        }
    }
}

impl Diagnostic for DecoratedAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.err.exit_code() {
            0 => None,
            code => Some(Box::new(format!("exit::{code}"))),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let after = self.err.after_options();
        if after.is_empty() {
            return None;
        }
        Some(Box::new(after.join("\n")))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

/// Render `err` as a graphical miette report.
///
/// Falls back to the plain rendering if the report cannot be written.
pub fn render_fancy(err: &DecoratedError) -> String {
    let reporter = GraphicalReportHandler::new();
    let mut writer = String::new();
    match reporter.render_report(&mut writer, &DecoratedAdapter::new(err)) {
        Ok(()) => writer,
        Err(_) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn parse_error() -> DecoratedError {
        DecoratedError::wrap_with_message(io::Error::other("bad digit"), "cannot parse port")
            .with_options(["serve", "--port", "80a"])
            .with_option_comment(2, "expected a number")
            .with_option_comment(5, "and a host")
            .with_exit_code(64)
    }

    #[test]
    fn test_labels_follow_annotations() {
        let err = parse_error();
        let adapter = DecoratedAdapter::new(&err);

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);

        assert_eq!(labels[0].label(), Some("expected a number"));
        assert_eq!(labels[0].offset(), 13);
        assert_eq!(labels[0].len(), 3);
        assert!(labels[0].primary());

        // Out of range points at the end of the line.
        assert_eq!(labels[1].label(), Some("and a host"));
        assert_eq!(labels[1].offset(), 16);
        assert_eq!(labels[1].len(), 0);
        assert!(!labels[1].primary());
    }

    #[test]
    fn test_labels_use_byte_offsets() {
        let err = DecoratedError::new("unknown unit")
            .with_options(["größe", "10qm"])
            .with_option_comment(1, "here");
        let adapter = DecoratedAdapter::new(&err);

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels[0].offset(), "größe ".len());
        assert_eq!(labels[0].len(), 4);
    }

    #[test]
    fn test_source_code_is_option_line() {
        let err = parse_error();
        let adapter = DecoratedAdapter::new(&err);

        assert!(adapter.source_code().is_some());
        assert_eq!(adapter.src.as_deref(), Some("serve --port 80a"));
    }

    #[test]
    fn test_without_options() {
        let err = DecoratedError::new("no options").with_option_comment(0, "dangling");
        let adapter = DecoratedAdapter::new(&err);

        assert!(adapter.source_code().is_none());
        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_display_and_source() {
        let err = parse_error()
            .with_line_before_message("while starting")
            .with_line_between_message_and_options("in command");
        let adapter = DecoratedAdapter::new(&err);

        assert_eq!(
            adapter.to_string(),
            "while starting\ncannot parse port\nin command"
        );
        assert_eq!(adapter.source().unwrap().to_string(), "bad digit");
    }

    #[test]
    fn test_display_without_message_shows_cause_once() {
        let err = DecoratedError::wrap(io::Error::other("disk full"));
        let adapter = DecoratedAdapter::new(&err);

        assert_eq!(adapter.to_string(), "disk full");
        assert!(adapter.source().is_none());
    }

    #[test]
    fn test_code_and_help() {
        let err = parse_error().with_lines_after_options(["see serve --help", "or the manual"]);
        let adapter = DecoratedAdapter::new(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "exit::64");
        assert_eq!(
            adapter.help().unwrap().to_string(),
            "see serve --help\nor the manual"
        );

        let plain = DecoratedError::new("plain");
        let adapter = DecoratedAdapter::new(&plain);
        assert!(adapter.code().is_none());
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_render_fancy() {
        let rendered = render_fancy(&parse_error());

        assert!(rendered.contains("cannot parse port"));
        assert!(rendered.contains("expected a number"));
        assert!(rendered.contains("serve --port 80a"));
    }
}

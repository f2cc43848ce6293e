//! Decor CLI library
//!
//! This module contains the core CLI logic of the `decor` tool, which builds
//! a decorated error from its command line and reports it.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::{AppConfig, ConfigError, Format};
pub use error::{CliError, EXIT_CONFIG, EXIT_USAGE};

use log::{debug, info};

use decor::{Annotation, DecoratedError};

/// A decorated error ready to be printed
#[derive(Debug)]
pub struct Report {
    error: DecoratedError,
    format: Format,
    default_exit_code: i32,
}

impl Report {
    /// Create a report for `error` with the default configuration.
    pub fn new(error: DecoratedError) -> Self {
        Self::with_config(error, &AppConfig::default())
    }

    fn with_config(error: DecoratedError, config: &AppConfig) -> Self {
        Self {
            error,
            format: config.output.format,
            default_exit_code: config.exit.default_code,
        }
    }

    /// Get the reported error.
    pub fn error(&self) -> &DecoratedError {
        &self.error
    }

    /// Get the output format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Process exit code for this report.
    ///
    /// The resolved exit code of the error. The configured default is used
    /// instead when the error resolves to `0` without an explicit exit code.
    pub fn exit_code(&self) -> i32 {
        match (self.error.exit_code(), self.error.explicit_exit_code()) {
            (0, None) => self.default_exit_code,
            (code, _) => code,
        }
    }

    /// Render the error in the report's format.
    pub fn render(&self) -> String {
        match self.format {
            Format::Plain => self.error.to_string(),
            Format::Fancy => error_adapter::render_fancy(&self.error),
        }
    }
}

/// Run the decor CLI application
///
/// Loads the configuration and builds the decorated error described by
/// `args`.
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - Malformed `--note` values
pub fn run(args: &Args) -> Result<Report, CliError> {
    let mut config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        config.output.format = format;
    }

    let error = build_error(args)?;
    info!(
        exit_code = error.exit_code(),
        temporary = error.is_temporary();
        "Built decorated error"
    );

    Ok(Report::with_config(error, &config))
}

/// Build the decorated error described by `args`.
///
/// # Errors
///
/// Returns `CliError::InvalidNote` for a malformed `--note` value.
pub fn build_error(args: &Args) -> Result<DecoratedError, CliError> {
    let notes = args
        .notes
        .iter()
        .map(|note| parse_note(note))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(notes = notes.len(), tokens = args.tokens.len(); "Parsed annotations");

    let mut error = match &args.cause {
        Some(cause) => DecoratedError::wrap(cause.as_str()),
        None => DecoratedError::default(),
    };
    if let Some(message) = &args.message {
        error = error.with_message(message);
    }
    if let Some(code) = args.exit_code {
        error = error.with_exit_code(code);
    }
    if args.temporary {
        error = error.with_temporary(true);
    }

    let error = notes.into_iter().fold(
        error
            .with_lines_before_message(&args.before)
            .with_lines_between_message_and_options(&args.between)
            .with_options(&args.tokens)
            .with_lines_after_options(&args.after),
        |error, note| error.with_option_comment(note.index(), note.comment()),
    );

    Ok(error)
}

/// Parse an `INDEX=COMMENT` note.
///
/// The comment may contain `=`; only the first one separates the index.
///
/// # Errors
///
/// Returns `CliError::InvalidNote` when there is no `=` or the index is not
/// an integer.
pub fn parse_note(value: &str) -> Result<Annotation, CliError> {
    let invalid = |reason: String| CliError::InvalidNote {
        value: value.to_string(),
        reason,
    };

    let (index, comment) = value
        .split_once('=')
        .ok_or_else(|| invalid("expected INDEX=COMMENT".to_string()))?;
    let index = index
        .trim()
        .parse::<isize>()
        .map_err(|e| invalid(format!("invalid index `{index}`: {e}")))?;

    Ok(Annotation::new(index, comment))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_note() {
        let note = parse_note("2=expected a number").unwrap();
        assert_eq!(note.index(), 2);
        assert_eq!(note.comment(), "expected a number");

        let note = parse_note("-1=a=b").unwrap();
        assert_eq!(note.index(), -1);
        assert_eq!(note.comment(), "a=b");

        let note = parse_note("0=").unwrap();
        assert_eq!(note.comment(), "");
    }

    #[test]
    fn test_parse_note_invalid() {
        let err = parse_note("no separator").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid --note value `no separator`: expected INDEX=COMMENT"
        );

        let err = parse_note("x=comment").unwrap_err();
        assert!(matches!(err, CliError::InvalidNote { ref value, .. } if value == "x=comment"));
    }

    #[test]
    fn test_build_error() {
        let args = Args::parse_from([
            "decor",
            "-m",
            "cannot run",
            "--cause",
            "file not found",
            "--note",
            "2=cannot find this file",
            "--note",
            "1=for this option",
            "--before",
            "while loading",
            "--after",
            "check the path",
            "--exit-code",
            "66",
            "--",
            "zero",
            "--one",
            "two",
        ]);

        let err = build_error(&args).unwrap();

        assert_eq!(err.exit_code(), 66);
        assert!(!err.is_temporary());
        assert_eq!(
            err.lines(),
            vec![
                "while loading",
                "cannot run: file not found",
                "zero --one two",
                "           ^~~ cannot find this file",
                "     ^~~~~ for this option",
                "check the path",
            ]
        );
    }

    #[test]
    fn test_build_error_without_message() {
        let args = Args::parse_from(["decor", "--temporary"]);

        let err = build_error(&args).unwrap();

        assert!(err.is_temporary());
        assert_eq!(err.to_string(), decor::PLACEHOLDER_MESSAGE);
    }

    #[test]
    fn test_report_exit_code_falls_back_to_default() {
        let report = Report::new(DecoratedError::new("no code"));
        assert_eq!(report.exit_code(), 1);

        let report = Report::new(DecoratedError::new("explicit").with_exit_code(9));
        assert_eq!(report.exit_code(), 9);
    }

    #[test]
    fn test_report_keeps_explicit_zero() {
        let report = Report::new(DecoratedError::new("done").with_exit_code(0));

        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_report_plain_render() {
        let report = Report::new(DecoratedError::new("plain output"));

        assert_eq!(report.format(), Format::Plain);
        assert_eq!(report.render(), "plain output");
    }
}

//! Command-line argument definitions for the Decor CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments describe the decorated error to print, select the
//! configuration file, and control logging verbosity.

use clap::Parser;

use crate::config::Format;

/// Command-line arguments for the decor tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Message line of the error
    #[arg(short, long)]
    pub message: Option<String>,

    /// Wrap a plain cause error under the message
    #[arg(long)]
    pub cause: Option<String>,

    /// Annotate option token INDEX (repeatable, INDEX may be negative)
    #[arg(long = "note", value_name = "INDEX=COMMENT", allow_hyphen_values = true)]
    pub notes: Vec<String>,

    /// Line printed before the message (repeatable)
    #[arg(long, value_name = "LINE")]
    pub before: Vec<String>,

    /// Line printed between the message and the options (repeatable)
    #[arg(long, value_name = "LINE")]
    pub between: Vec<String>,

    /// Line printed after the options (repeatable)
    #[arg(long, value_name = "LINE")]
    pub after: Vec<String>,

    /// Explicit exit code of the error (0-255)
    #[arg(long, value_name = "CODE", value_parser = clap::value_parser!(i32).range(0..=255))]
    pub exit_code: Option<i32>,

    /// Mark the error as temporary
    #[arg(long)]
    pub temporary: bool,

    /// Output format, overriding the configuration
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Option tokens to render under the message
    #[arg(last = true, value_name = "TOKENS")]
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::parse_from([
            "decor",
            "-m",
            "cannot copy",
            "--note",
            "-1=expected a destination",
            "--after",
            "see cp --help",
            "--exit-code",
            "64",
            "--temporary",
            "--format",
            "fancy",
            "--",
            "cp",
            "--force",
            "a.txt",
        ]);

        assert_eq!(args.message.as_deref(), Some("cannot copy"));
        assert_eq!(args.notes, ["-1=expected a destination"]);
        assert_eq!(args.after, ["see cp --help"]);
        assert_eq!(args.exit_code, Some(64));
        assert!(args.temporary);
        assert_eq!(args.format, Some(Format::Fancy));
        assert_eq!(args.tokens, ["cp", "--force", "a.txt"]);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_exit_code_range() {
        for code in ["0", "255"] {
            let args = Args::try_parse_from(["decor", "--exit-code", code]).unwrap();
            assert_eq!(args.exit_code, Some(code.parse().unwrap()));
        }

        for code in ["256", "300", "-1"] {
            assert!(
                Args::try_parse_from(["decor", "--exit-code", code]).is_err(),
                "exit code {code} should be rejected"
            );
        }
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["decor"]);

        assert!(args.message.is_none());
        assert!(args.notes.is_empty());
        assert!(args.tokens.is_empty());
        assert!(args.exit_code.is_none());
        assert!(!args.temporary);
        assert!(args.format.is_none());
        assert!(args.config.is_none());
    }
}

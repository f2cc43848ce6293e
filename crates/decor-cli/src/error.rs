//! Errors raised by the CLI itself.
//!
//! Every [`CliError`] is turned into a [`DecoratedError`] before it is
//! reported, so tool failures print and exit the same way as the errors the
//! tool is asked to show.

use thiserror::Error;

use decor::DecoratedError;

use crate::config::ConfigError;

/// Exit code for malformed command-line arguments.
pub const EXIT_USAGE: i32 = 2;

/// Exit code for an unusable configuration file.
pub const EXIT_CONFIG: i32 = 78;

/// Errors raised while turning arguments into a report
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid --note value `{value}`: {reason}")]
    InvalidNote { value: String, reason: String },
}

impl CliError {
    /// Decorate this error for reporting.
    ///
    /// `argv` is the full command line, program name included. An invalid
    /// `--note` is shown by underlining the offending argument in it.
    pub fn into_decorated(self, argv: &[String]) -> DecoratedError {
        match self {
            CliError::Config(err) => {
                DecoratedError::wrap_with_message(err, "cannot load configuration")
                    .with_exit_code(EXIT_CONFIG)
            }
            CliError::InvalidNote { ref value, .. } => {
                let index = note_position(argv, value);
                let options = argv
                    .iter()
                    .enumerate()
                    .map(|(i, arg)| if i == 0 { "decor" } else { arg.as_str() });
                DecoratedError::new(self.to_string())
                    .with_options(options)
                    .with_option_comment(index, "expected INDEX=COMMENT")
                    .with_exit_code(EXIT_USAGE)
            }
        }
    }
}

/// Find the argument holding the `--note` value, or `-1` if it is not there.
fn note_position(argv: &[String], value: &str) -> isize {
    let inline = format!("--note={value}");
    argv.iter()
        .enumerate()
        .skip(1)
        .find(|(i, arg)| **arg == inline || (*arg == value && argv[i - 1] == "--note"))
        .and_then(|(i, _)| isize::try_from(i).ok())
        .unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    fn invalid_note(value: &str) -> CliError {
        CliError::InvalidNote {
            value: value.to_string(),
            reason: "missing `=`".to_string(),
        }
    }

    #[test]
    fn test_invalid_note_underlines_separate_value() {
        let argv = argv(&["/usr/bin/decor", "--note", "oops", "--", "a"]);

        let err = invalid_note("oops").into_decorated(&argv);

        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert_eq!(
            err.lines(),
            vec![
                "invalid --note value `oops`: missing `=`",
                "decor --note oops -- a",
                "             ^~~~ expected INDEX=COMMENT",
            ]
        );
    }

    #[test]
    fn test_invalid_note_underlines_inline_value() {
        let argv = argv(&["decor", "--note=x:y"]);

        let err = invalid_note("x:y").into_decorated(&argv);

        assert_eq!(
            err.lines()[2],
            "      ^~~~~~~~~~ expected INDEX=COMMENT".to_string()
        );
    }

    #[test]
    fn test_invalid_note_not_found_points_past_end() {
        let argv = argv(&["decor", "-m", "x"]);

        let err = invalid_note("oops").into_decorated(&argv);

        assert_eq!(err.lines()[2], "           ^ expected INDEX=COMMENT".to_string());
    }

    #[test]
    fn test_note_value_not_mistaken_for_other_argument() {
        let argv = argv(&["decor", "-m", "oops", "--note", "oops"]);

        assert_eq!(note_position(&argv, "oops"), 4);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err = CliError::from(ConfigError::MissingFile(PathBuf::from("nope.toml")));

        let decorated = err.into_decorated(&[]);

        assert_eq!(decorated.exit_code(), EXIT_CONFIG);
        assert_eq!(
            decorated.to_string(),
            "cannot load configuration: Missing configuration file: nope.toml"
        );
    }
}

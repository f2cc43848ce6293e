//! Integration tests for the decor CLI library
//!
//! These tests drive [`decor_cli::run`] with parsed command lines and
//! configuration files, the same way the `decor` binary does.

use std::io::Write;

use clap::Parser;
use tempfile::NamedTempFile;

use decor_cli::{Args, CliError, EXIT_CONFIG, EXIT_USAGE, Format};

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

#[test]
fn test_run_with_config() {
    let config = config_file("[output]\nformat = \"fancy\"\n\n[exit]\ndefault_code = 70\n");
    let path = config.path().display().to_string();
    let args = Args::parse_from(["decor", "-c", path.as_str(), "-m", "cannot start"]);

    let report = decor_cli::run(&args).unwrap();

    assert_eq!(report.format(), Format::Fancy);
    assert_eq!(report.exit_code(), 70);
    assert!(report.render().contains("cannot start"));
}

#[test]
fn test_format_flag_overrides_config() {
    let config = config_file("[output]\nformat = \"fancy\"\n");
    let path = config.path().display().to_string();
    let args = Args::parse_from([
        "decor",
        "--config",
        path.as_str(),
        "--format",
        "plain",
        "-m",
        "cannot copy",
        "--note",
        "-1=expected a destination",
        "--exit-code",
        "64",
        "--",
        "cp",
        "a.txt",
    ]);

    let report = decor_cli::run(&args).unwrap();

    assert_eq!(report.exit_code(), 64);
    assert_eq!(
        report.render(),
        "cannot copy\n\
         cp a.txt\n\
         \x20        ^ expected a destination"
    );
}

#[test]
fn test_invalid_note_is_usage_error() {
    let argv = argv(&["decor", "--note", "first", "--", "a", "b"]);
    let args = Args::parse_from(&argv);

    let err = decor_cli::run(&args).unwrap_err();
    assert!(matches!(err, CliError::InvalidNote { .. }));

    let decorated = err.into_decorated(&argv);
    assert_eq!(decorated.exit_code(), EXIT_USAGE);
    assert_eq!(
        decorated.lines()[1..].to_vec(),
        vec![
            "decor --note first -- a b",
            "             ^~~~~ expected INDEX=COMMENT",
        ]
    );
}

#[test]
fn test_missing_config_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml").display().to_string();
    let argv = argv(&["decor", "-c", path.as_str()]);
    let args = Args::parse_from(&argv);

    let err = decor_cli::run(&args).unwrap_err();
    let decorated = err.into_decorated(&argv);

    assert_eq!(decorated.exit_code(), EXIT_CONFIG);
    assert!(
        decorated
            .to_string()
            .starts_with("cannot load configuration: Missing configuration file")
    );
}

#[test]
fn test_invalid_config_value() {
    let config = config_file("[exit]\ndefault_code = 300\n");
    let path = config.path().display().to_string();
    let args = Args::parse_from(["decor", "-c", path.as_str()]);

    let err = decor_cli::run(&args).unwrap_err();

    assert!(err.to_string().contains("default_code"));
}

#[test]
fn test_explicit_zero_exit_code_is_kept() {
    let config = config_file("[exit]\ndefault_code = 70\n");
    let args = Args::parse_from([
        "decor",
        "-c",
        config.path().to_str().unwrap(),
        "-m",
        "ok",
        "--exit-code",
        "0",
    ]);

    let report = decor_cli::run(&args).unwrap();

    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_exit_code_out_of_range_is_rejected() {
    let result = Args::try_parse_from(["decor", "-m", "too big", "--exit-code", "300"]);

    assert!(result.is_err());
}

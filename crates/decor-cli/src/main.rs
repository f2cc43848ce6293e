use std::{env, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use decor_cli::Args;

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let argv: Vec<String> = env::args().collect();
    let args = Args::parse_from(&argv);

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting decor");
    debug!(args:?; "Parsed arguments");

    match decor_cli::run(&args) {
        Ok(report) => {
            eprintln!("{}", report.render());
            let code = report.exit_code();
            info!(exit_code = code, temporary = report.error().is_temporary(); "Reported error");
            process::exit(code);
        }
        Err(err) => {
            warn!(err:%; "Cannot build report");
            let err = err.into_decorated(&argv);
            eprintln!("{err}");
            process::exit(err.exit_code());
        }
    }
}

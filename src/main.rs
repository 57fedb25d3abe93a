use std::process::ExitCode;

use clap::Parser;
use i18n_bundler::cli::{Arguments, Command, ExitStatus, commands::serve::serve};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    if let Some(Command::Serve(cmd)) = &args.command {
        if let Err(err) = serve(cmd) {
            eprintln!("Error: {:#}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match i18n_bundler::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

/// Logs go to stderr; stdout carries reports and the bridge protocol.
/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

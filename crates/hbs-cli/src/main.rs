//! # hbs — Honeybee Schema CLI
//!
//! Entry point. Parses arguments, sets up logging on stderr and dispatches
//! to the subcommand handlers in the library crate.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hbs_cli::{defaults, init_catalogs, types, validate, Cli, Commands, Status};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Status> {
    init_catalogs()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let status = match cli.command {
        Commands::Validate(args) => validate::run(&args, &mut out)?,
        Commands::Types => {
            types::run(&mut out)?;
            Status::Valid
        }
        Commands::Defaults(args) => {
            defaults::run(&args, &mut out)?;
            Status::Valid
        }
    };
    out.flush()?;
    Ok(status)
}

//! # hbs-cli — Honeybee Schema Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: validate a JSON/YAML document, or every document in a
//!   directory
//! - `types`: list registered entity type names
//! - `defaults`: print the default energy or radiance global set
//!
//! ## Exit Status
//!
//! `0` when everything is valid, `1` when a document has violations, `2`
//! when a document cannot be loaded, the type name is unknown, or a default
//! catalog is unusable.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to the library crates and only format output.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

pub mod defaults;
pub mod types;
pub mod validate;

/// Honeybee schema toolchain.
///
/// Validates building-energy model documents and inspects the schema's
/// entity types and default catalogs.
#[derive(Parser, Debug)]
#[command(name = "hbs", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a document or a directory of documents.
    Validate(validate::ValidateArgs),
    /// List registered entity type names.
    Types,
    /// Print a default global set as JSON.
    Defaults(defaults::DefaultsArgs),
}

/// Outcome of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Valid,
    Invalid,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Valid => ExitCode::SUCCESS,
            Status::Invalid => ExitCode::from(1),
        }
    }
}

/// Build both default catalogs now so a broken catalog fails before any
/// document is read.
pub fn init_catalogs() -> anyhow::Result<()> {
    hbs_energy::catalog::init()?;
    hbs_radiance::catalog::init()?;
    tracing::debug!("default catalogs ready");
    Ok(())
}

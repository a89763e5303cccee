//! # Defaults Subcommand
//!
//! `hbs defaults <energy|radiance>` prints the default global set that a
//! model falls back to when it carries none of its own.

use std::io::Write;

use clap::{Args, ValueEnum};
use hbs_core::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Library {
    /// The energy GlobalConstructionSet.
    Energy,
    /// The radiance GlobalModifierSet.
    Radiance,
}

#[derive(Args, Debug)]
pub struct DefaultsArgs {
    pub library: Library,
}

pub fn run(args: &DefaultsArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let encoded = match args.library {
        Library::Energy => hbs_energy::catalog::try_global_construction_set()?.encode()?,
        Library::Radiance => hbs_radiance::catalog::try_global_modifier_set()?.encode()?,
    };
    serde_json::to_writer_pretty(&mut *out, &encoded)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn print(library: Library) -> Value {
        let mut out = Vec::new();
        run(&DefaultsArgs { library }, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_energy_defaults() {
        let set = print(Library::Energy);
        assert_eq!(set["type"], "GlobalConstructionSet");
        assert!(!set["materials"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_radiance_defaults() {
        let set = print(Library::Radiance);
        assert_eq!(set["type"], "GlobalModifierSet");
        assert!(!set["modifiers"].as_array().unwrap().is_empty());
    }
}

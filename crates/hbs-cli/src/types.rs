//! # Types Subcommand
//!
//! `hbs types` prints every registered entity name, one per line.

use std::io::Write;

use hbs_schema::EntityRegistry;

pub fn run(out: &mut dyn Write) -> anyhow::Result<()> {
    for name in EntityRegistry::new().type_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

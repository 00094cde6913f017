//! This tool bootstraps a small SQLite books database
//!
//! On first use, the database file does not exist yet. It is then created, and its schema is
//! defined by executing a SQL script. On every later use the schema is left alone, and the columns
//! of a few well-known tables are printed instead.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]

use std::io::Write;

use clap::Parser;
use color_eyre::Section;
use eyre::Result;

use crate::{
    bootstrap::Outcome,
    cli::Commands,
    error::{BootstrapError, ErrorKind},
    metadata::TableDescriptor,
};

#[macro_use]
extern crate log;

mod bootstrap;
mod cli;
mod config;
mod error;
mod metadata;

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // parse the CLI arguments
    let args = cli::Cli::parse();

    // initialize logger
    let rust_log_var = "RUST_LOG";
    if std::env::var(rust_log_var).is_err() && args.verbose != 0 {
        let level = match args.verbose {
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var(rust_log_var, level);
    }
    colog::init();
    color_eyre::install()?;

    trace!("parsed args");

    let mut out = std::io::stdout().lock();

    match args.resolved_command() {
        Commands::Bootstrap { tables } => {
            let config = args.bootstrap_config(tables);
            let outcome = with_hint(bootstrap::bootstrap(&config, &mut out))?;
            report_outcome(&mut out, &outcome)?;
        }
        Commands::Status => {
            if with_hint(bootstrap::status(&args.db_file))? {
                writeln!(out, "Database exists, assume schema does, too.")?;
            } else {
                writeln!(out, "Need to create database and schema")?;
            }
        }
        Commands::ShowMetadata { tables } => {
            let descriptors = with_hint(bootstrap::inspect(&args.db_file, &tables))?;
            report_tables(&mut out, &descriptors)?;
        }
    }

    Ok(())
}

fn report_outcome(out: &mut impl Write, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Created { tables } => {
            writeln!(out, "Created tables: {}", tables.join(", "))?;
        }
        Outcome::Existing { tables } => report_tables(out, tables)?,
    }

    Ok(())
}

fn report_tables(out: &mut impl Write, tables: &[TableDescriptor]) -> Result<()> {
    for table in tables {
        if table.is_absent() {
            warn!("table {:?} does not exist", table.name);
            continue;
        }
        write!(out, "{table}")?;
    }

    Ok(())
}

/// Attach a hint on how to resolve the error to the report
fn with_hint<T>(result: std::result::Result<T, BootstrapError>) -> Result<T> {
    result.map_err(|err| {
        let kind = err.kind();
        let hint = err.hint();
        let report = eyre::Report::new(err);
        match kind {
            ErrorKind::Io => report.suggestion(hint),
            ErrorKind::Schema | ErrorKind::Query => report.note(hint),
        }
    })
}

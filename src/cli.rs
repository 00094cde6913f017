//! Command Line Interface (CLI) of this software
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{BootstrapConfig, DEFAULT_DB_FILE, DEFAULT_SCHEMA_FILE, DEFAULT_TABLES};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Increase verbosity (i.e. debug or trace level logging)
    ///
    /// Repeat to increase the verbosity further
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// SQLite db to operate on
    ///
    /// Relative paths are resolved against the working directory
    #[arg(short, long, env = "BOOKS_DB_FILE", default_value = DEFAULT_DB_FILE)]
    pub db_file: PathBuf,

    /// SQL script defining the schema of a new db
    #[arg(short, long, env = "BOOKS_SCHEMA_FILE", default_value = DEFAULT_SCHEMA_FILE)]
    pub schema_file: PathBuf,

    // bootstrap if omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub(crate) enum Commands {
    /// Create the db from the schema script, or describe its tables if it already exists
    ///
    /// The schema script is only ever executed when the db file does not exist yet. It may contain
    /// its own transaction control statements. If it fails, the db file is removed again.
    Bootstrap {
        /// Table to describe if the db already exists
        ///
        /// Repeat to describe multiple tables
        #[arg(short, long = "table", default_values_t = DEFAULT_TABLES.map(String::from))]
        tables: Vec<String>,
    },

    /// Report whether the db exists, without creating it
    Status,

    /// Describe tables of an existing db
    ///
    /// The db is opened read-only, and never created.
    ShowMetadata {
        /// Tables to describe, all tables if none are given
        tables: Vec<String>,
    },
}

impl Cli {
    /// The subcommand to run, falling back to `bootstrap` with default tables
    pub(crate) fn resolved_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Bootstrap {
                tables: BootstrapConfig::default().tables,
            })
    }

    pub(crate) fn bootstrap_config(&self, tables: Vec<String>) -> BootstrapConfig {
        BootstrapConfig {
            db_file: self.db_file.clone(),
            schema_file: self.schema_file.clone(),
            tables,
        }
    }
}

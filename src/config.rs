use std::path::PathBuf;

// Database file, resolved relative to the working directory
pub(crate) const DEFAULT_DB_FILE: &str = "books.db";

// Schema script executed once when the database file is created
pub(crate) const DEFAULT_SCHEMA_FILE: &str = "ddl.sql";

// Tables whose metadata is reported for an existing database
pub(crate) const DEFAULT_TABLES: [&str; 2] = ["author", "book"];

/// Everything the bootstrapper needs to know about its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BootstrapConfig {
    /// SQLite db to create or inspect
    pub(crate) db_file: PathBuf,

    /// SQL script holding the schema of a new db
    pub(crate) schema_file: PathBuf,

    /// Tables to describe if the db already exists
    pub(crate) tables: Vec<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            db_file: DEFAULT_DB_FILE.into(),
            schema_file: DEFAULT_SCHEMA_FILE.into(),
            tables: DEFAULT_TABLES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

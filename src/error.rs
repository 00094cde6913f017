use std::path::PathBuf;

/// Coarse classification of a [`BootstrapError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    /// A file could not be read, created or released
    Io,

    /// The schema script was rejected by SQLite
    Schema,

    /// Introspecting the db failed
    Query,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum BootstrapError {
    #[error("could not determine whether {path:?} exists")]
    DbPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open database {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to read schema script {path:?}")]
    SchemaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema script {path:?} was rejected by the database")]
    Schema {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to query the metadata of {table:?}")]
    Query {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to close the database connection")]
    Close(#[source] rusqlite::Error),

    #[error("failed to write the report")]
    Output(#[source] std::io::Error),
}

impl BootstrapError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Self::DbPath { .. }
            | Self::Open { .. }
            | Self::SchemaFile { .. }
            | Self::Close(_)
            | Self::Output(_) => ErrorKind::Io,
            Self::Schema { .. } => ErrorKind::Schema,
            Self::Query { .. } => ErrorKind::Query,
        }
    }

    /// How the user might resolve the error
    pub(crate) fn hint(&self) -> String {
        match self {
            Self::DbPath { path, .. } => format!("is {path:?} accessible?"),
            Self::Open { path, .. } => {
                format!("does {path:?} exist, and is its directory writable?")
            }
            Self::SchemaFile { path, .. } => format!("does the schema script {path:?} exist?"),
            Self::Schema { path, .. } => {
                format!("the db file was removed again, fix {path:?} and rerun")
            }
            Self::Query { .. } => "is the db file a valid SQLite database?".to_owned(),
            Self::Close(_) => "was the db file modified concurrently?".to_owned(),
            Self::Output(_) => "is stdout closed?".to_owned(),
        }
    }
}

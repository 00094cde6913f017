use rusqlite::{Connection, OpenFlags};
use std::{io::Write, path::Path};

use crate::{
    config::BootstrapConfig,
    error::BootstrapError,
    metadata::{self, TableDescriptor},
};

/// What [`bootstrap`] found and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The db was new, its schema was created from the script
    Created {
        /// All tables present after running the schema script
        tables: Vec<String>,
    },

    /// The db already existed, its schema was left alone
    Existing {
        /// One descriptor per configured table, in configured order
        tables: Vec<TableDescriptor>,
    },
}

/// Make sure the db exists and carries a schema
///
/// If the db file does not exist yet, it is created and the schema script is executed in it as a
/// batch. Should that fail, the freshly created db file is removed again, so that the next attempt
/// starts over from scratch. If the db file already exists, the configured tables are described
/// instead.
///
/// Which of the two happens is announced on `out` before any work is done.
///
/// The existence check and the subsequent open are not atomic. Concurrent bootstrapping of the same
/// db is not supported.
pub(crate) fn bootstrap(
    config: &BootstrapConfig,
    out: &mut impl Write,
) -> Result<Outcome, BootstrapError> {
    let BootstrapConfig {
        db_file,
        schema_file,
        tables,
    } = config;

    if db_exists(db_file)? {
        writeln!(out, "Database exists, assume schema does, too.")
            .map_err(BootstrapError::Output)?;
        info!("database {db_file:?} exists, leaving its schema alone");
        let conn = open(db_file)?;
        let descriptors = describe(&conn, tables)?;
        close(conn)?;

        Ok(Outcome::Existing {
            tables: descriptors,
        })
    } else {
        writeln!(out, "Creating schema").map_err(BootstrapError::Output)?;
        info!("database {db_file:?} is new, creating schema from {schema_file:?}");
        let tables = create_schema(db_file, schema_file)?;

        Ok(Outcome::Created { tables })
    }
}

/// Check whether the db exists, without creating it
pub(crate) fn status(db_file: &Path) -> Result<bool, BootstrapError> {
    db_exists(db_file)
}

/// Describe tables of an existing db
///
/// The db is opened read-only and never created. If `tables` is empty, all user tables are
/// described.
pub(crate) fn inspect(
    db_file: &Path,
    tables: &[String],
) -> Result<Vec<TableDescriptor>, BootstrapError> {
    debug!("opening database {db_file:?} read-only");
    let conn = Connection::open_with_flags(
        db_file,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| BootstrapError::Open {
        path: db_file.to_owned(),
        source,
    })?;

    let descriptors = if tables.is_empty() {
        describe(&conn, &metadata::list_tables(&conn)?)?
    } else {
        describe(&conn, tables)?
    };
    close(conn)?;

    Ok(descriptors)
}

fn db_exists(db_file: &Path) -> Result<bool, BootstrapError> {
    db_file
        .try_exists()
        .map_err(|source| BootstrapError::DbPath {
            path: db_file.to_owned(),
            source,
        })
}

fn open(db_file: &Path) -> Result<Connection, BootstrapError> {
    debug!("opening database {db_file:?}");
    Connection::open(db_file).map_err(|source| BootstrapError::Open {
        path: db_file.to_owned(),
        source,
    })
}

fn close(conn: Connection) -> Result<(), BootstrapError> {
    trace!("closing database");
    conn.close()
        .map_err(|(_conn, source)| BootstrapError::Close(source))
}

fn describe(conn: &Connection, tables: &[String]) -> Result<Vec<TableDescriptor>, BootstrapError> {
    tables
        .iter()
        .map(|table| metadata::table_descriptor(conn, table))
        .collect()
}

fn create_schema(db_file: &Path, schema_file: &Path) -> Result<Vec<String>, BootstrapError> {
    // read the script first, a missing script must not leave an empty db behind
    trace!("reading schema script");
    let script =
        std::fs::read_to_string(schema_file).map_err(|source| BootstrapError::SchemaFile {
            path: schema_file.to_owned(),
            source,
        })?;

    let conn = open(db_file)?;

    match run_schema_script(&conn, &script, schema_file) {
        Ok(tables) => {
            close(conn)?;
            info!("created {} tables", tables.len());
            Ok(tables)
        }
        Err(err) => {
            drop(conn);
            warn!("removing {db_file:?} after failed schema creation");
            if let Err(remove_err) = std::fs::remove_file(db_file) {
                warn!("could not remove {db_file:?}: {remove_err}");
            }
            Err(err)
        }
    }
}

fn run_schema_script(
    conn: &Connection,
    script: &str,
    schema_file: &Path,
) -> Result<Vec<String>, BootstrapError> {
    let schema_error = |source: rusqlite::Error| BootstrapError::Schema {
        path: schema_file.to_owned(),
        source,
    };

    // scripts may carry their own transaction control, e.g. `.dump` output
    debug!("executing schema script");
    conn.execute_batch(script).map_err(schema_error)?;

    metadata::list_tables(conn)
}

//! Introspection of the tables in a db
use rusqlite::Connection;
use std::fmt;

use crate::error::BootstrapError;

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnInfo {
    /// Position of the column within the table, starting at 0
    pub(crate) cid: i64,

    pub(crate) name: String,

    /// Type as written in the `CREATE TABLE` statement, empty if none was given
    pub(crate) decl_type: String,

    pub(crate) not_null: bool,

    /// Default value expression as written in the schema
    pub(crate) default_value: Option<String>,

    /// 1-based index within the primary key, 0 if not part of it
    pub(crate) primary_key: i64,
}

/// The columns of a table, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableDescriptor {
    pub(crate) name: String,
    pub(crate) columns: Vec<ColumnInfo>,
}

impl TableDescriptor {
    /// SQLite reports no columns for tables that do not exist
    pub(crate) fn is_absent(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Describe a table
///
/// A table which does not exist yields a descriptor without columns rather than an error.
pub(crate) fn table_descriptor(
    conn: &Connection,
    table_name: &str,
) -> Result<TableDescriptor, BootstrapError> {
    trace!("querying table_info of {table_name:?}");
    let mut columns = Vec::new();

    conn.pragma(None, "table_info", table_name, |row| {
        columns.push(ColumnInfo {
            cid: row.get(0)?,
            name: row.get(1)?,
            decl_type: row.get(2)?,
            not_null: row.get(3)?,
            default_value: row.get(4)?,
            primary_key: row.get(5)?,
        });
        Ok(())
    })
    .map_err(|source| BootstrapError::Query {
        table: table_name.to_owned(),
        source,
    })?;

    debug!("{table_name:?} has {} columns", columns.len());
    Ok(TableDescriptor {
        name: table_name.to_owned(),
        columns,
    })
}

/// Names of all user tables, sorted by name
pub(crate) fn list_tables(conn: &Connection) -> Result<Vec<String>, BootstrapError> {
    let query_error = |source: rusqlite::Error| BootstrapError::Query {
        table: "sqlite_master".to_owned(),
        source,
    };

    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
             ORDER BY name",
        )
        .map_err(query_error)?;

    let names = stmt
        .query_map([], |row| row.get(0))
        .map_err(query_error)?
        .collect::<Result<Vec<String>, _>>()
        .map_err(query_error)?;

    Ok(names)
}

impl fmt::Display for ColumnInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} not_null={} default={} pk={}",
            self.cid,
            self.name,
            self.decl_type,
            u8::from(self.not_null),
            self.default_value.as_deref().unwrap_or("NULL"),
            self.primary_key
        )
    }
}

impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for column in &self.columns {
            writeln!(f, "  {column}")?;
        }
        Ok(())
    }
}

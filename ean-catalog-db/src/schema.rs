//! SQLite schema creation and index building.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to remove existing database {path}: {source}")]
    RemoveExisting {
        path: String,
        source: std::io::Error,
    },
}

/// Pragmas applied to a freshly created load database.
///
/// No rollback journal and no fsync: the file is only consistent once the
/// load has committed and closed.
const BULK_LOAD_PRAGMAS: &str = "
PRAGMA journal_mode = OFF;
PRAGMA synchronous = OFF;
PRAGMA cache_size = -32678;
PRAGMA foreign_keys = ON;
";

/// Create the catalog tables. Does not create the lookup indexes; see
/// [`create_indexes`].
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Create a new catalog database at `path`, replacing any existing file.
///
/// The returned connection has bulk-load pragmas applied and the tables
/// created, with no transaction open.
pub fn create_database(path: &Path) -> Result<Connection, SchemaError> {
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| SchemaError::RemoveExisting {
            path: path.display().to_string(),
            source: e,
        })?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch(BULK_LOAD_PRAGMAS)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Build the secondary lookup indexes.
///
/// Run once, after the final commit of a load.
pub fn create_indexes(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(INDEX_SQL)?;
    Ok(())
}

/// Names of the indexes created by [`create_indexes`].
pub const INDEX_NAMES: [&str; 5] = [
    "idx_category_name",
    "idx_brand_name",
    "idx_ean_category",
    "idx_ean_brand",
    "idx_ean_name",
];

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS category (
    id INTEGER PRIMARY KEY,
    name TEXT
);

CREATE TABLE IF NOT EXISTS brand (
    id INTEGER PRIMARY KEY,
    name TEXT
);

CREATE TABLE IF NOT EXISTS ean (
    barcode INTEGER PRIMARY KEY,
    name TEXT,
    category_id INTEGER REFERENCES category(id),
    brand_id INTEGER REFERENCES brand(id)
);
"#;

const INDEX_SQL: &str = r#"
CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);
CREATE INDEX IF NOT EXISTS idx_brand_name ON brand(name);
CREATE INDEX IF NOT EXISTS idx_ean_category ON ean(category_id);
CREATE INDEX IF NOT EXISTS idx_ean_brand ON ean(brand_id);
CREATE INDEX IF NOT EXISTS idx_ean_name ON ean(name);
"#;

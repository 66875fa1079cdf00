//! SQLite persistence layer for the barcode catalog.
//!
//! Provides schema creation, index building, the insert operations used by
//! bulk loading, and read queries, all backed by SQLite (via rusqlite with
//! the bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod sink;
pub mod types;

pub use operations::{insert_barcode, insert_brand, insert_category, OperationError};
pub use queries::{
    catalog_stats, find_barcode, find_brand, find_category, index_names, CatalogStats,
};
pub use schema::{create_database, create_indexes, open_memory, SchemaError};
pub use sink::{CatalogSink, SinkError, SqliteSink};
pub use types::{BarcodeRecord, Brand, Category};

pub use rusqlite::Connection;

//! Bulk loading of tab-delimited barcode lists into the catalog database.
//!
//! This crate owns the load pipeline: header resolution, row validation,
//! in-memory dedup of categories, brands and barcodes, and transaction
//! batching. Storage is reached only through `ean_catalog_db::CatalogSink`.

pub mod batch;
pub mod directory;
pub mod header;
pub mod ingest;
pub mod progress;

pub use batch::{BatchSummary, BatchWriter, DEFAULT_BATCH_SIZE};
pub use directory::{
    ImportOptions, ImportSummary, SOURCE_EXTENSION, exclude_file, import_directory, import_files,
    list_source_files,
};
pub use header::{ColumnMap, Field, HeaderError};
pub use ingest::{
    FileOutcome, FileSkipReason, FileStats, IngestError, IngestSession, RowError, RowOutcome,
    RunStats,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};

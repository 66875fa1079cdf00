//! Transaction batching for bulk loads.
//!
//! A [`BatchWriter`] keeps a transaction open on its sink for its whole
//! lifetime. Every `batch_size` barcode inserts it commits and immediately
//! begins a new transaction, so no single transaction grows without bound.

use std::num::NonZeroU64;

use ean_catalog_db::{BarcodeRecord, Brand, CatalogSink, Category, SinkError};

/// Default number of barcode inserts per transaction.
pub const DEFAULT_BATCH_SIZE: NonZeroU64 = match NonZeroU64::new(500_000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Counts reported when a [`BatchWriter`] is finished.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Barcode records written through this writer.
    pub records: u64,
    /// Commits issued, including the final one.
    pub commits: u64,
}

/// An open write transaction over a [`CatalogSink`], checkpointed every
/// `batch_size` barcode inserts.
///
/// Category and brand inserts ride along in the current transaction and do
/// not count towards the batch. Dropping the writer without calling
/// [`finish`](BatchWriter::finish) leaves the last batch uncommitted.
pub struct BatchWriter<'s, S: CatalogSink + ?Sized> {
    sink: &'s mut S,
    batch_size: NonZeroU64,
    records: u64,
    commits: u64,
}

impl<'s, S: CatalogSink + ?Sized> BatchWriter<'s, S> {
    /// Begin the first transaction.
    pub fn open(sink: &'s mut S, batch_size: NonZeroU64) -> Result<Self, SinkError> {
        sink.begin()?;
        Ok(Self {
            sink,
            batch_size,
            records: 0,
            commits: 0,
        })
    }

    pub fn insert_category(&mut self, category: &Category) -> Result<(), SinkError> {
        self.sink.insert_category(category)
    }

    pub fn insert_brand(&mut self, brand: &Brand) -> Result<(), SinkError> {
        self.sink.insert_brand(brand)
    }

    /// Insert a barcode record, committing if it completes a batch.
    ///
    /// Returns `true` if a checkpoint commit happened.
    pub fn insert_barcode(&mut self, record: &BarcodeRecord) -> Result<bool, SinkError> {
        self.sink.insert_barcode(record)?;
        self.records += 1;

        if self.records.is_multiple_of(self.batch_size.get()) {
            self.sink.commit()?;
            self.commits += 1;
            self.sink.begin()?;
            log::debug!("Checkpoint: committed {} records", self.records);
            return Ok(true);
        }
        Ok(false)
    }

    /// Barcode records written so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Commits issued so far.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Commit the final transaction, however many records it holds.
    pub fn finish(mut self) -> Result<BatchSummary, SinkError> {
        self.sink.commit()?;
        self.commits += 1;
        Ok(BatchSummary {
            records: self.records,
            commits: self.commits,
        })
    }
}

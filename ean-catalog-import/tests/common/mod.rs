#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use ean_catalog_db::{BarcodeRecord, Brand, CatalogSink, Category, SinkError};
use ean_catalog_import::{FileSkipReason, FileStats, ImportProgress, RowError};

pub const HEADER: &str = "UPCEAN\tName\tCategoryID\tCategoryName\tBrandID\tBrandName";

/// Build file contents from a header and data rows.
pub fn tsv(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin,
    Commit,
    Category(i32, String),
    Brand(i32, String),
    Barcode(i64),
}

/// In-memory sink that records every call and enforces transaction
/// boundaries.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
    pub fail_on_barcode: Option<i64>,
    pub in_tx: bool,
}

impl RecordingSink {
    pub fn commits(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Commit).count()
    }

    pub fn barcodes(&self) -> Vec<i64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Barcode(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    fn require_tx(&self) -> Result<(), SinkError> {
        if self.in_tx {
            Ok(())
        } else {
            Err(SinkError::NoTransaction)
        }
    }
}

impl CatalogSink for RecordingSink {
    fn begin(&mut self) -> Result<(), SinkError> {
        if self.in_tx {
            return Err(SinkError::TransactionOpen);
        }
        self.in_tx = true;
        self.events.push(Event::Begin);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        self.require_tx()?;
        self.in_tx = false;
        self.events.push(Event::Commit);
        Ok(())
    }

    fn insert_category(&mut self, category: &Category) -> Result<(), SinkError> {
        self.require_tx()?;
        self.events
            .push(Event::Category(category.id, category.name.clone()));
        Ok(())
    }

    fn insert_brand(&mut self, brand: &Brand) -> Result<(), SinkError> {
        self.require_tx()?;
        self.events.push(Event::Brand(brand.id, brand.name.clone()));
        Ok(())
    }

    fn insert_barcode(&mut self, record: &BarcodeRecord) -> Result<(), SinkError> {
        self.require_tx()?;
        if self.fail_on_barcode == Some(record.barcode) {
            return Err(SinkError::Other("disk full".to_string()));
        }
        self.events.push(Event::Barcode(record.barcode));
        Ok(())
    }
}

/// Progress reporter that keeps skipped rows and files for assertions.
#[derive(Default)]
pub struct RecordingProgress {
    pub skipped_rows: RefCell<Vec<(u64, RowError)>>,
    pub skipped_files: RefCell<Vec<FileSkipReason>>,
    pub completed: RefCell<Vec<(FileStats, u64)>>,
    pub checkpoints: RefCell<Vec<u64>>,
}

impl ImportProgress for RecordingProgress {
    fn on_file(&self, _source: &str) {}

    fn on_rows(&self, _source: &str, _lines_read: u64) {}

    fn on_row_skipped(&self, _source: &str, line: u64, error: &RowError) {
        self.skipped_rows.borrow_mut().push((line, error.clone()));
    }

    fn on_checkpoint(&self, total_records: u64) {
        self.checkpoints.borrow_mut().push(total_records);
    }

    fn on_file_skipped(&self, _source: &str, reason: &FileSkipReason) {
        self.skipped_files.borrow_mut().push(reason.clone());
    }

    fn on_file_complete(&self, _source: &str, stats: &FileStats, total_records: u64) {
        self.completed.borrow_mut().push((*stats, total_records));
    }
}

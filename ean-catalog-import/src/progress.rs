//! Import progress reporting.

use crate::ingest::{FileSkipReason, FileStats, RowError};

/// Trait for receiving import progress updates.
///
/// All reporting is advisory; nothing here influences what gets written.
pub trait ImportProgress {
    /// Called when a source file is opened.
    fn on_file(&self, source: &str);

    /// Called periodically while a file is being read.
    fn on_rows(&self, source: &str, lines_read: u64);

    /// Called for every data row that is skipped. `line` is 1-based and
    /// counts the header.
    fn on_row_skipped(&self, source: &str, line: u64, error: &RowError);

    /// Called after a batch checkpoint commit.
    fn on_checkpoint(&self, total_records: u64);

    /// Called when a whole file is skipped.
    fn on_file_skipped(&self, source: &str, reason: &FileSkipReason);

    /// Called when a file has been read to the end. `total_records` is the
    /// running count of barcodes written this run.
    fn on_file_complete(&self, source: &str, stats: &FileStats, total_records: u64);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_file(&self, _source: &str) {}
    fn on_rows(&self, _source: &str, _lines_read: u64) {}
    fn on_row_skipped(&self, _source: &str, _line: u64, _error: &RowError) {}
    fn on_checkpoint(&self, _total_records: u64) {}
    fn on_file_skipped(&self, _source: &str, _reason: &FileSkipReason) {}
    fn on_file_complete(&self, _source: &str, _stats: &FileStats, _total_records: u64) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_file(&self, source: &str) {
        log::info!("Loading {}", source);
    }

    fn on_rows(&self, source: &str, lines_read: u64) {
        if lines_read.is_multiple_of(100_000) {
            log::debug!("  {}: {} lines", source, lines_read);
        }
    }

    fn on_row_skipped(&self, source: &str, line: u64, error: &RowError) {
        log::warn!("{}:{}: {}", source, line, error);
    }

    fn on_checkpoint(&self, total_records: u64) {
        log::debug!("Committed {} records", total_records);
    }

    fn on_file_skipped(&self, source: &str, reason: &FileSkipReason) {
        log::warn!("Skipping {}: {}", source, reason);
    }

    fn on_file_complete(&self, _source: &str, _stats: &FileStats, total_records: u64) {
        log::info!("Loaded {} rows", total_records);
    }
}

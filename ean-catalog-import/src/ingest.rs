//! Streaming ingestion of tab-delimited barcode lists.
//!
//! An [`IngestSession`] holds the dedup state for one run: the category,
//! brand and barcode ids already written. Each source file is read line by
//! line; the header is resolved into a [`ColumnMap`] and every data row is
//! validated, deduplicated and written through a [`BatchWriter`].
//!
//! Bad files and bad rows are skipped and reported. Only sink and read
//! failures are returned as errors.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use ean_catalog_db::{BarcodeRecord, Brand, CatalogSink, Category, SinkError};
use thiserror::Error;

use crate::batch::BatchWriter;
use crate::header::{ColumnMap, DELIMITER, Field, HeaderError};
use crate::progress::ImportProgress;

/// Lines between [`ImportProgress::on_rows`] updates.
pub const PROGRESS_INTERVAL: u64 = 10_000;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Why a data row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Malformed row '{0}'")]
    Malformed(String),
    #[error("Invalid CategoryID '{0}'")]
    InvalidCategoryId(String),
    #[error("Invalid BrandID '{0}'")]
    InvalidBrandId(String),
    #[error("Invalid UPCEAN '{0}'")]
    InvalidBarcode(String),
    #[error("Duplicate UPCEAN '{0}'")]
    DuplicateBarcode(String),
}

/// Why a whole file was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSkipReason {
    Empty,
    InvalidHeader(HeaderError),
}

impl fmt::Display for FileSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSkipReason::Empty => f.write_str("Empty file"),
            FileSkipReason::InvalidHeader(e) => write!(f, "{e}"),
        }
    }
}

/// Counts for a single loaded file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    /// Data lines read, excluding the header.
    pub lines_read: u64,
    pub records_inserted: u64,
    /// All skipped rows, duplicates included.
    pub rows_skipped: u64,
    pub duplicates: u64,
}

/// Result of ingesting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Loaded(FileStats),
    Skipped(FileSkipReason),
}

/// Result of ingesting one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The barcode was written. `checkpoint` is set when the insert
    /// completed a batch and was committed.
    Inserted { checkpoint: bool },
    Skipped(RowError),
}

/// Counts accumulated across a whole run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub files_loaded: u64,
    pub files_skipped: u64,
    pub records_inserted: u64,
    pub categories_inserted: u64,
    pub brands_inserted: u64,
    /// All skipped rows, duplicates included.
    pub rows_skipped: u64,
    pub duplicates: u64,
}

/// Dedup state and counters for one ingestion run.
///
/// Ids are tracked across files: a barcode seen in an earlier file is a
/// duplicate in a later one, and a category or brand is written once with
/// the name from the first row that mentioned it.
#[derive(Debug, Default)]
pub struct IngestSession {
    seen_categories: HashSet<i32>,
    seen_brands: HashSet<i32>,
    seen_barcodes: HashSet<i64>,
    stats: RunStats,
}

impl IngestSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn is_category_seen(&self, id: i32) -> bool {
        self.seen_categories.contains(&id)
    }

    pub fn is_brand_seen(&self, id: i32) -> bool {
        self.seen_brands.contains(&id)
    }

    pub fn is_barcode_seen(&self, barcode: i64) -> bool {
        self.seen_barcodes.contains(&barcode)
    }

    /// Open and ingest a source file.
    pub fn ingest_file<S: CatalogSink + ?Sized>(
        &mut self,
        path: &Path,
        writer: &mut BatchWriter<'_, S>,
        progress: Option<&dyn ImportProgress>,
    ) -> Result<FileOutcome, IngestError> {
        let source = path.display().to_string();
        let file = File::open(path).map_err(|e| IngestError::Io {
            path: source.clone(),
            source: e,
        })?;
        self.ingest_reader(&source, BufReader::new(file), writer, progress)
    }

    /// Ingest a header line followed by data lines from `reader`.
    ///
    /// `source` names the input in progress reports and errors.
    pub fn ingest_reader<R: BufRead, S: CatalogSink + ?Sized>(
        &mut self,
        source: &str,
        mut reader: R,
        writer: &mut BatchWriter<'_, S>,
        progress: Option<&dyn ImportProgress>,
    ) -> Result<FileOutcome, IngestError> {
        let io_err = |e: io::Error| IngestError::Io {
            path: source.to_string(),
            source: e,
        };
        let mut buf = Vec::new();

        if let Some(p) = progress {
            p.on_file(source);
        }

        let Some(header) = read_line(&mut reader, &mut buf).map_err(io_err)? else {
            return Ok(self.skip_file(source, FileSkipReason::Empty, progress));
        };
        // UTF-8 byte order mark
        let header = header.strip_prefix('\u{FEFF}').unwrap_or(&header);
        let columns = match ColumnMap::resolve(header) {
            Ok(c) => c,
            Err(e) => {
                return Ok(self.skip_file(source, FileSkipReason::InvalidHeader(e), progress));
            }
        };

        let mut file_stats = FileStats::default();
        while let Some(line) = read_line(&mut reader, &mut buf).map_err(io_err)? {
            file_stats.lines_read += 1;

            match self.ingest_row(&line, &columns, writer)? {
                RowOutcome::Inserted { checkpoint } => {
                    file_stats.records_inserted += 1;
                    if checkpoint {
                        if let Some(p) = progress {
                            p.on_checkpoint(self.stats.records_inserted);
                        }
                    }
                }
                RowOutcome::Skipped(err) => {
                    file_stats.rows_skipped += 1;
                    if matches!(err, RowError::DuplicateBarcode(_)) {
                        file_stats.duplicates += 1;
                    }
                    if let Some(p) = progress {
                        // +1 for the header line
                        p.on_row_skipped(source, file_stats.lines_read + 1, &err);
                    }
                }
            }

            if let Some(p) = progress {
                if file_stats.lines_read.is_multiple_of(PROGRESS_INTERVAL) {
                    p.on_rows(source, file_stats.lines_read);
                }
            }
        }

        self.stats.files_loaded += 1;
        if let Some(p) = progress {
            p.on_file_complete(source, &file_stats, self.stats.records_inserted);
        }
        Ok(FileOutcome::Loaded(file_stats))
    }

    /// Validate one data line and write whatever it contributes.
    ///
    /// The category and brand are written as soon as their ids parse, so a
    /// row rejected at a later step may still have introduced them.
    pub fn ingest_row<S: CatalogSink + ?Sized>(
        &mut self,
        line: &str,
        columns: &ColumnMap,
        writer: &mut BatchWriter<'_, S>,
    ) -> Result<RowOutcome, IngestError> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        if fields.len() <= columns.max_index() {
            return Ok(self.skip_row(RowError::Malformed(line.to_string())));
        }
        let field = |f: Field| fields[columns.index(f)];

        // Category
        let raw = field(Field::CategoryId);
        let Some(category_id) = parse_int::<i32>(raw) else {
            return Ok(self.skip_row(RowError::InvalidCategoryId(raw.to_string())));
        };
        if self.seen_categories.insert(category_id) {
            writer.insert_category(&Category {
                id: category_id,
                name: field(Field::CategoryName).to_string(),
            })?;
            self.stats.categories_inserted += 1;
        }

        // Brand
        let raw = field(Field::BrandId);
        let Some(brand_id) = parse_int::<i32>(raw) else {
            return Ok(self.skip_row(RowError::InvalidBrandId(raw.to_string())));
        };
        if self.seen_brands.insert(brand_id) {
            writer.insert_brand(&Brand {
                id: brand_id,
                name: field(Field::BrandName).to_string(),
            })?;
            self.stats.brands_inserted += 1;
        }

        // Barcode
        let raw = field(Field::Barcode);
        let Some(barcode) = parse_int::<i64>(raw) else {
            return Ok(self.skip_row(RowError::InvalidBarcode(raw.to_string())));
        };
        if !self.seen_barcodes.insert(barcode) {
            return Ok(self.skip_row(RowError::DuplicateBarcode(raw.to_string())));
        }

        let checkpoint = writer.insert_barcode(&BarcodeRecord {
            barcode,
            name: field(Field::Name).to_string(),
            category_id,
            brand_id,
        })?;
        self.stats.records_inserted += 1;
        Ok(RowOutcome::Inserted { checkpoint })
    }

    fn skip_row(&mut self, err: RowError) -> RowOutcome {
        self.stats.rows_skipped += 1;
        if matches!(err, RowError::DuplicateBarcode(_)) {
            self.stats.duplicates += 1;
        }
        RowOutcome::Skipped(err)
    }

    fn skip_file(
        &mut self,
        source: &str,
        reason: FileSkipReason,
        progress: Option<&dyn ImportProgress>,
    ) -> FileOutcome {
        self.stats.files_skipped += 1;
        if let Some(p) = progress {
            p.on_file_skipped(source, &reason);
        }
        FileOutcome::Skipped(reason)
    }
}

/// Parse an integer field, ignoring surrounding ASCII whitespace.
fn parse_int<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim_ascii().parse().ok()
}

/// Read one line into `buf`, without its terminator.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. Returns `None` at end of
/// input. Invalid UTF-8 is replaced rather than rejected.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    let mut any = false;
    loop {
        let available = match reader.fill_buf() {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        any = true;

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) => {
                let terminator = available[i];
                buf.extend_from_slice(&available[..i]);
                reader.consume(i + 1);
                if terminator == b'\r' {
                    skip_byte(reader, b'\n')?;
                }
                break;
            }
            None => {
                let n = available.len();
                buf.extend_from_slice(available);
                reader.consume(n);
            }
        }
    }

    if !any {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

/// Consume the next byte if it is `byte`.
fn skip_byte<R: BufRead>(reader: &mut R, byte: u8) -> io::Result<()> {
    loop {
        match reader.fill_buf() {
            Ok(b) => {
                if b.first() == Some(&byte) {
                    reader.consume(1);
                }
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

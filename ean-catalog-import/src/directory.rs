//! Whole-run loading of a source directory.

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use ean_catalog_db::CatalogSink;

use crate::batch::{BatchSummary, BatchWriter, DEFAULT_BATCH_SIZE};
use crate::ingest::{IngestError, IngestSession, RunStats};
use crate::progress::ImportProgress;

/// Extension of source files. Matched ASCII case-insensitively.
pub const SOURCE_EXTENSION: &str = "csv";

/// Options for a load run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Barcode inserts per transaction.
    pub batch_size: NonZeroU64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Outcome of a completed load run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub stats: RunStats,
    pub batches: BatchSummary,
}

/// List the source files directly inside `dir`, sorted by file name.
pub fn list_source_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| IngestError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    Ok(entries.into_iter().map(|e| e.path()).collect())
}

/// Remove `excluded` from `files`, comparing by resolved location.
///
/// `excluded` need not exist yet.
pub fn exclude_file(files: &mut Vec<PathBuf>, excluded: &Path) {
    let target = resolve_location(excluded);
    files.retain(|f| resolve_location(f) != target);
}

/// Canonical parent directory joined with the file name, or the path as
/// given if the parent cannot be resolved.
fn resolve_location(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (std::fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Load every source file in `dir` into `sink`.
pub fn import_directory<S: CatalogSink + ?Sized>(
    dir: &Path,
    sink: &mut S,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportSummary, IngestError> {
    let files = list_source_files(dir)?;
    import_files(&files, sink, options, progress)
}

/// Load `files` in order into `sink` as a single run.
///
/// One transaction is opened before the first file and the last one is
/// committed after the final file, so the sink holds everything on return.
/// Any error leaves the current batch uncommitted.
pub fn import_files<S: CatalogSink + ?Sized>(
    files: &[PathBuf],
    sink: &mut S,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportSummary, IngestError> {
    let mut session = IngestSession::new();
    let mut writer = BatchWriter::open(sink, options.batch_size)?;

    for path in files {
        session.ingest_file(path, &mut writer, progress)?;
    }

    let batches = writer.finish()?;
    Ok(ImportSummary {
        stats: *session.stats(),
        batches,
    })
}

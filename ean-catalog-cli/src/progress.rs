//! Console progress for a load run.
//!
//! A single spinner shows the file being read; per-file results and row
//! warnings are logged above it with the spinner suspended.

use std::path::Path;
use std::time::Duration;

use ean_catalog_import::{FileSkipReason, FileStats, ImportProgress, RowError};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

pub(crate) struct CliImportProgress {
    bar: ProgressBar,
}

impl CliImportProgress {
    /// When `quiet` is true, the spinner is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|");
        bar.set_style(style);
        Self { bar }
    }

    /// Stop the spinner and clear its line.
    pub(crate) fn finish(&self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}

fn file_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

impl ImportProgress for CliImportProgress {
    fn on_file(&self, source: &str) {
        self.bar.suspend(|| {
            log::info!(
                "Loading {}",
                source.if_supports_color(Stdout, |t| t.bold())
            );
        });
        self.bar.set_message(file_name(source));
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn on_rows(&self, source: &str, lines_read: u64) {
        self.bar
            .set_message(format!("{} [{} lines]", file_name(source), lines_read));
    }

    fn on_row_skipped(&self, _source: &str, line: u64, error: &RowError) {
        self.bar.suspend(|| {
            log::warn!(
                "  {} line {}: {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                line,
                error,
            );
        });
    }

    fn on_checkpoint(&self, total_records: u64) {
        self.bar.suspend(|| log::debug!("  committed {} records", total_records));
    }

    fn on_file_skipped(&self, source: &str, reason: &FileSkipReason) {
        self.bar.suspend(|| {
            log::warn!(
                "  {} {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                file_name(source).if_supports_color(Stdout, |t| t.bold()),
                reason,
            );
        });
    }

    fn on_file_complete(&self, _source: &str, stats: &FileStats, total_records: u64) {
        self.bar.suspend(|| {
            log::info!(
                "  {} Loaded {} rows ({} new, {} skipped, {} duplicates)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                total_records,
                stats.records_inserted,
                stats.rows_skipped,
                stats.duplicates,
            );
        });
    }
}

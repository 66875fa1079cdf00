//! ean-catalog CLI
//!
//! Builds a SQLite barcode database from a directory of tab-delimited
//! EAN/UPC catalog lists.

mod error;
mod progress;
mod settings;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use ean_catalog_db::{Connection, SqliteSink, catalog_stats, create_database, create_indexes};
use ean_catalog_import::{
    ImportOptions, ImportSummary, SOURCE_EXTENSION, exclude_file, import_files, list_source_files,
};

use crate::error::CliError;
use crate::progress::CliImportProgress;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "ean-catalog")]
#[command(
    about = "Build a SQLite barcode database from tab-delimited EAN/UPC lists",
    long_about = None
)]
struct Cli {
    /// Directory containing the tab-delimited *.csv source files
    source: Option<PathBuf>,

    /// Output database path (default: <SOURCE>/ean.db). Replaced if it exists.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Commit after this many inserted barcodes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    batch_size: Option<u64>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let Some(source) = cli.source.as_deref() else {
        if let Err(e) = Cli::command().print_help() {
            log::error!("{}", e);
        }
        return;
    };

    if let Err(e) = run(&cli, source) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

/// Route `log` records to stderr as plain messages.
///
/// `RUST_LOG` overrides the default level.
fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn run(cli: &Cli, source: &Path) -> Result<(), CliError> {
    if !source.is_dir() {
        return Err(CliError::other(format!(
            "Not a directory: {}",
            source.display()
        )));
    }

    let settings = Settings::load()?;
    let options = ImportOptions {
        batch_size: settings.batch_size(cli.batch_size)?,
    };
    let db_path = cli
        .output
        .clone()
        .unwrap_or_else(|| source.join(settings.database_name()));

    let started = Instant::now();

    let mut files = list_source_files(source)?;
    exclude_file(&mut files, &db_path);

    log::info!(
        "{}",
        format!("Creating database {}", db_path.display())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    let conn = create_database(&db_path).map_err(|e| {
        CliError::database(format!("failed to create {}: {}", db_path.display(), e))
    })?;

    let progress = CliImportProgress::new(cli.quiet);
    let result = {
        let mut sink = SqliteSink::new(&conn);
        import_files(&files, &mut sink, &options, Some(&progress))
    };
    progress.finish();
    let summary = result?;

    if summary.stats.files_loaded + summary.stats.files_skipped == 0 {
        log::warn!(
            "No *.{} files found in {}",
            SOURCE_EXTENSION,
            source.display()
        );
    }
    log::info!("Time: {}", format_elapsed(started.elapsed()));

    log::info!("Indexing ...");
    create_indexes(&conn).map_err(|e| CliError::database(e.to_string()))?;
    log::info!("Time: {}", format_elapsed(started.elapsed()));

    print_summary(&conn, &summary, &options, &db_path)
}

fn print_summary(
    conn: &Connection,
    summary: &ImportSummary,
    options: &ImportOptions,
    db_path: &Path,
) -> Result<(), CliError> {
    let db = catalog_stats(conn).map_err(|e| CliError::database(e.to_string()))?;
    let stats = &summary.stats;

    log::info!("");
    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!(
        "  Files: {} loaded, {} skipped",
        stats.files_loaded,
        stats.files_skipped,
    );
    log::info!(
        "  Barcodes: {} ({} rows skipped, {} duplicates)",
        db.barcodes,
        stats.rows_skipped,
        stats.duplicates,
    );
    log::info!("  Categories: {}", db.categories);
    log::info!("  Brands: {}", db.brands);
    log::info!(
        "  Commits: {} (batch size {})",
        summary.batches.commits,
        options.batch_size,
    );
    log::info!("  Database: {}", db_path.display());
    Ok(())
}

/// Format elapsed time as seconds with one decimal, e.g. `12.3 s`.
fn format_elapsed(elapsed: Duration) -> String {
    format!("{}.{} s", elapsed.as_secs(), elapsed.subsec_millis() / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "0.0 s");
        assert_eq!(format_elapsed(Duration::from_millis(999)), "0.9 s");
        assert_eq!(format_elapsed(Duration::from_millis(12_345)), "12.3 s");
        assert_eq!(format_elapsed(Duration::from_secs(90)), "90.0 s");
    }

    #[test]
    fn test_cli_no_args_parses() {
        let cli = Cli::try_parse_from(["ean-catalog"]).unwrap();
        assert!(cli.source.is_none());
    }

    #[test]
    fn test_cli_rejects_zero_batch_size() {
        assert!(Cli::try_parse_from(["ean-catalog", "data", "--batch-size", "0"]).is_err());
        let cli = Cli::try_parse_from(["ean-catalog", "data", "--batch-size", "2"]).unwrap();
        assert_eq!(cli.batch_size, Some(2));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}

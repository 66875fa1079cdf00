//! User settings, read from `~/.config/ean-catalog/settings.toml`.
//!
//! Every setting can be overridden on the command line; the file is
//! optional and missing keys fall back to built-in defaults.

use std::io;
use std::num::NonZeroU64;
use std::path::PathBuf;

use ean_catalog_import::DEFAULT_BATCH_SIZE;
use serde::Deserialize;

use crate::error::CliError;

/// Database file created inside the source directory when no output path
/// is given.
pub(crate) const DEFAULT_DATABASE_NAME: &str = "ean.db";

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("ean-catalog").join("settings.toml")
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) import: ImportSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ImportSettings {
    pub(crate) batch_size: Option<u64>,
    pub(crate) database_name: Option<String>,
}

impl Settings {
    /// Load the settings file, or defaults if it does not exist.
    pub(crate) fn load() -> Result<Self, CliError> {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents)
                .map_err(|e| CliError::config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CliError::config(format!("{}: {}", path.display(), e))),
        }
    }

    pub(crate) fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Batch size from the CLI override, then the file, then the default.
    pub(crate) fn batch_size(&self, cli_override: Option<u64>) -> Result<NonZeroU64, CliError> {
        match cli_override.or(self.import.batch_size) {
            None => Ok(DEFAULT_BATCH_SIZE),
            Some(n) => NonZeroU64::new(n)
                .ok_or_else(|| CliError::config("batch_size must be at least 1")),
        }
    }

    pub(crate) fn database_name(&self) -> &str {
        self.import
            .database_name
            .as_deref()
            .unwrap_or(DEFAULT_DATABASE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.batch_size(None).unwrap(), DEFAULT_BATCH_SIZE);
        assert_eq!(settings.database_name(), "ean.db");
    }

    #[test]
    fn test_file_values() {
        let settings = Settings::parse(
            r#"
            [import]
            batch_size = 1000
            database_name = "catalog.sqlite"
            "#,
        )
        .unwrap();
        assert_eq!(settings.batch_size(None).unwrap().get(), 1000);
        assert_eq!(settings.database_name(), "catalog.sqlite");
    }

    #[test]
    fn test_cli_override_wins() {
        let settings = Settings::parse("[import]\nbatch_size = 1000\n").unwrap();
        assert_eq!(settings.batch_size(Some(7)).unwrap().get(), 7);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let settings = Settings::parse("[import]\nbatch_size = 0\n").unwrap();
        assert!(matches!(settings.batch_size(None), Err(CliError::Config(_))));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let settings = Settings::parse("[import]\nworkers = 4\n[other]\nx = 1\n").unwrap();
        assert_eq!(settings.batch_size(None).unwrap(), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(Settings::parse("[import\nbatch_size = ").is_err());
        assert!(Settings::parse("[import]\nbatch_size = \"many\"\n").is_err());
    }
}

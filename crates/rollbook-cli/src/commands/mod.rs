//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rollbook_core::config::{load_config_from, OutputFormat};
use rollbook_core::RecordStore;

pub mod add;
pub mod delete;
pub mod find;
pub mod grade;
pub mod init;
pub mod shell;
pub mod show;
pub mod sort;
pub mod update;

/// Effective settings after merging config file, environment and flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_file: PathBuf,
    pub default_format: OutputFormat,
}

impl Settings {
    pub fn resolve(data_file: Option<PathBuf>, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        Ok(Self {
            data_file: data_file.unwrap_or(config.data_file),
            default_format: config.default_format,
        })
    }

    /// Open the record store at the configured data file.
    ///
    /// A backing file that exists but cannot be read is an error, so a later
    /// save never overwrites records that were never loaded.
    pub fn open_store(&self) -> Result<RecordStore> {
        let store = RecordStore::open(&self.data_file).with_context(|| {
            format!("failed to load records from {}", self.data_file.display())
        })?;
        tracing::debug!(records = store.len(), "opened {}", self.data_file.display());
        Ok(store)
    }
}

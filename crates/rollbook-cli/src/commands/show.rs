//! The `rollbook show` and `rollbook count` commands.

use anyhow::Result;

use rollbook_core::config::OutputFormat;
use rollbook_core::StudentRecord;

use super::Settings;
use crate::output::{render_records, resolve_format};

pub fn execute(settings: &Settings, format: Option<&str>) -> Result<()> {
    let format = resolve_format(format, settings.default_format)?;
    let store = settings.open_store()?;

    if store.is_empty() && format != OutputFormat::Json {
        println!("No students found.");
        return Ok(());
    }

    let records: Vec<&StudentRecord> = store.records().iter().collect();
    if format != OutputFormat::Json {
        println!("All students ({})", records.len());
    }
    println!("{}", render_records(&records, format)?);
    Ok(())
}

pub fn count(settings: &Settings) -> Result<()> {
    let store = settings.open_store()?;
    println!("Total students: {}", store.len());
    Ok(())
}

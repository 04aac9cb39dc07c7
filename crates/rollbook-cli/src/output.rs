//! Rendering of record listings.

use anyhow::Result;
use comfy_table::{Cell, Table};

use rollbook_core::config::OutputFormat;
use rollbook_core::StudentRecord;

/// Parse a `--format` value, falling back to the configured default.
pub fn resolve_format(format: Option<&str>, default: OutputFormat) -> Result<OutputFormat> {
    match format.map(|f| f.to_lowercase()).as_deref() {
        None => Ok(default),
        Some("table") => Ok(OutputFormat::Table),
        Some("json") => Ok(OutputFormat::Json),
        Some("plain") | Some("text") => Ok(OutputFormat::Plain),
        Some(other) => anyhow::bail!("unknown format: {other} (expected table, json or plain)"),
    }
}

/// Render records in the requested format.
pub fn render_records(records: &[&StudentRecord], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
        OutputFormat::Plain => records
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Roll", "Name", "Grade"]);
            for r in records {
                table.add_row(vec![
                    Cell::new(r.roll()),
                    Cell::new(r.full_name()),
                    Cell::new(r.grade()),
                ]);
            }
            table.to_string()
        }
    };
    Ok(rendered)
}

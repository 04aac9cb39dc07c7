//! The `rollbook find` command.

use anyhow::Result;

use rollbook_core::config::OutputFormat;
use rollbook_core::StudentRecord;

use super::Settings;
use crate::output::{render_records, resolve_format};

pub fn execute(
    settings: &Settings,
    roll: Option<i64>,
    name: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let format = resolve_format(format, settings.default_format)?;
    let store = settings.open_store()?;

    let matches: Vec<&StudentRecord> = match (roll, name) {
        (Some(roll), _) => store.find_by_roll(roll)?.into_iter().collect(),
        (None, Some(name)) => store.find_by_name(name)?,
        (None, None) => anyhow::bail!("either --roll or --name is required"),
    };

    if matches.is_empty() && format != OutputFormat::Json {
        match roll {
            Some(_) => println!("Not found."),
            None => println!("No matching students."),
        }
        return Ok(());
    }

    println!("{}", render_records(&matches, format)?);
    Ok(())
}

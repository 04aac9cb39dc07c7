//! The `rollbook sort` command.

use anyhow::Result;

use super::Settings;

pub fn execute(settings: &Settings, by: &str) -> Result<()> {
    let mut store = settings.open_store()?;
    match by.to_lowercase().as_str() {
        "roll" => store.sort_by_roll()?,
        "name" => store.sort_by_name()?,
        other => anyhow::bail!("unknown sort key: {other} (expected roll or name)"),
    }
    println!("Sorted {} students by {}.", store.len(), by.to_lowercase());
    Ok(())
}

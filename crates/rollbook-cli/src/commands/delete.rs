//! The `rollbook delete` command.

use anyhow::Result;

use super::Settings;

pub fn execute(settings: &Settings, roll: i64) -> Result<()> {
    let mut store = settings.open_store()?;
    let removed = store.delete(roll)?;
    println!("Student deleted: {removed}");
    Ok(())
}

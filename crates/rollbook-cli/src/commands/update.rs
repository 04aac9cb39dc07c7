//! The `rollbook update` command.

use anyhow::Result;

use super::Settings;

pub fn execute(
    settings: &Settings,
    roll: i64,
    name: Option<&str>,
    grade: Option<&str>,
) -> Result<()> {
    let mut store = settings.open_store()?;
    let outcome = store.update(roll, name, grade)?;

    for rejected in &outcome.rejected {
        eprintln!("Not updated: {rejected}");
    }
    if outcome.changed {
        println!("Record updated: {}", outcome.record);
    } else {
        println!("Nothing changed: {}", outcome.record);
    }
    Ok(())
}

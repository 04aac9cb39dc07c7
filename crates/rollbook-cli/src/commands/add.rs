//! The `rollbook add` command.

use anyhow::Result;

use super::Settings;

pub fn execute(settings: &Settings, roll: i64, name: &str, grade: &str) -> Result<()> {
    let mut store = settings.open_store()?;
    let record = store.add(roll, name, grade)?;
    println!("Student added: {record}");
    Ok(())
}

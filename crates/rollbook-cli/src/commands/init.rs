//! The `rollbook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("rollbook.toml").exists() {
        println!("rollbook.toml already exists, skipping.");
    } else {
        std::fs::write("rollbook.toml", SAMPLE_CONFIG)?;
        println!("Created rollbook.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit rollbook.toml to point data_file at your class list");
    println!("  2. Run: rollbook add --roll 1 --name \"Ada Lovelace\" --grade A+");
    println!("  3. Run: rollbook (opens the interactive menu)");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# rollbook configuration

# Flat file holding one `roll|name|grade` record per line.
# ${VAR} references are expanded; ROLLBOOK_DATA_FILE overrides this value.
data_file = "students.txt"

# Listing format for `show` and `find`: table, json or plain
default_format = "table"
"#;

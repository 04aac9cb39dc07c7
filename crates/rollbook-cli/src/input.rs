//! Parsing of interactive input lines.
//!
//! Parsers return a `Result`; the menu loop decides whether to reprompt.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid number")]
    NotANumber,

    #[error("number must be positive")]
    NotPositive,

    #[error("choose between 1 and {max}")]
    OutOfRange { max: u32 },
}

/// Parse a strictly positive integer, ignoring surrounding whitespace.
pub fn parse_positive(line: &str) -> Result<i64, InputError> {
    let value: i64 = line.trim().parse().map_err(|_| InputError::NotANumber)?;
    if value <= 0 {
        return Err(InputError::NotPositive);
    }
    Ok(value)
}

/// Entries of the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ShowAll,
    FindByRoll,
    FindByName,
    Update,
    Delete,
    SortByRoll,
    SortByName,
    Count,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::Add,
        MenuChoice::ShowAll,
        MenuChoice::FindByRoll,
        MenuChoice::FindByName,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::SortByRoll,
        MenuChoice::SortByName,
        MenuChoice::Count,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add Student",
            MenuChoice::ShowAll => "Show All Students",
            MenuChoice::FindByRoll => "Find by Roll",
            MenuChoice::FindByName => "Find by Name",
            MenuChoice::Update => "Update Student",
            MenuChoice::Delete => "Delete Student",
            MenuChoice::SortByRoll => "Sort by Roll",
            MenuChoice::SortByName => "Sort by Name",
            MenuChoice::Count => "Count Students",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Parse a 1-based menu selection.
pub fn parse_choice(line: &str) -> Result<MenuChoice, InputError> {
    let value: i64 = line.trim().parse().map_err(|_| InputError::NotANumber)?;
    let max = MenuChoice::ALL.len() as u32;
    usize::try_from(value)
        .ok()
        .and_then(|v| v.checked_sub(1))
        .and_then(|idx| MenuChoice::ALL.get(idx).copied())
        .ok_or(InputError::OutOfRange { max })
}

//! Core data model types for rollbook.
//!
//! A [`StudentRecord`] can only be built through its validating constructor,
//! so every record held by the store satisfies the name and grade rules.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// Roll number identifying a student. Valid rolls are strictly positive.
pub type Roll = i64;

/// Field separator used by the backing file.
pub const FIELD_SEPARATOR: char = '|';

/// Letter grades accepted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub enum Grade {
    APlus,
    A,
    BPlus,
    B,
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Grade; 8] = [
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.as_str().to_string()
    }
}

impl FromStr for Grade {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is not stripped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str() == upper)
            .ok_or_else(|| format!("unknown grade: {s}"))
    }
}

/// A single student: roll, full name and grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    roll: Roll,
    full_name: String,
    grade: Grade,
}

impl StudentRecord {
    /// Validate and build a record. The name is trimmed and the grade is
    /// normalised to upper case.
    pub fn new(roll: Roll, full_name: &str, grade: &str) -> Result<Self, RecordError> {
        Ok(Self {
            roll: validate_roll(roll)?,
            full_name: validate_name(full_name)?,
            grade: parse_grade(grade)?,
        })
    }

    pub fn roll(&self) -> Roll {
        self.roll
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub(crate) fn set_full_name(&mut self, name: String) {
        self.full_name = name;
    }

    pub(crate) fn set_grade(&mut self, grade: Grade) {
        self.grade = grade;
    }

    /// Serialize as `roll|name|grade`. Separator characters inside the text
    /// fields are replaced with spaces.
    pub fn to_storage_line(&self) -> String {
        let sep = FIELD_SEPARATOR.to_string();
        format!(
            "{}{sep}{}{sep}{}",
            self.roll,
            self.full_name.replace(FIELD_SEPARATOR, " "),
            self.grade.as_str().replace(FIELD_SEPARATOR, " "),
        )
    }

    /// Parse and validate one backing-file line.
    ///
    /// Returns `None` for anything that is not exactly three `|`-separated
    /// fields with an integer roll, or that fails validation.
    pub fn from_storage_line(line: &str) -> Option<Self> {
        let mut parts = line.split(FIELD_SEPARATOR);
        let (roll, name, grade) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let roll: Roll = roll.trim().parse().ok()?;
        Self::new(roll, name.trim(), grade.trim()).ok()
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Roll: {} | Name: {} | Grade: {}",
            self.roll, self.full_name, self.grade
        )
    }
}

/// Reject non-positive rolls.
pub fn validate_roll(roll: Roll) -> Result<Roll, RecordError> {
    if roll > 0 {
        Ok(roll)
    } else {
        Err(RecordError::InvalidRoll(roll))
    }
}

/// Check a name is non-blank and made of ASCII letters and whitespace only.
/// Whitespace covers space, tab, line feed, vertical tab, form feed and
/// carriage return. Returns the trimmed name.
pub fn validate_name(name: &str) -> Result<String, RecordError> {
    let trimmed = name.trim();
    let valid = !trimmed.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_ascii_whitespace() || c == '\x0B');
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(RecordError::InvalidName(name.to_string()))
    }
}

/// Parse a grade case-insensitively.
pub fn parse_grade(grade: &str) -> Result<Grade, RecordError> {
    grade
        .parse()
        .map_err(|_| RecordError::InvalidGrade(grade.to_string()))
}

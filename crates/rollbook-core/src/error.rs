//! Record store error types.
//!
//! Validation failures abort an operation before any state changes.
//! `PersistenceFailure` is different: it is raised after the in-memory
//! collection was already mutated, and that mutation is kept.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::Roll;

/// Errors returned by [`RecordStore`](crate::store::RecordStore) operations.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Roll numbers must be positive.
    #[error("invalid roll {0}: use a positive number")]
    InvalidRoll(Roll),

    /// Names must be non-blank and contain only letters and spaces.
    #[error("invalid name {0:?}: use letters and spaces only")]
    InvalidName(String),

    /// The grade is not one of A+, A, B+, B, C+, C, D, F.
    #[error("invalid grade {0:?}: use one of A+, A, B+, B, C+, C, D, F")]
    InvalidGrade(String),

    /// A record with this roll already exists.
    #[error("roll {0} already exists")]
    DuplicateRoll(Roll),

    /// No record with this roll exists.
    #[error("no student with roll {0}")]
    NotFound(Roll),

    /// Reading or writing the backing file failed.
    #[error("failed to access backing file {}: {source}", path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RecordError {
    /// Returns `true` for errors raised before any state was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RecordError::InvalidRoll(_)
                | RecordError::InvalidName(_)
                | RecordError::InvalidGrade(_)
                | RecordError::DuplicateRoll(_)
        )
    }
}

/// Errors from the grade-averaging calculator.
#[derive(Debug, Error, PartialEq)]
pub enum GradingError {
    /// At least one subject is required to compute an average.
    #[error("at least one subject is required")]
    NoSubjects,

    /// A mark fell outside 0..=100.
    #[error("mark {mark} for subject {subject} is outside 0-100")]
    MarkOutOfRange { subject: usize, mark: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_classification() {
        assert!(RecordError::InvalidRoll(0).is_validation());
        assert!(RecordError::DuplicateRoll(3).is_validation());
        assert!(!RecordError::NotFound(3).is_validation());
        let persist = RecordError::PersistenceFailure {
            path: PathBuf::from("students.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!persist.is_validation());
        assert!(persist.to_string().contains("students.txt"));
    }
}

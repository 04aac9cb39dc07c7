//! Grade-averaging calculator.
//!
//! Averages per-subject marks (each out of 100) and maps the average onto a
//! letter grade.

use serde::Serialize;

use crate::error::GradingError;
use crate::model::Grade;

/// Highest mark a single subject can receive.
pub const MAX_MARK: f64 = 100.0;

/// Totals and the resulting grade for a set of subject marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSummary {
    pub subjects: usize,
    pub total: f64,
    pub max_total: f64,
    pub average: f64,
    pub grade: Grade,
}

/// Compute the total, average and grade for `marks`.
pub fn summarize(marks: &[f64]) -> Result<GradeSummary, GradingError> {
    if marks.is_empty() {
        return Err(GradingError::NoSubjects);
    }

    for (idx, &mark) in marks.iter().enumerate() {
        if !(0.0..=MAX_MARK).contains(&mark) {
            return Err(GradingError::MarkOutOfRange {
                subject: idx + 1,
                mark,
            });
        }
    }

    let total: f64 = marks.iter().sum();
    let average = total / marks.len() as f64;

    Ok(GradeSummary {
        subjects: marks.len(),
        total,
        max_total: marks.len() as f64 * MAX_MARK,
        average,
        grade: grade_for_average(average),
    })
}

/// Map an average percentage onto a letter grade.
///
/// The calculator only awards A+, A, B, C, D and F.
pub fn grade_for_average(average: f64) -> Grade {
    if average >= 90.0 {
        Grade::APlus
    } else if average >= 80.0 {
        Grade::A
    } else if average >= 70.0 {
        Grade::B
    } else if average >= 60.0 {
        Grade::C
    } else if average >= 50.0 {
        Grade::D
    } else {
        Grade::F
    }
}

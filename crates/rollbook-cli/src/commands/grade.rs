//! The `rollbook grade` command.

use anyhow::Result;

use rollbook_core::grading;

pub fn execute(marks: &[f64]) -> Result<()> {
    let summary = grading::summarize(marks)?;

    println!("Subjects: {}", summary.subjects);
    println!(
        "Total marks: {} out of {}",
        summary.total, summary.max_total
    );
    println!("Average: {:.2}", summary.average);
    println!("Grade: {}", summary.grade);
    Ok(())
}

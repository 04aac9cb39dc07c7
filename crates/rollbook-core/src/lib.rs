//! rollbook-core — student record store, validation and grading.
//!
//! This crate holds the data model, the flat-file backed [`store::RecordStore`],
//! the grade-averaging calculator and configuration loading that the
//! `rollbook` CLI builds on.

pub mod config;
pub mod error;
pub mod grading;
pub mod model;
pub mod store;

pub use error::{GradingError, RecordError};
pub use model::{Grade, Roll, StudentRecord};
pub use store::{RecordStore, UpdateOutcome};

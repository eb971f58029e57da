//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Result records, parse failures, and identifier aliases
//! - `error`: Error types for the exam results engine

pub mod error;
pub mod record;

pub use error::{CommitError, IngestError, StoreError};
pub use record::{
    ExamEventId, Grade, MissingField, ParseFailure, ResultRecord, StudentId, TransactionId,
};

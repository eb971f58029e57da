//! Exam Results Engine Library
//! # Overview
//!
//! This library ingests free-form lines of exam results (student id plus
//! grade, with arbitrary intervening columns) and commits them as a single
//! atomic unit of work, stamped with the transaction identifier of the
//! caller's open transaction.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (ResultRecord, ParseFailure, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::committer`] - Atomic batch persistence of one submission
//!   - [`core::traits`] - Seams toward the persistence layer
//!   - [`core::memory_store`] - In-memory backend with fault injection
//! - [`io`] - Submission input and report output
//!
//! # The Parsing / Persistence Contract
//!
//! Each line either yields a validated [`types::ResultRecord`] or a
//! classified [`types::ParseFailure`]; parsing is pure and per-line. The
//! [`core::BatchCommitter`] then persists the whole submission atomically,
//! with a named [`core::CommitPolicy`] deciding what a mix of valid and
//! malformed lines means:
//!
//! - **Strict**: any parse failure aborts the submission; nothing is staged
//! - **BestEffort**: valid rows commit, failures are reported in the
//!   [`core::Outcome`]
//!
//! On every path the caller's transaction handle is finalized exactly
//! once, and the store never holds a partial set of rows for one
//! submission.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{
    BatchCommitter, CommitPolicy, GradeStore, MemoryStore, Outcome, TransactionHandle,
    TransactionState,
};
pub use io::{write_rows_csv, LineParser, SubmissionReader};
pub use types::{
    CommitError, ExamEventId, Grade, IngestError, MissingField, ParseFailure, ResultRecord,
    StoreError, StudentId, TransactionId,
};

//! Error types for the Exam Results Engine
//!
//! This module defines the three failure domains of the system:
//!
//! - **Persistence errors** ([`StoreError`]): the store rejects a staged row,
//!   the batch flush, or a finalize call.
//! - **Commit errors** ([`CommitError`]): failures surfaced by the batch
//!   committer. Finalize failures are distinct variants from staging/flush
//!   failures so a caller can tell "work was not applied" apart from "we
//!   don't know whether work was applied".
//! - **Ingest errors** ([`IngestError`]): front-end level failures (file
//!   I/O, report writing) wrapping the above.
//!
//! Parse failures are not errors in this sense; they are classified values
//! collected per line (see [`crate::types::ParseFailure`]).

use crate::types::record::TransactionId;
use thiserror::Error;

/// Persistence-layer failure reported by the external store
///
/// This is the failure domain of the grade-results store and of the
/// transaction handle's finalize operations. The engine never retries a
/// store failure; it aborts the in-flight transaction and propagates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store rejected a staged row or the batch flush
    #[error("store rejected operation: {message}")]
    Rejected {
        /// Description supplied by the store
        message: String,
    },

    /// The underlying connection or backend failed
    #[error("store connection failure: {message}")]
    Connection {
        /// Description supplied by the store
        message: String,
    },
}

impl StoreError {
    /// Create a Rejected error
    pub fn rejected(message: impl Into<String>) -> Self {
        StoreError::Rejected {
            message: message.into(),
        }
    }

    /// Create a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the batch committer
///
/// Every variant carries the transaction identifier of the submission it
/// terminated. `Staging` and `Flush` mean the transaction was aborted and
/// no row of the submission is visible. `CommitFailed` and `AbortFailed`
/// are finalize failures: the handle's terminal operation itself failed,
/// so the transaction's true end state is uncertain to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// A staged insert was rejected by the store
    ///
    /// The transaction was aborted; zero rows of the submission are visible.
    #[error("staging failed after {staged} rows (transaction {tx} aborted): {source}")]
    Staging {
        /// Transaction identifier of the aborted submission
        tx: TransactionId,
        /// Number of rows staged before the failure
        staged: usize,
        /// The underlying store failure
        source: StoreError,
    },

    /// The batch flush was rejected by the store
    ///
    /// The transaction was aborted; zero rows of the submission are visible.
    #[error("batch flush failed (transaction {tx} aborted): {source}")]
    Flush {
        /// Transaction identifier of the aborted submission
        tx: TransactionId,
        /// The underlying store failure
        source: StoreError,
    },

    /// The commit call on the transaction handle failed
    ///
    /// All staged work had been accepted by the store, but the finalize
    /// failed; whether the work is durable is unknown.
    #[error("commit of transaction {tx} failed: {source}")]
    CommitFailed {
        /// Transaction identifier of the submission
        tx: TransactionId,
        /// The underlying store failure
        source: StoreError,
    },

    /// The abort call on the transaction handle failed
    ///
    /// When the abort was triggered by an earlier persistence failure,
    /// that failure is carried in `cause`.
    #[error("abort of transaction {tx} failed{}: {source}", cause.as_ref().map(|c| format!(" while handling '{c}'")).unwrap_or_default())]
    AbortFailed {
        /// Transaction identifier of the submission
        tx: TransactionId,
        /// The persistence failure that triggered the abort, if any
        cause: Option<StoreError>,
        /// The failure of the abort call itself
        source: StoreError,
    },
}

impl CommitError {
    /// Create a Staging error
    pub fn staging(tx: TransactionId, staged: usize, source: StoreError) -> Self {
        CommitError::Staging { tx, staged, source }
    }

    /// Create a Flush error
    pub fn flush(tx: TransactionId, source: StoreError) -> Self {
        CommitError::Flush { tx, source }
    }

    /// Create a CommitFailed error
    pub fn commit_failed(tx: TransactionId, source: StoreError) -> Self {
        CommitError::CommitFailed { tx, source }
    }

    /// Create an AbortFailed error
    pub fn abort_failed(tx: TransactionId, cause: Option<StoreError>, source: StoreError) -> Self {
        CommitError::AbortFailed { tx, cause, source }
    }

    /// Whether this error leaves the transaction's end state uncertain
    ///
    /// True for finalize failures (`CommitFailed`, `AbortFailed`), where
    /// the caller cannot know whether the work was applied or discarded.
    pub fn is_finalize_failure(&self) -> bool {
        matches!(
            self,
            CommitError::CommitFailed { .. } | CommitError::AbortFailed { .. }
        )
    }
}

/// Front-end level error for the ingest pipeline
///
/// Wraps fatal I/O failures around the submission file and report output,
/// and the committer's errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Submission file not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading the submission or writing the report
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The batch committer failed
    #[error(transparent)]
    Commit(#[from] CommitError),
}

// Conversion from io::Error to IngestError
impl From<std::io::Error> for IngestError {
    fn from(error: std::io::Error) -> Self {
        IngestError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to IngestError
impl From<csv::Error> for IngestError {
    fn from(error: csv::Error) -> Self {
        IngestError::IoError {
            message: error.to_string(),
        }
    }
}

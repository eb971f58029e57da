//! Batch committer for exam result submissions
//!
//! This module provides the BatchCommitter that persists one submission's
//! parse outcomes as a single atomic unit of work. It coordinates between
//! the [`GradeStore`] (row staging and batch flush) and the caller's
//! [`TransactionHandle`] (finalize), and owns the central design decision
//! of the system: what happens to a submission that mixes valid and
//! malformed lines.
//!
//! # Commit Policies
//!
//! - **Strict**: a submission commits only if every line parsed. Any parse
//!   failure aborts the transaction before a single row is staged.
//! - **BestEffort**: rows for successfully parsed lines are inserted and
//!   committed; failures are collected and reported alongside the committed
//!   count, never silently dropped and never allowed to abort valid work.
//!
//! Either way the whole submission is atomic: all rows are staged before
//! the one batch flush, and the flush happens before the one finalize call.
//! Persistence errors during staging or flushing abort the transaction
//! under both policies and are propagated, never swallowed.

use crate::core::traits::{GradeStore, TransactionHandle};
use crate::types::{CommitError, ParseFailure, ResultRecord, StoreError, TransactionId};

/// Atomicity contract for a submission containing mixed valid/invalid lines
///
/// A named configuration option rather than an implicit control-flow
/// choice; see the module documentation for the two contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// All-or-nothing: any parse failure aborts the whole submission
    #[default]
    Strict,

    /// Valid rows commit; failures are collected and reported
    BestEffort,
}

/// Final state of the submission's transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// The handle committed; staged rows are durable
    Committed,

    /// The handle aborted; no row of the submission is visible
    Aborted,
}

/// Result of committing one submission
///
/// Returned whenever the committer could bring the transaction to a known
/// end state. Finalize and persistence failures are reported as
/// [`CommitError`] instead, so no error kind is ever silently folded into
/// a success value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Number of rows committed to the store (0 when aborted)
    pub rows_committed: usize,

    /// Parse failures of this submission, in input order (empty on full success)
    pub failures: Vec<ParseFailure>,

    /// Whether the transaction was committed or aborted
    pub state: TransactionState,
}

impl Outcome {
    /// Whether every line parsed and the transaction committed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.state == TransactionState::Committed
    }
}

/// Batch committer for one submission's parse outcomes
///
/// Stateless apart from its policy; one committer can serve any number of
/// submissions, each with its own store and handle. The handle is consumed
/// by value, so exactly one finalize call per submission is enforced by
/// ownership rather than by convention.
#[derive(Debug, Clone, Copy)]
pub struct BatchCommitter {
    policy: CommitPolicy,
}

impl BatchCommitter {
    /// Create a BatchCommitter with the given policy
    pub fn new(policy: CommitPolicy) -> Self {
        BatchCommitter { policy }
    }

    /// The policy this committer applies
    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Persist one submission as a single atomic operation
    ///
    /// Consumes the submission's parse outcomes in order, applies the
    /// commit policy, stages every accepted row, flushes the batch once,
    /// and finalizes the transaction exactly once:
    ///
    /// - parse failures under `Strict` abort before anything is staged;
    ///   under `BestEffort` they are collected into the Outcome
    /// - a persistence error while staging or flushing aborts the
    ///   transaction and is returned as [`CommitError::Staging`] or
    ///   [`CommitError::Flush`]
    /// - a failing finalize call is returned as
    ///   [`CommitError::CommitFailed`] or [`CommitError::AbortFailed`],
    ///   never merged with the persistence error that may have triggered it
    ///
    /// # Arguments
    ///
    /// * `parsed` - One parse outcome per submission line, in input order
    /// * `store` - The grade-results relation to stage inserts into
    /// * `handle` - The caller's open transaction; consumed on every path
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` - The transaction reached a known end state
    /// * `Err(CommitError)` - A persistence or finalize failure terminated
    ///   the submission
    pub fn insert_grades<I, S, H>(
        &self,
        parsed: I,
        store: &mut S,
        handle: H,
    ) -> Result<Outcome, CommitError>
    where
        I: IntoIterator<Item = Result<ResultRecord, ParseFailure>>,
        S: GradeStore,
        H: TransactionHandle,
    {
        let tx = handle.id();

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for outcome in parsed {
            match outcome {
                Ok(record) => records.push(record),
                Err(failure) => failures.push(failure),
            }
        }

        // Strict: a single malformed line poisons the submission before
        // any row is staged. Failures are still reported in full.
        if self.policy == CommitPolicy::Strict && !failures.is_empty() {
            Self::abort(handle, tx, None)?;
            return Ok(Outcome {
                rows_committed: 0,
                failures,
                state: TransactionState::Aborted,
            });
        }

        let mut staged = 0;
        for record in &records {
            debug_assert_eq!(
                record.transaction_id, tx,
                "record stamped with a different transaction than the handle"
            );
            if let Err(source) = store.stage(record) {
                Self::abort(handle, tx, Some(source.clone()))?;
                return Err(CommitError::staging(tx, staged, source));
            }
            staged += 1;
        }

        if let Err(source) = store.flush() {
            Self::abort(handle, tx, Some(source.clone()))?;
            return Err(CommitError::flush(tx, source));
        }

        handle
            .commit()
            .map_err(|source| CommitError::commit_failed(tx, source))?;

        Ok(Outcome {
            rows_committed: staged,
            failures,
            state: TransactionState::Committed,
        })
    }

    /// Abort the transaction, surfacing a failing abort as its own error
    fn abort<H: TransactionHandle>(
        handle: H,
        tx: TransactionId,
        cause: Option<StoreError>,
    ) -> Result<(), CommitError> {
        handle
            .abort()
            .map_err(|source| CommitError::abort_failed(tx, cause, source))
    }
}

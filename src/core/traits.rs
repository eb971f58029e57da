//! Core traits for transaction handling and grade staging
//!
//! This module defines the seams between the batch committer and the
//! surrounding persistence layer. Both traits are implemented by the
//! external store (or by [`crate::core::memory_store`] in tests and the
//! CLI), never by the committer itself.

use crate::types::{ResultRecord, StoreError, TransactionId};

/// One open transaction, supplied by the caller
///
/// The handle is acquired before the committer runs and terminated by
/// exactly one of `commit` or `abort` before control returns. Both
/// terminal operations take `self` by value, so invoking either one
/// consumes the handle: calling the other afterwards, or calling one
/// twice, does not compile. Implementations are expected to release any
/// underlying resource on either path.
pub trait TransactionHandle {
    /// The transaction identifier stamped onto every row of this submission
    fn id(&self) -> TransactionId;

    /// Finalize and make durable all work performed under the handle
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the underlying store rejects the commit.
    /// The transaction's true end state is then uncertain to the caller.
    fn commit(self) -> Result<(), StoreError>;

    /// Discard all work performed under the handle
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the discard itself cannot be performed.
    fn abort(self) -> Result<(), StoreError>;
}

/// The grade-results relation, as seen by the batch committer
///
/// Inserts are staged row by row and made visible to the transaction in a
/// single batch by `flush`. Nothing staged becomes durable until the
/// accompanying [`TransactionHandle`] commits.
pub trait GradeStore {
    /// Stage an insert of one validated row
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store rejects the row.
    fn stage(&mut self, row: &ResultRecord) -> Result<(), StoreError>;

    /// Flush all staged inserts as one batch
    ///
    /// Called exactly once per submission, after every row has been staged
    /// and before the transaction is finalized.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store rejects the batch.
    fn flush(&mut self) -> Result<(), StoreError>;
}

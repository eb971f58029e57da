//! In-memory grade store and transaction backend
//!
//! This module provides MemoryStore, an in-memory implementation of both
//! committer seams ([`GradeStore`] and [`TransactionHandle`]). It backs the
//! CLI front end and doubles as the substitutable test backend the
//! transaction-handle abstraction exists for: fault injection via
//! [`Faults`] makes every failure path of the committer reachable, and the
//! `rows`/`state`/`finalize_calls` observers make the atomicity and
//! exactly-once properties checkable from tests.
//!
//! # Transaction Semantics
//!
//! Staged rows live in a scratch area until `flush` marks the batch
//! complete; `commit` then moves them into the committed set, while
//! `abort` discards them. Rows are only ever observable through [`rows`]
//! after a successful flush-and-commit, mirroring how a relational store
//! scopes uncommitted work to the open transaction.
//!
//! [`rows`]: MemoryStore::rows

use crate::core::traits::{GradeStore, TransactionHandle};
use crate::types::{ResultRecord, StoreError, TransactionId};
use std::cell::RefCell;
use std::rc::Rc;

/// Observable state of the backend's transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    /// No finalize call has succeeded
    Open,

    /// The transaction committed; staged rows are in the committed set
    Committed,

    /// The transaction aborted; staged rows were discarded
    Aborted,
}

/// Fault injection switches for the memory backend
///
/// Each switch makes the corresponding operation fail with a StoreError,
/// so committer error paths can be exercised deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Faults {
    /// Fail the n-th `stage` call (zero-based)
    pub fail_stage_at: Option<usize>,

    /// Fail the batch `flush`
    pub fail_flush: bool,

    /// Fail the `commit` finalize call
    pub fail_commit: bool,

    /// Fail the `abort` finalize call
    pub fail_abort: bool,
}

#[derive(Debug, Default)]
struct Inner {
    committed: Vec<ResultRecord>,
    staged: Vec<ResultRecord>,
    flushed: bool,
    stage_calls: usize,
    finalize_calls: u32,
    state: Option<BackendState>,
    faults: Faults,
}

/// In-memory backend owning the committed rows and transaction state
///
/// `begin` hands out the two collaborator halves the committer needs: a
/// staging area implementing [`GradeStore`] and a handle implementing
/// [`TransactionHandle`]. Both share this backend's state. The backend is
/// single-threaded by design; one submission owns the connection resource
/// for its whole unit of work.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    /// Create an empty backend with no faults
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Create an empty backend with the given fault switches
    pub fn with_faults(faults: Faults) -> Self {
        let store = MemoryStore::new();
        store.inner.borrow_mut().faults = faults;
        store
    }

    /// Open a transaction, returning the staging area and the handle
    ///
    /// # Arguments
    ///
    /// * `id` - The transaction identifier the caller allocated for this
    ///   submission
    pub fn begin(&self, id: TransactionId) -> (MemoryStaging, MemoryTransaction) {
        (
            MemoryStaging {
                inner: Rc::clone(&self.inner),
            },
            MemoryTransaction {
                inner: Rc::clone(&self.inner),
                id,
            },
        )
    }

    /// The committed rows, in staging order
    pub fn rows(&self) -> Vec<ResultRecord> {
        self.inner.borrow().committed.clone()
    }

    /// The observable transaction state
    pub fn state(&self) -> BackendState {
        self.inner.borrow().state.unwrap_or(BackendState::Open)
    }

    /// How many finalize calls (commit or abort) have been attempted
    pub fn finalize_calls(&self) -> u32 {
        self.inner.borrow().finalize_calls
    }
}

/// Staging half of an open memory transaction
#[derive(Debug)]
pub struct MemoryStaging {
    inner: Rc<RefCell<Inner>>,
}

impl GradeStore for MemoryStaging {
    fn stage(&mut self, row: &ResultRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();

        let call = inner.stage_calls;
        inner.stage_calls += 1;
        if inner.faults.fail_stage_at == Some(call) {
            return Err(StoreError::rejected(format!(
                "injected failure staging row for student {}",
                row.student_id
            )));
        }

        inner.staged.push(*row);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();

        if inner.faults.fail_flush {
            return Err(StoreError::rejected("injected failure flushing batch"));
        }

        inner.flushed = true;
        Ok(())
    }
}

/// Handle half of an open memory transaction
#[derive(Debug)]
pub struct MemoryTransaction {
    inner: Rc<RefCell<Inner>>,
    id: TransactionId,
}

impl TransactionHandle for MemoryTransaction {
    fn id(&self) -> TransactionId {
        self.id
    }

    fn commit(self) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.finalize_calls += 1;

        if inner.faults.fail_commit {
            // End state left as Open: the caller cannot know whether the
            // work was applied
            return Err(StoreError::connection("injected failure committing"));
        }
        if !inner.flushed && !inner.staged.is_empty() {
            return Err(StoreError::rejected("commit before batch flush"));
        }

        let staged = std::mem::take(&mut inner.staged);
        inner.committed.extend(staged);
        inner.state = Some(BackendState::Committed);
        Ok(())
    }

    fn abort(self) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.finalize_calls += 1;

        if inner.faults.fail_abort {
            return Err(StoreError::connection("injected failure aborting"));
        }

        inner.staged.clear();
        inner.flushed = false;
        inner.state = Some(BackendState::Aborted);
        Ok(())
    }
}

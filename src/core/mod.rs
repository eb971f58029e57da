//! Core business logic module
//!
//! This module contains the batch persistence components:
//! - `traits` - Trait seams toward the persistence layer (transaction
//!   handle, grade store)
//! - `committer` - Atomic batch persistence of one submission
//! - `memory_store` - In-memory backend with fault injection

pub mod committer;
pub mod memory_store;
pub mod traits;

pub use committer::{BatchCommitter, CommitPolicy, Outcome, TransactionState};
pub use memory_store::{BackendState, Faults, MemoryStaging, MemoryStore, MemoryTransaction};
pub use traits::{GradeStore, TransactionHandle};

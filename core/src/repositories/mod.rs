//! Persistence ports for the verification domain.
//!
//! Both stores expose conditional-update primitives so that every
//! read-modify-write in the services is an optimistic-concurrency loop.
//! Correctness under concurrent callers rests on these primitives, not on
//! in-process locking, because multiple service instances share the store.

pub mod code;
pub mod lockout;

pub use code::{CodeStore, MemoryCodeStore};
pub use lockout::{LockoutStore, MemoryLockoutStore};

/// A stored record together with the version tag guarding conditional writes.
///
/// The version increases by one on every applied update; a conditional write
/// carrying a stale version is refused by the store and the caller re-reads.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    /// The record as read from the store
    pub record: T,
    /// Version the record had at read time
    pub version: u64,
}

//! Error types for the verification domain and its storage layer.

mod types;

// Re-export all error types
pub use types::{RejectReason, StoreError};

use thiserror::Error;

/// Core domain errors.
///
/// These are infrastructure-level failures. Verification verdicts
/// (`RejectReason`) never travel through this type: a storage outage must
/// not be mistaken for a wrong guess, because a wrong guess costs the caller
/// an attempt credit and an outage must not.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Concurrent update contention on {resource}")]
    Contention { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to storage-layer failures
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type DomainResult<T> = Result<T, DomainError>;

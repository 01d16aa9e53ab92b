//! Verdict and storage error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a verification request was refused.
///
/// All of these are expected, caller-recoverable conditions; none are
/// process-fatal and none consume more than the attempt credit the caller
/// already spent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// The identity is inside an active lock window; retry after it elapses
    #[error("Account locked")]
    AccountLocked,

    /// No live code for the pair: never issued, expired, superseded, or
    /// already consumed. Caller should request a new code.
    #[error("Verification code not found or expired")]
    NotFoundOrExpired,

    /// The live code's own attempt budget is exhausted; the row is dead even
    /// if a later guess would match. Caller should request a new code.
    #[error("Too many attempts for this code")]
    TooManyAttempts,

    /// Wrong digits; caller may retry, subject to both budgets
    #[error("Verification code mismatch")]
    CodeMismatch,
}

/// Storage-layer failures.
///
/// Propagated as infrastructure errors, never folded into `RejectReason`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("Storage operation timed out")]
    Timeout,

    #[error("Corrupt record: {message}")]
    Corrupt { message: String },
}

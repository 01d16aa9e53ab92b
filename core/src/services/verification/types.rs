//! Result types for the verification workflow

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::RejectReason;

/// Result of requesting a verification code.
///
/// On success the issued code entity is returned so the caller can hand the
/// digits to its delivery channel; the workflow itself never sends anything.
#[derive(Debug, Clone)]
pub struct IssueResult {
    /// Whether a code was issued
    pub issued: bool,
    /// The issued code entity, when `issued` is true
    pub verification_code: Option<VerificationCode>,
    /// Refusal reason, when `issued` is false
    pub reason: Option<RejectReason>,
    /// Minutes until the lock expires, when refused for a lock
    pub minutes_remaining: Option<i64>,
}

impl IssueResult {
    pub(crate) fn issued(code: VerificationCode) -> Self {
        Self {
            issued: true,
            verification_code: Some(code),
            reason: None,
            minutes_remaining: None,
        }
    }

    pub(crate) fn locked(minutes_remaining: i64) -> Self {
        Self {
            issued: false,
            verification_code: None,
            reason: Some(RejectReason::AccountLocked),
            minutes_remaining: Some(minutes_remaining),
        }
    }
}

/// Result of verifying a candidate code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    /// Whether the verification succeeded
    pub ok: bool,
    /// Rejection reason, when `ok` is false
    pub reason: Option<RejectReason>,
    /// Minutes until the lock expires, when rejected for a lock
    pub minutes_remaining: Option<i64>,
}

impl VerifyResult {
    pub(crate) fn verified() -> Self {
        Self {
            ok: true,
            reason: None,
            minutes_remaining: None,
        }
    }

    pub(crate) fn rejected(reason: RejectReason) -> Self {
        Self {
            ok: false,
            reason: Some(reason),
            minutes_remaining: None,
        }
    }

    pub(crate) fn locked(minutes_remaining: i64) -> Self {
        Self {
            ok: false,
            reason: Some(RejectReason::AccountLocked),
            minutes_remaining: Some(minutes_remaining),
        }
    }
}

/// Ledger-level verdict for a single validation attempt.
///
/// The orchestrator turns `Rejected` into a guard failure record; the ledger
/// itself knows nothing about account-wide lockout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Candidate matched the live code, which is now consumed
    Accepted,
    /// Candidate refused; the reason is one of the non-lock verdicts
    Rejected(RejectReason),
}

//! Verification workflow: code ledger, lockout guard, and the orchestrator.
//!
//! This module provides the complete issuance and validation workflow:
//! - Single-use, time-boxed code issuance and validation (ledger)
//! - Account-wide failed-attempt counting with temporary lockout (guard)
//! - The orchestrator sequencing both so neither can be bypassed
//! - A periodic sweep deleting dead code rows
//!
//! Code delivery (SMS/email) is the caller's responsibility; the ledger only
//! hands the issued code back.

mod config;
mod guard;
mod ledger;
mod service;
mod sweep;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use guard::{FailureRecord, LockoutGuard};
pub use ledger::CodeLedger;
pub use service::VerificationService;
pub use sweep::{CodeSweepService, SweepConfig};
pub use types::{IssueResult, ValidationOutcome, VerifyResult};

/// Bounded retries for optimistic-concurrency loops. Contention on a single
/// identity is rare (a double-tapped submit, a scripted guess burst), so a
/// small budget suffices; exhaustion surfaces as `DomainError::Contention`.
pub(crate) const CAS_RETRY_LIMIT: usize = 5;

/// Mask an identity for logging, keeping only the last 4 characters
pub(crate) fn mask_identity(identity: &str) -> String {
    let chars: Vec<char> = identity.chars().collect();
    if chars.len() <= 4 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    }
}

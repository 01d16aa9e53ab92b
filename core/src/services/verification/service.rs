//! Verification orchestrator: the only externally callable surface.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::purpose::Purpose;
use crate::errors::DomainResult;
use crate::repositories::code::CodeStore;
use crate::repositories::lockout::LockoutStore;

use super::config::VerificationConfig;
use super::guard::LockoutGuard;
use super::ledger::CodeLedger;
use super::mask_identity;
use super::types::{IssueResult, ValidationOutcome, VerifyResult};

/// Sequences the lockout guard and the code ledger so that neither can be
/// bypassed by calling them independently: every validation is preceded by a
/// lock check and followed by an outcome record.
///
/// Store handles are injected at construction and live for the process
/// lifetime; there is no global state.
pub struct VerificationService<C: CodeStore, L: LockoutStore> {
    ledger: CodeLedger<C>,
    guard: LockoutGuard<L>,
    config: VerificationConfig,
}

impl<C: CodeStore, L: LockoutStore> VerificationService<C, L> {
    /// Create a new orchestrator over the given stores
    ///
    /// # Arguments
    ///
    /// * `code_store` - Durable store for verification codes
    /// * `lockout_store` - Durable store for lockout state
    /// * `config` - Workflow configuration, immutable for the process lifetime
    pub fn new(code_store: Arc<C>, lockout_store: Arc<L>, config: VerificationConfig) -> Self {
        Self {
            ledger: CodeLedger::new(code_store, config.clone()),
            guard: LockoutGuard::new(lockout_store, config.clone()),
            config,
        }
    }

    /// Request a new verification code for an (identity, purpose) pair.
    ///
    /// Refused while the identity is locked. On success the issued code is
    /// returned for the caller to hand to its delivery channel; delivery
    /// success or failure is invisible to this subsystem.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueResult)` - Issued code, or refusal with minutes remaining
    /// * `Err(DomainError)` - Storage failure
    pub async fn request_code(&self, identity: &str, purpose: Purpose) -> DomainResult<IssueResult> {
        if self.guard.is_locked(identity).await? {
            let minutes = self.guard.minutes_remaining(identity).await?;
            warn!(
                identity = %mask_identity(identity),
                purpose = %purpose,
                minutes_remaining = minutes,
                event = "request_refused_locked",
                "Refusing code request for locked identity"
            );
            return Ok(IssueResult::locked(minutes));
        }

        let code = self
            .ledger
            .issue(identity, purpose, self.config.code_ttl_minutes)
            .await?;

        Ok(IssueResult::issued(code))
    }

    /// Verify a candidate code for an (identity, purpose) pair.
    ///
    /// Sequencing:
    /// 1. Locked identities are refused before any ledger lookup, so a locked
    ///    account cannot probe whether a code is live or expired.
    /// 2. The ledger validates the candidate against the live code.
    /// 3. Success resets the guard; any failure records one against it.
    /// 4. If that failure just triggered the lock, the returned reason is
    ///    `ACCOUNT_LOCKED` rather than the stale ledger verdict, so the
    ///    caller sees the new state immediately.
    ///
    /// All failures are terminal per call; retrying is the caller's
    /// prerogative and exactly what the attempt counters bound.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyResult)` - Verdict for this attempt
    /// * `Err(DomainError)` - Storage failure; consumes no attempt credit
    pub async fn verify(
        &self,
        identity: &str,
        purpose: Purpose,
        candidate: &str,
    ) -> DomainResult<VerifyResult> {
        if self.guard.is_locked(identity).await? {
            let minutes = self.guard.minutes_remaining(identity).await?;
            warn!(
                identity = %mask_identity(identity),
                purpose = %purpose,
                minutes_remaining = minutes,
                event = "verify_refused_locked",
                "Refusing verification for locked identity"
            );
            return Ok(VerifyResult::locked(minutes));
        }

        match self.ledger.validate(identity, purpose, candidate).await? {
            ValidationOutcome::Accepted => {
                self.guard.record_success(identity).await?;
                info!(
                    identity = %mask_identity(identity),
                    purpose = %purpose,
                    event = "verification_success",
                    "Verification succeeded"
                );
                Ok(VerifyResult::verified())
            }
            ValidationOutcome::Rejected(reason) => {
                let record = self.guard.record_failure(identity).await?;
                if record.locked_now {
                    let minutes = self.guard.minutes_remaining(identity).await?;
                    Ok(VerifyResult::locked(minutes))
                } else {
                    Ok(VerifyResult::rejected(reason))
                }
            }
        }
    }

    /// Check whether an identity is currently locked
    pub async fn is_locked(&self, identity: &str) -> DomainResult<bool> {
        self.guard.is_locked(identity).await
    }

    /// Minutes until the identity's lock expires; 0 when not locked
    pub async fn minutes_remaining(&self, identity: &str) -> DomainResult<i64> {
        self.guard.minutes_remaining(identity).await
    }
}

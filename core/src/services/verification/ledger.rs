//! Code ledger: issuance, single-use consumption, and expiry of codes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::{DomainError, DomainResult, RejectReason};
use crate::repositories::code::CodeStore;

use super::config::VerificationConfig;
use super::types::ValidationOutcome;
use super::{mask_identity, CAS_RETRY_LIMIT};

/// Owns creation, validation, and expiry of verification codes per
/// (identity, purpose). Leaf component; knows nothing about account lockout.
pub struct CodeLedger<S: CodeStore> {
    /// Durable code store, shared across service instances
    store: Arc<S>,
    /// Workflow configuration
    config: VerificationConfig,
}

impl<S: CodeStore> CodeLedger<S> {
    /// Create a new ledger over the given store
    pub fn new(store: Arc<S>, config: VerificationConfig) -> Self {
        Self { store, config }
    }

    /// Issue a new code for an (identity, purpose) pair.
    ///
    /// Always inserts a fresh row. Prior unconsumed codes for the same pair
    /// are not touched; they simply stop being the most recent row and become
    /// unreachable through the live lookup used by `validate`.
    ///
    /// # Arguments
    ///
    /// * `identity` - The phone number or email address to scope the code to
    /// * `purpose` - The flow the code is issued for
    /// * `ttl_minutes` - Minutes until the code expires
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationCode)` - The issued code, for the caller's delivery channel
    /// * `Err(DomainError)` - Storage failure
    pub async fn issue(
        &self,
        identity: &str,
        purpose: Purpose,
        ttl_minutes: i64,
    ) -> DomainResult<VerificationCode> {
        let code = VerificationCode::new(identity, purpose, ttl_minutes);

        self.store.insert(&code).await?;

        info!(
            identity = %mask_identity(identity),
            purpose = %purpose,
            session_id = %code.id,
            ttl_minutes = ttl_minutes,
            event = "code_issued",
            "Issued verification code"
        );

        #[cfg(feature = "dev-code-echo")]
        tracing::debug!(
            identity = %mask_identity(identity),
            code = %code.code,
            event = "code_echo",
            "Issued code digits (dev-code-echo builds only)"
        );

        Ok(code)
    }

    /// Validate a candidate against the live code for an (identity, purpose)
    /// pair.
    ///
    /// The live row's own attempt budget is checked before any comparison:
    /// once exhausted, the row is dead even for the correct digits, so an
    /// attacker cannot burn a code's budget and keep probing the same row.
    ///
    /// Each mutation (attempt increment, consumption) is a conditional write;
    /// losing a race against a concurrent validator re-reads and re-decides.
    ///
    /// # Returns
    ///
    /// * `Ok(ValidationOutcome)` - Verdict for this attempt
    /// * `Err(DomainError)` - Storage failure or retry budget exhausted
    pub async fn validate(
        &self,
        identity: &str,
        purpose: Purpose,
        candidate: &str,
    ) -> DomainResult<ValidationOutcome> {
        for _ in 0..CAS_RETRY_LIMIT {
            let now = Utc::now();

            let live = match self.store.find_live(identity, purpose, now).await? {
                Some(live) => live,
                None => {
                    warn!(
                        identity = %mask_identity(identity),
                        purpose = %purpose,
                        event = "code_not_found_or_expired",
                        "No live verification code for validation"
                    );
                    return Ok(ValidationOutcome::Rejected(RejectReason::NotFoundOrExpired));
                }
            };

            if live.record.attempts >= self.config.max_code_attempts {
                warn!(
                    identity = %mask_identity(identity),
                    purpose = %purpose,
                    session_id = %live.record.id,
                    event = "code_attempts_exhausted",
                    "Live code's attempt budget exhausted"
                );
                return Ok(ValidationOutcome::Rejected(RejectReason::TooManyAttempts));
            }

            let mut row = live.record;

            if row.matches(candidate) {
                row.mark_consumed();
                if self.store.update_conditional(&row, live.version).await? {
                    info!(
                        identity = %mask_identity(identity),
                        purpose = %purpose,
                        session_id = %row.id,
                        event = "code_consumed",
                        "Verification code accepted and consumed"
                    );
                    return Ok(ValidationOutcome::Accepted);
                }
            } else {
                row.record_failed_attempt();
                if self.store.update_conditional(&row, live.version).await? {
                    warn!(
                        identity = %mask_identity(identity),
                        purpose = %purpose,
                        session_id = %row.id,
                        remaining_attempts = row.remaining_attempts(),
                        event = "code_mismatch",
                        "Verification code mismatch"
                    );
                    return Ok(ValidationOutcome::Rejected(RejectReason::CodeMismatch));
                }
            }
            // Lost the conditional write to a concurrent validator; re-read
        }

        Err(DomainError::Contention {
            resource: format!("verification_code:{}", mask_identity(identity)),
        })
    }

    /// Delete expired and consumed rows; delegated to by the sweep task
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        Ok(self.store.purge_expired(Utc::now()).await?)
    }
}

//! Lockout guard: account-wide brute-force throttling.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::entities::lockout::LockoutState;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::lockout::LockoutStore;

use super::config::VerificationConfig;
use super::{mask_identity, CAS_RETRY_LIMIT};

/// Outcome of recording one failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureRecord {
    /// Whether this failure triggered the lock
    pub locked_now: bool,
    /// Failed attempts after the increment
    pub failed_attempts: u32,
}

/// Owns the per-identity failed-attempt counter and the temporary lock
/// window, independent of which code was being guessed. Depends on nothing
/// but its store; invoked by the orchestrator around every validation.
pub struct LockoutGuard<S: LockoutStore> {
    /// Durable lockout store, shared across service instances
    store: Arc<S>,
    /// Workflow configuration
    config: VerificationConfig,
}

impl<S: LockoutStore> LockoutGuard<S> {
    /// Create a new guard over the given store
    pub fn new(store: Arc<S>, config: VerificationConfig) -> Self {
        Self { store, config }
    }

    /// Check whether an identity is currently locked.
    ///
    /// A `locked_until` in the past reads as unlocked without a write.
    pub async fn is_locked(&self, identity: &str) -> DomainResult<bool> {
        match self.store.get(identity).await? {
            Some(v) => Ok(v.record.is_locked(Utc::now())),
            None => Ok(false),
        }
    }

    /// Minutes until the lock expires, rounded up; 0 when not locked.
    ///
    /// Purely informational, for caller-side messaging.
    pub async fn minutes_remaining(&self, identity: &str) -> DomainResult<i64> {
        match self.store.get(identity).await? {
            Some(v) => Ok(v.record.minutes_remaining(Utc::now())),
            None => Ok(0),
        }
    }

    /// Record one failed attempt, locking the identity when the account-wide
    /// budget is exhausted. The state row is created lazily on the first
    /// failure.
    ///
    /// # Returns
    ///
    /// * `Ok(FailureRecord)` - Post-increment count and whether the lock fired
    /// * `Err(DomainError)` - Storage failure or retry budget exhausted
    pub async fn record_failure(&self, identity: &str) -> DomainResult<FailureRecord> {
        for _ in 0..CAS_RETRY_LIMIT {
            let now = Utc::now();

            match self.store.get(identity).await? {
                None => {
                    let mut state = LockoutState::new(identity);
                    let locked_now = state.record_failure(
                        now,
                        self.config.max_account_attempts,
                        self.config.lock_duration_minutes,
                    );
                    if self.store.insert_new(&state).await? {
                        warn!(
                            identity = %mask_identity(identity),
                            failed_attempts = state.failed_attempts,
                            event = "failed_attempt_recorded",
                            "Recorded first failed verification attempt"
                        );
                        return Ok(FailureRecord {
                            locked_now,
                            failed_attempts: state.failed_attempts,
                        });
                    }
                    // Another instance created the row first; re-read
                }
                Some(v) => {
                    let mut state = v.record;
                    let locked_now = state.record_failure(
                        now,
                        self.config.max_account_attempts,
                        self.config.lock_duration_minutes,
                    );
                    if self.store.update_conditional(&state, v.version).await? {
                        if locked_now {
                            warn!(
                                identity = %mask_identity(identity),
                                failed_attempts = state.failed_attempts,
                                lock_minutes = self.config.lock_duration_minutes,
                                event = "account_locked",
                                "Identity locked after repeated failed attempts"
                            );
                        } else {
                            warn!(
                                identity = %mask_identity(identity),
                                failed_attempts = state.failed_attempts,
                                max_attempts = self.config.max_account_attempts,
                                event = "failed_attempt_recorded",
                                "Recorded failed verification attempt"
                            );
                        }
                        return Ok(FailureRecord {
                            locked_now,
                            failed_attempts: state.failed_attempts,
                        });
                    }
                    // Concurrent failure won the write; re-read so no attempt
                    // is under-counted
                }
            }
        }

        Err(DomainError::Contention {
            resource: format!("lockout_state:{}", mask_identity(identity)),
        })
    }

    /// Reset the failure counter and clear any lock after a successful
    /// verification. Clears unconditionally even inside a lock window.
    pub async fn record_success(&self, identity: &str) -> DomainResult<()> {
        for _ in 0..CAS_RETRY_LIMIT {
            let now = Utc::now();

            match self.store.get(identity).await? {
                None => {
                    // Nothing to reset; still stamp the success
                    let mut state = LockoutState::new(identity);
                    state.record_success(now);
                    if self.store.insert_new(&state).await? {
                        return Ok(());
                    }
                }
                Some(v) => {
                    let mut state = v.record;
                    state.record_success(now);
                    if self.store.update_conditional(&state, v.version).await? {
                        info!(
                            identity = %mask_identity(identity),
                            event = "attempts_reset",
                            "Failure counter reset after successful verification"
                        );
                        return Ok(());
                    }
                }
            }
        }

        Err(DomainError::Contention {
            resource: format!("lockout_state:{}", mask_identity(identity)),
        })
    }
}

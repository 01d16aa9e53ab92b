//! Per-identity lockout state for brute-force throttling.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Account-wide failed attempts before the identity is locked
pub const MAX_ACCOUNT_ATTEMPTS: u32 = 5;

/// How long a lock lasts once triggered (30 minutes)
pub const LOCK_DURATION_MINUTES: i64 = 30;

/// Account-wide lockout state, one row per identity, independent of purpose.
///
/// Created lazily on the first failed attempt and kept indefinitely; a
/// `locked_until` in the past means "not locked" without requiring a write
/// to clear it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutState {
    /// Phone number or email address this state belongs to
    pub identity: String,

    /// Failed attempts since the last successful verification
    pub failed_attempts: u32,

    /// When set and in the future, the identity is locked
    pub locked_until: Option<DateTime<Utc>>,

    /// Timestamp of the last successful verification
    pub last_success_at: Option<DateTime<Utc>>,
}

impl LockoutState {
    /// Creates a fresh state with no recorded failures
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            failed_attempts: 0,
            locked_until: None,
            last_success_at: None,
        }
    }

    /// Checks whether the identity is locked as of `now`
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        matches!(self.locked_until, Some(until) if until > now)
    }

    /// Minutes until the lock expires, rounded up; 0 when not locked.
    ///
    /// Rounds from milliseconds so a lock with any time left reports at
    /// least 1 minute, consistent with `is_locked`.
    pub fn minutes_remaining(&self, now: DateTime<Utc>) -> i64 {
        match self.locked_until {
            Some(until) if until > now => {
                let millis = (until - now).num_milliseconds();
                (millis + 59_999) / 60_000
            }
            _ => 0,
        }
    }

    /// Records one failed attempt as of `now`.
    ///
    /// If the post-increment count reaches `max_attempts` the lock window is
    /// (re)armed for `lock_minutes`. This is the only path that sets
    /// `locked_until`.
    ///
    /// # Returns
    ///
    /// `true` if this failure triggered the lock
    pub fn record_failure(
        &mut self,
        now: DateTime<Utc>,
        max_attempts: u32,
        lock_minutes: i64,
    ) -> bool {
        self.failed_attempts += 1;
        if self.failed_attempts >= max_attempts {
            self.locked_until = Some(now + Duration::minutes(lock_minutes));
            true
        } else {
            false
        }
    }

    /// Clears all failure state after a successful verification.
    ///
    /// Also clears an active lock unconditionally: a correct caller never
    /// reaches this while locked, but if one does the lock must still fall.
    pub fn record_success(&mut self, now: DateTime<Utc>) {
        self.failed_attempts = 0;
        self.locked_until = None;
        self.last_success_at = Some(now);
    }
}

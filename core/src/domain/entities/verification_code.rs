//! Verification code entity for phone/email sign-in and PIN recovery.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::purpose::Purpose;

/// Maximum number of failed comparisons against a single code row
pub const MAX_CODE_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 10;

/// A single-use, time-boxed verification code scoped to an (identity, purpose) pair.
///
/// Multiple rows may exist for the same pair; only the most recently created
/// unconsumed, unexpired row is "live" and reachable for validation. Older
/// rows simply stop matching the live lookup and are garbage collected by the
/// periodic sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for this code row
    pub id: Uuid,

    /// Phone number or email address the code is scoped to
    pub identity: String,

    /// Flow the code was issued for
    pub purpose: Purpose,

    /// The 6-digit code, leading zeros preserved
    pub code: String,

    /// Number of failed comparison attempts against this row
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub consumed: bool,
}

impl VerificationCode {
    /// Creates a new verification code with a random 6-digit code
    ///
    /// # Arguments
    ///
    /// * `identity` - The phone number or email address to scope the code to
    /// * `purpose` - The flow the code is issued for
    /// * `ttl_minutes` - Number of minutes until the code expires
    pub fn new(identity: impl Into<String>, purpose: Purpose, ttl_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            identity: identity.into(),
            purpose,
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
            consumed: false,
        }
    }

    /// Generates a uniformly random 6-digit code using the OS CSPRNG
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Modulo bias over a 4-byte draw is negligible for a 6-digit code
        format!("{:06}", num % 1_000_000)
    }

    /// Checks whether the code has expired as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks whether this row is live as of `now`: unconsumed and unexpired.
    ///
    /// Liveness does not consider the attempt budget; an attempt-exhausted row
    /// is still the live row for its pair and reports `TOO_MANY_ATTEMPTS`
    /// rather than falling back to an older code.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.consumed && !self.is_expired(now)
    }

    /// Checks whether this row's own attempt budget is exhausted
    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= MAX_CODE_ATTEMPTS
    }

    /// Compares the candidate against the stored code.
    ///
    /// Exact string equality; leading zeros matter.
    pub fn matches(&self, candidate: &str) -> bool {
        self.code == candidate
    }

    /// Records one failed comparison against this row
    pub fn record_failed_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Marks the code as consumed after a successful validation
    pub fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    /// Gets the number of remaining comparison attempts (0 if exhausted)
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_CODE_ATTEMPTS - self.attempts).max(0)
    }
}

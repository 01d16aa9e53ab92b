//! Configuration for the verification workflow

use crate::domain::entities::lockout::{LOCK_DURATION_MINUTES, MAX_ACCOUNT_ATTEMPTS};
use crate::domain::entities::verification_code::{DEFAULT_CODE_TTL_MINUTES, MAX_CODE_ATTEMPTS};

/// Configuration for the verification workflow.
///
/// Fixed at construction time and immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Minutes before a newly issued code expires
    pub code_ttl_minutes: i64,
    /// Failed comparisons allowed against a single code row
    pub max_code_attempts: i32,
    /// Account-wide failed attempts before the identity is locked
    pub max_account_attempts: u32,
    /// Minutes an identity stays locked once triggered
    pub lock_duration_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            max_code_attempts: MAX_CODE_ATTEMPTS,
            max_account_attempts: MAX_ACCOUNT_ATTEMPTS,
            lock_duration_minutes: LOCK_DURATION_MINUTES,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            code_ttl_minutes: std::env::var("VC_CODE_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_ttl_minutes),
            max_code_attempts: std::env::var("VC_MAX_CODE_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_code_attempts),
            max_account_attempts: std::env::var("VC_MAX_ACCOUNT_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_account_attempts),
            lock_duration_minutes: std::env::var("VC_LOCK_DURATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.lock_duration_minutes),
        }
    }
}

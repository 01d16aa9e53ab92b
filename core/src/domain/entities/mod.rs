//! Domain entities representing core verification objects.

pub mod lockout;
pub mod purpose;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use lockout::{LockoutState, LOCK_DURATION_MINUTES, MAX_ACCOUNT_ATTEMPTS};
pub use purpose::Purpose;
pub use verification_code::{
    VerificationCode, CODE_LENGTH, DEFAULT_CODE_TTL_MINUTES, MAX_CODE_ATTEMPTS,
};

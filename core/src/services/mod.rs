//! Business services containing the verification workflow.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    CodeLedger, CodeSweepService, FailureRecord, IssueResult, LockoutGuard, SweepConfig,
    ValidationOutcome, VerificationConfig, VerificationService, VerifyResult,
};

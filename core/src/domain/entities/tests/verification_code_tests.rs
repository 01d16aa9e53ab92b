//! Unit tests for the VerificationCode entity

use chrono::{Duration, Utc};

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::verification_code::{
    VerificationCode, CODE_LENGTH, DEFAULT_CODE_TTL_MINUTES, MAX_CODE_ATTEMPTS,
};

#[test]
fn test_new_verification_code() {
    let code = VerificationCode::new("+15551234567", Purpose::Signup, DEFAULT_CODE_TTL_MINUTES);

    assert_eq!(code.identity, "+15551234567");
    assert_eq!(code.purpose, Purpose::Signup);
    assert_eq!(code.code.len(), CODE_LENGTH);
    assert_eq!(code.attempts, 0);
    assert!(!code.consumed);
    assert!(code.is_live(Utc::now()));
    assert_eq!(
        code.expires_at,
        code.created_at + Duration::minutes(DEFAULT_CODE_TTL_MINUTES)
    );
}

#[test]
fn test_generate_code_format() {
    for _ in 0..100 {
        let code = VerificationCode::generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let num: u32 = code.parse().expect("Generated code should be numeric");
        assert!(num < 1_000_000);
    }
}

#[test]
fn test_code_uniqueness() {
    let codes: Vec<String> = (0..100).map(|_| VerificationCode::generate_code()).collect();

    // Extremely unlikely to collapse to a single value
    let unique = codes.iter().collect::<std::collections::HashSet<_>>().len();
    assert!(unique > 1);
}

#[test]
fn test_expiry_boundary() {
    let code = VerificationCode::new("+15551234567", Purpose::Signup, 10);

    // Exactly at expires_at the code is still acceptable
    assert!(!code.is_expired(code.expires_at));
    assert!(code.is_live(code.expires_at));

    // One second past the TTL it is dead
    let late = code.expires_at + Duration::seconds(1);
    assert!(code.is_expired(late));
    assert!(!code.is_live(late));
}

#[test]
fn test_consumed_code_is_not_live() {
    let mut code = VerificationCode::new("+15551234567", Purpose::Recovery, 10);
    code.mark_consumed();

    assert!(!code.is_live(Utc::now()));
}

#[test]
fn test_matches_is_exact() {
    let mut code = VerificationCode::new("+15551234567", Purpose::Signup, 10);
    code.code = "012345".to_string();

    assert!(code.matches("012345"));
    // Leading zeros matter; numeric equivalence is not enough
    assert!(!code.matches("12345"));
    assert!(!code.matches("0123456"));
}

#[test]
fn test_attempt_budget() {
    let mut code = VerificationCode::new("+15551234567", Purpose::Signup, 10);

    assert_eq!(code.remaining_attempts(), MAX_CODE_ATTEMPTS);
    assert!(!code.attempts_exhausted());

    for i in 1..=MAX_CODE_ATTEMPTS {
        code.record_failed_attempt();
        assert_eq!(code.attempts, i);
    }

    assert!(code.attempts_exhausted());
    assert_eq!(code.remaining_attempts(), 0);
    // Exhausted rows are still live; they report their own verdict
    assert!(code.is_live(Utc::now()));
}

#[test]
fn test_serialization_round_trip() {
    let code = VerificationCode::new("user@example.com", Purpose::EmailVerify, 10);

    let json = serde_json::to_string(&code).unwrap();
    let deserialized: VerificationCode = serde_json::from_str(&json).unwrap();

    assert_eq!(code, deserialized);
    assert!(json.contains("email_verify"));
}

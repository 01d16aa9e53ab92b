//! Unit tests for the LockoutState entity

use chrono::{Duration, Utc};

use crate::domain::entities::lockout::{
    LockoutState, LOCK_DURATION_MINUTES, MAX_ACCOUNT_ATTEMPTS,
};

#[test]
fn test_new_state_is_unlocked() {
    let state = LockoutState::new("+15551234567");

    assert_eq!(state.failed_attempts, 0);
    assert!(state.locked_until.is_none());
    assert!(!state.is_locked(Utc::now()));
    assert_eq!(state.minutes_remaining(Utc::now()), 0);
}

#[test]
fn test_lock_triggers_on_fifth_failure() {
    let mut state = LockoutState::new("+15551234567");
    let now = Utc::now();

    for i in 1..MAX_ACCOUNT_ATTEMPTS {
        let locked = state.record_failure(now, MAX_ACCOUNT_ATTEMPTS, LOCK_DURATION_MINUTES);
        assert!(!locked, "failure #{} must not lock", i);
        assert!(!state.is_locked(now));
    }

    let locked = state.record_failure(now, MAX_ACCOUNT_ATTEMPTS, LOCK_DURATION_MINUTES);
    assert!(locked);
    assert!(state.is_locked(now));
    assert_eq!(
        state.locked_until,
        Some(now + Duration::minutes(LOCK_DURATION_MINUTES))
    );
}

#[test]
fn test_expired_lock_reads_as_unlocked() {
    let mut state = LockoutState::new("+15551234567");
    let now = Utc::now();

    // A locked_until in the past must count as unlocked without any write
    state.failed_attempts = MAX_ACCOUNT_ATTEMPTS;
    state.locked_until = Some(now - Duration::seconds(1));

    assert!(!state.is_locked(now));
    assert_eq!(state.minutes_remaining(now), 0);
}

#[test]
fn test_minutes_remaining_rounds_up() {
    let mut state = LockoutState::new("+15551234567");
    let now = Utc::now();

    state.locked_until = Some(now + Duration::seconds(61));
    assert_eq!(state.minutes_remaining(now), 2);

    state.locked_until = Some(now + Duration::seconds(60));
    assert_eq!(state.minutes_remaining(now), 1);

    state.locked_until = Some(now + Duration::minutes(LOCK_DURATION_MINUTES));
    assert_eq!(state.minutes_remaining(now), LOCK_DURATION_MINUTES);
}

#[test]
fn test_sub_second_lock_still_reports_a_minute() {
    let mut state = LockoutState::new("+15551234567");
    let now = Utc::now();

    // A lock with under a second left is still a lock; it must never report
    // 0 minutes while is_locked is true
    state.locked_until = Some(now + Duration::milliseconds(500));
    assert!(state.is_locked(now));
    assert_eq!(state.minutes_remaining(now), 1);
}

#[test]
fn test_success_clears_everything() {
    let mut state = LockoutState::new("+15551234567");
    let now = Utc::now();

    for _ in 0..MAX_ACCOUNT_ATTEMPTS {
        state.record_failure(now, MAX_ACCOUNT_ATTEMPTS, LOCK_DURATION_MINUTES);
    }
    assert!(state.is_locked(now));

    // Defensive idempotence: success clears the lock even mid-window
    state.record_success(now);

    assert_eq!(state.failed_attempts, 0);
    assert!(state.locked_until.is_none());
    assert_eq!(state.last_success_at, Some(now));
    assert!(!state.is_locked(now));
}

#[test]
fn test_failure_after_success_counts_from_one() {
    let mut state = LockoutState::new("+15551234567");
    let now = Utc::now();

    for _ in 0..4 {
        state.record_failure(now, MAX_ACCOUNT_ATTEMPTS, LOCK_DURATION_MINUTES);
    }
    state.record_success(now);

    let locked = state.record_failure(now, MAX_ACCOUNT_ATTEMPTS, LOCK_DURATION_MINUTES);
    assert!(!locked);
    assert_eq!(state.failed_attempts, 1);
}

#[test]
fn test_failure_after_lock_expiry_relocks() {
    let mut state = LockoutState::new("+15551234567");
    let now = Utc::now();

    for _ in 0..MAX_ACCOUNT_ATTEMPTS {
        state.record_failure(now, MAX_ACCOUNT_ATTEMPTS, LOCK_DURATION_MINUTES);
    }

    // Let the window lapse without a success
    let later = now + Duration::minutes(LOCK_DURATION_MINUTES) + Duration::seconds(1);
    assert!(!state.is_locked(later));

    // The counter never reset, so one more failure re-arms the lock
    let locked = state.record_failure(later, MAX_ACCOUNT_ATTEMPTS, LOCK_DURATION_MINUTES);
    assert!(locked);
    assert!(state.is_locked(later));
}

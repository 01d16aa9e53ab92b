//! Unit tests for the in-memory code store

use chrono::{Duration, Utc};

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::verification_code::VerificationCode;
use crate::repositories::code::{CodeStore, MemoryCodeStore};

#[tokio::test]
async fn test_insert_and_find_live() {
    let store = MemoryCodeStore::new();
    let code = VerificationCode::new("+15551234567", Purpose::Signup, 10);

    store.insert(&code).await.unwrap();

    let found = store
        .find_live("+15551234567", Purpose::Signup, Utc::now())
        .await
        .unwrap()
        .expect("code should be live");

    assert_eq!(found.record.id, code.id);
    assert_eq!(found.version, 1);
}

#[tokio::test]
async fn test_find_live_is_purpose_scoped() {
    let store = MemoryCodeStore::new();
    let code = VerificationCode::new("+15551234567", Purpose::Signup, 10);
    store.insert(&code).await.unwrap();

    let found = store
        .find_live("+15551234567", Purpose::Recovery, Utc::now())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_most_recent_code_wins() {
    let store = MemoryCodeStore::new();
    let older = VerificationCode::new("+15551234567", Purpose::Signup, 10);
    let mut newer = VerificationCode::new("+15551234567", Purpose::Signup, 10);
    // Force a strictly later creation time
    newer.created_at = older.created_at + Duration::seconds(1);
    newer.expires_at = newer.created_at + Duration::minutes(10);

    store.insert(&older).await.unwrap();
    store.insert(&newer).await.unwrap();

    let found = store
        .find_live("+15551234567", Purpose::Signup, Utc::now())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.record.id, newer.id);
}

#[tokio::test]
async fn test_expired_and_consumed_rows_are_not_live() {
    let store = MemoryCodeStore::new();
    let now = Utc::now();

    let mut expired = VerificationCode::new("+15551234567", Purpose::Signup, 10);
    expired.expires_at = now - Duration::seconds(1);
    store.insert(&expired).await.unwrap();

    let mut consumed = VerificationCode::new("+15550000000", Purpose::Signup, 10);
    consumed.consumed = true;
    store.insert(&consumed).await.unwrap();

    assert!(store
        .find_live("+15551234567", Purpose::Signup, now)
        .await
        .unwrap()
        .is_none());
    assert!(store
        .find_live("+15550000000", Purpose::Signup, now)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_conditional_update_refuses_stale_version() {
    let store = MemoryCodeStore::new();
    let code = VerificationCode::new("+15551234567", Purpose::Signup, 10);
    store.insert(&code).await.unwrap();

    let read = store
        .find_live("+15551234567", Purpose::Signup, Utc::now())
        .await
        .unwrap()
        .unwrap();

    let mut first = read.record.clone();
    first.record_failed_attempt();
    assert!(store.update_conditional(&first, read.version).await.unwrap());

    // Second writer raced on the same read; its version tag is now stale
    let mut second = read.record.clone();
    second.record_failed_attempt();
    assert!(!store.update_conditional(&second, read.version).await.unwrap());

    let after = store
        .find_live("+15551234567", Purpose::Signup, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.record.attempts, 1);
    assert_eq!(after.version, 2);
}

#[tokio::test]
async fn test_purge_expired_removes_dead_rows() {
    let store = MemoryCodeStore::new();
    let now = Utc::now();

    let live = VerificationCode::new("+15551234567", Purpose::Signup, 10);
    let mut expired = VerificationCode::new("+15550000000", Purpose::Signup, 10);
    expired.expires_at = now - Duration::seconds(1);
    let mut consumed = VerificationCode::new("+15559999999", Purpose::Recovery, 10);
    consumed.consumed = true;

    store.insert(&live).await.unwrap();
    store.insert(&expired).await.unwrap();
    store.insert(&consumed).await.unwrap();

    let purged = store.purge_expired(now).await.unwrap();
    assert_eq!(purged, 2);
    assert_eq!(store.row_count().await, 1);
}

//! Unit tests for the code sweep

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::verification_code::VerificationCode;
use crate::repositories::code::{CodeStore, MemoryCodeStore};
use crate::services::verification::{CodeSweepService, SweepConfig};

#[tokio::test]
async fn test_sweep_removes_only_dead_rows() {
    let store = Arc::new(MemoryCodeStore::new());

    let live = VerificationCode::new("+15551234567", Purpose::Signup, 10);
    let mut expired = VerificationCode::new("+15550000000", Purpose::Signup, 10);
    expired.expires_at = Utc::now() - Duration::seconds(1);
    let mut consumed = VerificationCode::new("+15559999999", Purpose::Recovery, 10);
    consumed.consumed = true;

    store.insert(&live).await.unwrap();
    store.insert(&expired).await.unwrap();
    store.insert(&consumed).await.unwrap();

    let sweep = CodeSweepService::new(store.clone(), SweepConfig::default());
    assert_eq!(sweep.run_sweep().await.unwrap(), 2);

    // The live row survives and stays reachable
    assert!(store
        .find_live("+15551234567", Purpose::Signup, Utc::now())
        .await
        .unwrap()
        .is_some());
    assert_eq!(store.row_count().await, 1);
}

#[tokio::test]
async fn test_sweep_on_empty_store() {
    let store = Arc::new(MemoryCodeStore::new());
    let sweep = CodeSweepService::new(store, SweepConfig::default());

    assert_eq!(sweep.run_sweep().await.unwrap(), 0);
}

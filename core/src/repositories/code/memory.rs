//! In-memory implementation of CodeStore.
//!
//! For tests and single-process development only. A per-process map cannot
//! share attempt state between horizontally scaled service instances; the
//! `vc_infra` MySQL store is the production implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::StoreError;
use crate::repositories::Versioned;

use super::r#trait::CodeStore;

struct StoredRow {
    record: VerificationCode,
    version: u64,
    /// Insertion sequence, tie-breaker when two rows share a created_at
    seq: u64,
}

/// In-memory code store backed by a HashMap
pub struct MemoryCodeStore {
    rows: RwLock<HashMap<Uuid, StoredRow>>,
    next_seq: AtomicU64,
}

impl MemoryCodeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Number of rows currently held (including dead ones awaiting the sweep)
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

impl Default for MemoryCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn insert(&self, code: &VerificationCode) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        rows.insert(
            code.id,
            StoredRow {
                record: code.clone(),
                version: 1,
                seq,
            },
        );
        Ok(())
    }

    async fn find_live(
        &self,
        identity: &str,
        purpose: Purpose,
        now: DateTime<Utc>,
    ) -> Result<Option<Versioned<VerificationCode>>, StoreError> {
        let rows = self.rows.read().await;
        let live = rows
            .values()
            .filter(|row| {
                row.record.identity == identity
                    && row.record.purpose == purpose
                    && row.record.is_live(now)
            })
            .max_by_key(|row| (row.record.created_at, row.seq));

        Ok(live.map(|row| Versioned {
            record: row.record.clone(),
            version: row.version,
        }))
    }

    async fn update_conditional(
        &self,
        code: &VerificationCode,
        expected_version: u64,
    ) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&code.id) {
            Some(row) if row.version == expected_version => {
                row.record = code.clone();
                row.version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, row| row.record.is_live(now));
        Ok((before - rows.len()) as u64)
    }
}

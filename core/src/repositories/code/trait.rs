//! Code store trait defining the persistence interface for verification codes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::StoreError;
use crate::repositories::Versioned;

/// Store trait for VerificationCode persistence.
///
/// Implementations must make `update_conditional` atomic against concurrent
/// writers: two racing updates carrying the same expected version must not
/// both succeed. Issuance always inserts a new row; superseded rows are left
/// behind and become unreachable through `find_live`.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Persist a freshly issued code row
    ///
    /// # Returns
    /// * `Ok(())` - Row stored
    /// * `Err(StoreError)` - Storage failure
    async fn insert(&self, code: &VerificationCode) -> Result<(), StoreError>;

    /// Find the live code for an (identity, purpose) pair as of `now`.
    ///
    /// The live code is the most recently created row that is unconsumed and
    /// unexpired. Older unconsumed rows for the same pair must never be
    /// returned, regardless of insertion order in the backing store.
    ///
    /// # Returns
    /// * `Ok(Some(Versioned<VerificationCode>))` - Live row and its version
    /// * `Ok(None)` - No live code for the pair
    /// * `Err(StoreError)` - Storage failure
    async fn find_live(
        &self,
        identity: &str,
        purpose: Purpose,
        now: DateTime<Utc>,
    ) -> Result<Option<Versioned<VerificationCode>>, StoreError>;

    /// Write back a mutated row if its stored version still matches.
    ///
    /// # Arguments
    /// * `code` - The mutated row (matched by `code.id`)
    /// * `expected_version` - Version observed when the row was read
    ///
    /// # Returns
    /// * `Ok(true)` - Update applied, stored version advanced
    /// * `Ok(false)` - Version mismatch or row gone; caller should re-read
    /// * `Err(StoreError)` - Storage failure
    async fn update_conditional(
        &self,
        code: &VerificationCode,
        expected_version: u64,
    ) -> Result<bool, StoreError>;

    /// Delete expired and consumed rows.
    ///
    /// Called by the periodic sweep; never required for correctness, only
    /// for storage growth.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of rows deleted
    /// * `Err(StoreError)` - Storage failure
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}

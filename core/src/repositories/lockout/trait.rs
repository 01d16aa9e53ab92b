//! Lockout store trait defining the persistence interface for lockout state.

use async_trait::async_trait;

use crate::domain::entities::lockout::LockoutState;
use crate::errors::StoreError;
use crate::repositories::Versioned;

/// Store trait for LockoutState persistence, one record per identity.
///
/// `insert_new` and `update_conditional` together give the guard an atomic
/// read-modify-write: two concurrent failures reading the same counter can
/// never both write it back, so no failed attempt is ever under-counted.
#[async_trait]
pub trait LockoutStore: Send + Sync {
    /// Fetch the lockout state for an identity
    ///
    /// # Returns
    /// * `Ok(Some(Versioned<LockoutState>))` - State and its version
    /// * `Ok(None)` - No state recorded yet for this identity
    /// * `Err(StoreError)` - Storage failure
    async fn get(&self, identity: &str) -> Result<Option<Versioned<LockoutState>>, StoreError>;

    /// Insert a brand-new state if none exists for the identity.
    ///
    /// # Returns
    /// * `Ok(true)` - Inserted
    /// * `Ok(false)` - A record already exists; caller should re-read
    /// * `Err(StoreError)` - Storage failure
    async fn insert_new(&self, state: &LockoutState) -> Result<bool, StoreError>;

    /// Write back a mutated state if its stored version still matches.
    ///
    /// # Returns
    /// * `Ok(true)` - Update applied, stored version advanced
    /// * `Ok(false)` - Version mismatch; caller should re-read
    /// * `Err(StoreError)` - Storage failure
    async fn update_conditional(
        &self,
        state: &LockoutState,
        expected_version: u64,
    ) -> Result<bool, StoreError>;
}

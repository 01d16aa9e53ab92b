//! In-memory implementation of LockoutStore.
//!
//! For tests and single-process development only; production deployments
//! must share lockout state through a durable store (`vc_infra`).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::lockout::LockoutState;
use crate::errors::StoreError;
use crate::repositories::Versioned;

use super::r#trait::LockoutStore;

/// In-memory lockout store backed by a HashMap
pub struct MemoryLockoutStore {
    states: RwLock<HashMap<String, (LockoutState, u64)>>,
}

impl MemoryLockoutStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryLockoutStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LockoutStore for MemoryLockoutStore {
    async fn get(&self, identity: &str) -> Result<Option<Versioned<LockoutState>>, StoreError> {
        let states = self.states.read().await;
        Ok(states.get(identity).map(|(state, version)| Versioned {
            record: state.clone(),
            version: *version,
        }))
    }

    async fn insert_new(&self, state: &LockoutState) -> Result<bool, StoreError> {
        let mut states = self.states.write().await;
        if states.contains_key(&state.identity) {
            return Ok(false);
        }
        states.insert(state.identity.clone(), (state.clone(), 1));
        Ok(true)
    }

    async fn update_conditional(
        &self,
        state: &LockoutState,
        expected_version: u64,
    ) -> Result<bool, StoreError> {
        let mut states = self.states.write().await;
        match states.get_mut(&state.identity) {
            Some((stored, version)) if *version == expected_version => {
                *stored = state.clone();
                *version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

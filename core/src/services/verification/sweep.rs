//! Periodic sweep deleting expired and consumed code rows.
//!
//! The sweep holds no lock with the hot path and its absence or delay never
//! affects correctness, only storage growth: dead rows are already
//! unreachable through the live lookup.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::code::CodeStore;

/// Configuration for the code sweep task
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether the background task runs at all
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 900, // every 15 minutes
            enabled: true,
        }
    }
}

/// Background service deleting dead verification code rows
pub struct CodeSweepService<S: CodeStore + 'static> {
    store: Arc<S>,
    config: SweepConfig,
}

impl<S: CodeStore> CodeSweepService<S> {
    /// Create a new sweep service over the given store
    pub fn new(store: Arc<S>, config: SweepConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    /// * `Ok(count)` - Number of rows deleted
    /// * `Err(DomainError)` - Storage failure
    pub async fn run_sweep(&self) -> DomainResult<u64> {
        let deleted = self.store.purge_expired(Utc::now()).await?;

        if deleted > 0 {
            info!(
                deleted = deleted,
                event = "code_sweep",
                "Swept dead verification code rows"
            );
        }

        Ok(deleted)
    }

    /// Start the sweep as a background task.
    ///
    /// Spawns a tokio task that runs a sweep cycle at the configured
    /// interval. Failures are logged and the task keeps running.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Code sweep task is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Code sweep task started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep().await {
                    error!(error = %e, "Code sweep cycle failed");
                }
            }
        });
    }
}

//! MySQL implementation of the LockoutStore trait.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE lockout_states (
//!     identity        VARCHAR(255)    PRIMARY KEY,
//!     failed_attempts INT UNSIGNED    NOT NULL DEFAULT 0,
//!     locked_until    DATETIME(6)     NULL,
//!     last_success_at DATETIME(6)     NULL,
//!     version         BIGINT UNSIGNED NOT NULL DEFAULT 1
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use vc_core::domain::entities::lockout::LockoutState;
use vc_core::errors::StoreError;
use vc_core::repositories::lockout::LockoutStore;
use vc_core::repositories::Versioned;

use super::map_store_error;

/// MySQL implementation of LockoutStore
pub struct MySqlLockoutStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlLockoutStore {
    /// Create a new MySQL lockout store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a LockoutState entity plus its version
    fn row_to_state(row: &sqlx::mysql::MySqlRow) -> Result<Versioned<LockoutState>, StoreError> {
        let record = LockoutState {
            identity: row.try_get("identity").map_err(map_store_error)?,
            failed_attempts: row.try_get("failed_attempts").map_err(map_store_error)?,
            locked_until: row
                .try_get::<Option<DateTime<Utc>>, _>("locked_until")
                .map_err(map_store_error)?,
            last_success_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_success_at")
                .map_err(map_store_error)?,
        };
        let version: u64 = row.try_get("version").map_err(map_store_error)?;

        Ok(Versioned { record, version })
    }
}

#[async_trait]
impl LockoutStore for MySqlLockoutStore {
    async fn get(&self, identity: &str) -> Result<Option<Versioned<LockoutState>>, StoreError> {
        let query = r#"
            SELECT identity, failed_attempts, locked_until, last_success_at, version
            FROM lockout_states
            WHERE identity = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(identity)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_store_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_state(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert_new(&self, state: &LockoutState) -> Result<bool, StoreError> {
        let query = r#"
            INSERT INTO lockout_states (
                identity, failed_attempts, locked_until, last_success_at, version
            ) VALUES (?, ?, ?, ?, 1)
        "#;

        let result = sqlx::query(query)
            .bind(&state.identity)
            .bind(state.failed_attempts)
            .bind(state.locked_until)
            .bind(state.last_success_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            // A concurrent writer created the row first; the caller re-reads
            Err(sqlx::Error::Database(db))
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Ok(false)
            }
            Err(e) => Err(map_store_error(e)),
        }
    }

    async fn update_conditional(
        &self,
        state: &LockoutState,
        expected_version: u64,
    ) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE lockout_states
            SET failed_attempts = ?, locked_until = ?, last_success_at = ?,
                version = version + 1
            WHERE identity = ? AND version = ?
        "#;

        let result = sqlx::query(query)
            .bind(state.failed_attempts)
            .bind(state.locked_until)
            .bind(state.last_success_at)
            .bind(&state.identity)
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(result.rows_affected() == 1)
    }
}

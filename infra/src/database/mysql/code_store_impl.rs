//! MySQL implementation of the CodeStore trait.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE verification_codes (
//!     id          CHAR(36)        PRIMARY KEY,
//!     identity    VARCHAR(255)    NOT NULL,
//!     purpose     VARCHAR(32)     NOT NULL,
//!     code        CHAR(6)         NOT NULL,
//!     attempts    INT             NOT NULL DEFAULT 0,
//!     created_at  DATETIME(6)     NOT NULL,
//!     expires_at  DATETIME(6)     NOT NULL,
//!     consumed    BOOLEAN         NOT NULL DEFAULT FALSE,
//!     version     BIGINT UNSIGNED NOT NULL DEFAULT 1,
//!     INDEX idx_live_lookup (identity, purpose, consumed, expires_at, created_at)
//! );
//! ```

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use vc_core::domain::entities::purpose::Purpose;
use vc_core::domain::entities::verification_code::VerificationCode;
use vc_core::errors::StoreError;
use vc_core::repositories::code::CodeStore;
use vc_core::repositories::Versioned;

use super::map_store_error;

/// MySQL implementation of CodeStore
pub struct MySqlCodeStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCodeStore {
    /// Create a new MySQL code store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a VerificationCode entity plus its version
    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<Versioned<VerificationCode>, StoreError> {
        let id: String = row.try_get("id").map_err(map_store_error)?;
        let id = Uuid::parse_str(&id).map_err(|e| StoreError::Corrupt {
            message: format!("Invalid code row UUID: {}", e),
        })?;

        let purpose: String = row.try_get("purpose").map_err(map_store_error)?;
        let purpose = Purpose::from_str(&purpose).map_err(|e| StoreError::Corrupt {
            message: format!("Invalid purpose column: {}", e),
        })?;

        let record = VerificationCode {
            id,
            identity: row.try_get("identity").map_err(map_store_error)?,
            purpose,
            code: row.try_get("code").map_err(map_store_error)?,
            attempts: row.try_get("attempts").map_err(map_store_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(map_store_error)?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(map_store_error)?,
            consumed: row.try_get("consumed").map_err(map_store_error)?,
        };
        let version: u64 = row.try_get("version").map_err(map_store_error)?;

        Ok(Versioned { record, version })
    }
}

#[async_trait]
impl CodeStore for MySqlCodeStore {
    async fn insert(&self, code: &VerificationCode) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO verification_codes (
                id, identity, purpose, code, attempts, created_at, expires_at, consumed, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1)
        "#;

        sqlx::query(query)
            .bind(code.id.to_string())
            .bind(&code.identity)
            .bind(code.purpose.as_str())
            .bind(&code.code)
            .bind(code.attempts)
            .bind(code.created_at)
            .bind(code.expires_at)
            .bind(code.consumed)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(())
    }

    async fn find_live(
        &self,
        identity: &str,
        purpose: Purpose,
        now: DateTime<Utc>,
    ) -> Result<Option<Versioned<VerificationCode>>, StoreError> {
        // Most recent row wins; id breaks creation-time ties deterministically
        let query = r#"
            SELECT id, identity, purpose, code, attempts, created_at, expires_at, consumed, version
            FROM verification_codes
            WHERE identity = ? AND purpose = ? AND consumed = FALSE AND expires_at >= ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(identity)
            .bind(purpose.as_str())
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_store_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_code(&row)?)),
            None => Ok(None),
        }
    }

    async fn update_conditional(
        &self,
        code: &VerificationCode,
        expected_version: u64,
    ) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE verification_codes
            SET code = ?, attempts = ?, created_at = ?, expires_at = ?, consumed = ?,
                version = version + 1
            WHERE id = ? AND version = ?
        "#;

        let result = sqlx::query(query)
            .bind(&code.code)
            .bind(code.attempts)
            .bind(code.created_at)
            .bind(code.expires_at)
            .bind(code.consumed)
            .bind(code.id.to_string())
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let query = r#"
            DELETE FROM verification_codes
            WHERE consumed = TRUE OR expires_at < ?
        "#;

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(result.rows_affected())
    }
}

//! MySQL store implementations
//!
//! Concrete implementations of the `vc_core` store traits over SQLx. Both
//! stores use a `version` column for conditional writes: every successful
//! `UPDATE` carries `WHERE version = ?` and bumps the column, so a writer
//! holding a stale read can never clobber a concurrent update.

mod code_store_impl;
mod lockout_store_impl;

pub use code_store_impl::MySqlCodeStore;
pub use lockout_store_impl::MySqlLockoutStore;

use vc_core::errors::StoreError;

/// Map a SQLx error onto the store error taxonomy.
///
/// Pool exhaustion surfaces as `Timeout`, decode problems as `Corrupt`, and
/// everything else as `Unavailable`.
pub(crate) fn map_store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout,
        e @ (sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)) => StoreError::Corrupt {
            message: e.to_string(),
        },
        e => StoreError::Unavailable {
            message: e.to_string(),
        },
    }
}

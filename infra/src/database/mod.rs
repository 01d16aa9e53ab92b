//! Database module - MySQL implementations using SQLx
//!
//! This module provides the durable storage layer:
//! - Connection pool management
//! - MySQL implementations of the `CodeStore` and `LockoutStore` traits

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlCodeStore, MySqlLockoutStore};

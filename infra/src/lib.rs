//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the VeriCode
//! verification service. It provides the durable MySQL implementations of the
//! store traits defined in `vc_core`, plus connection pool management and
//! configuration loading.
//!
//! ## Architecture
//!
//! - **Database**: MySQL store implementations using SQLx
//! - **Config**: Environment-driven configuration for the database layer
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core error types for convenience
pub use vc_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Configuration module for infrastructure services
pub mod config;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! # VeriCode Core
//!
//! Core domain layer for the VeriCode verification service.
//! This crate contains the verification code ledger, the account lockout
//! guard, the orchestrator that sequences them, the store traits they
//! persist through, and the error types shared across the workspace.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

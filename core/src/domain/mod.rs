//! Domain layer containing the verification and lockout entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;

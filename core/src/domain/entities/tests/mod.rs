//! Unit tests for domain entities

mod lockout_tests;
mod verification_code_tests;

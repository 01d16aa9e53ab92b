//! Unit tests for the verification workflow


mod sweep_tests;

//! Integration tests for universal-ai
//!
//! These tests drive the public API against wiremock servers standing in
//! for the upstream providers.

pub mod config_tests;
pub mod executor_tests;
pub mod health_tests;
pub mod orchestrator_tests;

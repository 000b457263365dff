//! Common test utilities for universal-ai
//!
//! - Request and registry fixtures
//! - Health probes with fixed answers
//! - wiremock helpers that mimic each provider kind's API

pub mod fixtures;
pub mod providers;

pub use fixtures::{AlwaysDown, AlwaysUp, RequestFactory};
pub use providers::MockProvider;

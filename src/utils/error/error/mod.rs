//! Error handling for the router
//!
//! This module defines the crate-level error type. Provider call failures
//! live in [`crate::core::providers::ProviderError`].

mod conversions;
mod helpers;
mod types;

pub use types::{GatewayError, Result};

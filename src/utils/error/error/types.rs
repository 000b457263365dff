//! Error types for the router

use crate::core::providers::unified_provider::ProviderError;
use thiserror::Error;

/// Result type alias for the router
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the router
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Provider errors
    #[error("Provider error: {0}")]
    Provider(ProviderError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Provider not found
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// No healthy providers
    #[error("No healthy providers: {0}")]
    NoHealthyProviders(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

//! Shared HTTP plumbing for provider modules

pub mod connection_pool;

pub use connection_pool::{ConnectionPool, PoolConfig, map_http_error};

use super::ProviderKind;
use super::provider_registry::ProviderDescriptor;
use super::unified_provider::ProviderError;
use crate::core::types::GenerationRequest;
use crate::utils::merge_json_values;
use serde_json::Value;

/// One upstream call: who to call, with which model, for what request
#[derive(Debug, Clone, Copy)]
pub struct ProviderCall<'a> {
    pub pool: &'a ConnectionPool,
    pub provider: &'a ProviderDescriptor,
    pub model: &'a str,
    pub request: &'a GenerationRequest,
}

impl ProviderCall<'_> {
    pub fn kind(&self) -> ProviderKind {
        self.provider.kind
    }

    /// Merge the caller's free-form options over a provider body
    pub fn with_options(&self, mut body: Value) -> Value {
        if !self.request.options.is_empty() {
            merge_json_values(&mut body, &Value::Object(self.request.options.clone()));
        }
        body
    }

    pub fn not_supported(&self) -> ProviderError {
        ProviderError::not_supported(
            self.kind().as_str(),
            self.request.capability().as_str(),
        )
    }

    pub fn require_credential(&self) -> Result<&str, ProviderError> {
        self.provider.api_key().ok_or_else(|| {
            ProviderError::configuration(
                self.kind().as_str(),
                format!("No API key configured for {}", self.provider.name),
            )
        })
    }
}

//! Test fixtures and data factories

use async_trait::async_trait;
use std::time::Duration;
use universal_ai::config::HealthConfig;
use universal_ai::{GenerationRequest, HealthProbe, ProviderDescriptor, ProviderError, Tier};

/// Factory for generation requests
pub struct RequestFactory;

impl RequestFactory {
    /// The canonical text request: model m1, "Hello world", free tier
    pub fn hello_world() -> GenerationRequest {
        GenerationRequest::text("Hello world")
            .with_model("m1")
            .with_tier(Tier::Free)
            .with_timeout(Duration::from_secs(5))
    }

    pub fn image(prompt: &str) -> GenerationRequest {
        GenerationRequest::image(prompt).with_timeout(Duration::from_secs(5))
    }

    pub fn with_deadline(request: GenerationRequest, millis: u64) -> GenerationRequest {
        request.with_timeout(Duration::from_millis(millis))
    }
}

/// Health settings for tests: no background task, short probes
pub fn quiet_health() -> HealthConfig {
    HealthConfig {
        enabled: false,
        interval_secs: 3600,
        probe_timeout_secs: 2,
        assume_healthy_at_start: false,
    }
}

/// Probe that reports every provider reachable
#[derive(Debug)]
pub struct AlwaysUp;

#[async_trait]
impl HealthProbe for AlwaysUp {
    async fn probe(&self, _provider: &ProviderDescriptor) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Probe that reports every provider unreachable
#[derive(Debug)]
pub struct AlwaysDown;

#[async_trait]
impl HealthProbe for AlwaysDown {
    async fn probe(&self, provider: &ProviderDescriptor) -> Result<(), ProviderError> {
        Err(ProviderError::network(
            provider.kind.as_str(),
            "connection refused",
        ))
    }
}

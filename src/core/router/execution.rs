//! Request execution
//!
//! Resolves the model, dispatches to the provider kind's module under a
//! wall-clock deadline and prices the result. Generic providers never fail
//! here: any error becomes a degraded placeholder.

use crate::core::cost::PricingTable;
use crate::core::providers::base::{ConnectionPool, ProviderCall};
use crate::core::providers::{
    ProviderDescriptor, ProviderError, ProviderKind, anthropic, elevenlabs, gemini, generic,
    openai,
};
use crate::core::types::{GenerationRequest, ResponsePayload};
use crate::utils::sanitize_for_logging;
use std::time::Duration;
use tracing::{debug, warn};

/// Normalized result of one upstream call
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutput {
    pub payload: ResponsePayload,
    pub model: String,
    pub cost: f64,
    /// Output is a local placeholder, not provider content
    pub degraded: bool,
}

/// Executes requests against providers
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    pool: ConnectionPool,
    pricing: PricingTable,
    default_timeout: Duration,
}

impl RequestExecutor {
    pub fn new(pool: ConnectionPool, pricing: PricingTable, default_timeout: Duration) -> Self {
        Self {
            pool,
            pricing,
            default_timeout,
        }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Call `provider` for `request`
    pub async fn execute(
        &self,
        provider: &ProviderDescriptor,
        request: &GenerationRequest,
    ) -> Result<ExecutionOutput, ProviderError> {
        let capability = request.capability();
        let kind = provider.kind;

        if !provider.supports(capability) {
            return Err(ProviderError::not_supported(kind.as_str(), capability.as_str()));
        }

        let model = provider
            .resolve_model(capability, request.model.as_deref())
            .or_else(|| (kind == ProviderKind::Generic).then(|| "default".to_string()))
            .ok_or_else(|| {
                ProviderError::configuration(
                    kind.as_str(),
                    format!("No {} model configured for {}", capability, provider.name),
                )
            })?;

        let deadline = request.timeout().unwrap_or(self.default_timeout);
        let call = ProviderCall {
            pool: &self.pool,
            provider,
            model: &model,
            request,
        };

        debug!(
            "Executing {} request on {} with model {} (deadline {:?})",
            capability, provider.name, model, deadline
        );

        let outcome = match tokio::time::timeout(deadline, dispatch(call)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(
                kind.as_str(),
                format!("Request exceeded {:?}", deadline),
            )),
        };

        match outcome {
            Ok(payload) => {
                let cost = self.pricing.cost_of(provider, &payload);
                Ok(ExecutionOutput {
                    payload,
                    model,
                    cost,
                    degraded: false,
                })
            }
            Err(error) if kind == ProviderKind::Generic => {
                warn!(
                    "Generic provider {} failed, returning degraded placeholder: {}",
                    provider.name,
                    sanitize_for_logging(&error.to_string())
                );
                Ok(ExecutionOutput {
                    payload: generic::placeholder(&provider.name, capability),
                    model,
                    cost: 0.0,
                    degraded: true,
                })
            }
            Err(error) => {
                warn!(
                    "Provider {} failed: {}",
                    provider.name,
                    sanitize_for_logging(&error.to_string())
                );
                Err(error)
            }
        }
    }
}

async fn dispatch(call: ProviderCall<'_>) -> Result<ResponsePayload, ProviderError> {
    match call.kind() {
        ProviderKind::OpenAi => openai::execute(call).await,
        ProviderKind::Anthropic => anthropic::execute(call).await,
        ProviderKind::Google => gemini::execute(call).await,
        ProviderKind::ElevenLabs => elevenlabs::execute(call).await,
        ProviderKind::Generic => generic::execute(call).await,
    }
}

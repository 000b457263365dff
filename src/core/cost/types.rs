//! Cost types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::config::PricingConfig;

/// Resolved USD rates for one provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderRates {
    pub input_per_1k_tokens: f64,
    pub output_per_1k_tokens: f64,
    /// Charged per text call when no usage is reported
    pub text_estimate: f64,
    pub per_image: f64,
    pub per_voice: f64,
    pub per_video: f64,
    pub per_transcription: f64,
}

impl ProviderRates {
    /// Apply per-provider overrides on top of these rates
    pub fn with_overrides(mut self, overrides: &PricingConfig) -> Self {
        let apply = |slot: &mut f64, value: Option<f64>| {
            if let Some(value) = value {
                *slot = value;
            }
        };
        apply(&mut self.input_per_1k_tokens, overrides.input_per_1k_tokens);
        apply(&mut self.output_per_1k_tokens, overrides.output_per_1k_tokens);
        apply(&mut self.text_estimate, overrides.text_estimate);
        apply(&mut self.per_image, overrides.per_image);
        apply(&mut self.per_voice, overrides.per_voice);
        apply(&mut self.per_video, overrides.per_video);
        apply(&mut self.per_transcription, overrides.per_transcription);
        self
    }
}

/// Running totals for one provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderCost {
    pub total: f64,
    pub requests: u64,
}

/// Snapshot of the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub total: f64,
    pub providers: BTreeMap<String, ProviderCost>,
}

/// Cost calculation errors
#[derive(Debug, Error, PartialEq)]
pub enum CostError {
    #[error("Invalid cost amount {amount} for provider {provider}")]
    InvalidAmount { provider: String, amount: f64 },
}

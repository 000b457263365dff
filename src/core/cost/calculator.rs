//! Pricing table
//!
//! Default rates per provider kind. Text is charged per 1K tokens when the
//! provider reports usage and a flat estimate otherwise; every other
//! capability is a flat per-call rate.

use std::collections::HashMap;

use super::types::ProviderRates;
use crate::core::providers::{ProviderDescriptor, ProviderKind};
use crate::core::types::{Capability, ResponsePayload};

/// Per-kind default rates with per-provider overrides from the descriptor
#[derive(Debug, Clone)]
pub struct PricingTable {
    defaults: HashMap<ProviderKind, ProviderRates>,
}

impl Default for PricingTable {
    fn default() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert(
            ProviderKind::OpenAi,
            ProviderRates {
                input_per_1k_tokens: 0.00015,
                output_per_1k_tokens: 0.0006,
                text_estimate: 0.002,
                per_image: 0.04,
                per_voice: 0.015,
                per_video: 0.0,
                per_transcription: 0.006,
            },
        );
        defaults.insert(
            ProviderKind::Anthropic,
            ProviderRates {
                input_per_1k_tokens: 0.003,
                output_per_1k_tokens: 0.015,
                text_estimate: 0.01,
                ..Default::default()
            },
        );
        defaults.insert(
            ProviderKind::Google,
            ProviderRates {
                input_per_1k_tokens: 0.000075,
                output_per_1k_tokens: 0.0003,
                text_estimate: 0.001,
                ..Default::default()
            },
        );
        defaults.insert(
            ProviderKind::ElevenLabs,
            ProviderRates {
                per_voice: 0.03,
                ..Default::default()
            },
        );
        defaults.insert(
            ProviderKind::Generic,
            ProviderRates {
                text_estimate: 0.001,
                per_image: 0.02,
                per_voice: 0.01,
                per_video: 0.5,
                per_transcription: 0.005,
                ..Default::default()
            },
        );
        Self { defaults }
    }
}

impl PricingTable {
    /// A table with no default rates; only provider overrides apply
    pub fn empty() -> Self {
        Self {
            defaults: HashMap::new(),
        }
    }

    pub fn with_rates(mut self, kind: ProviderKind, rates: ProviderRates) -> Self {
        self.defaults.insert(kind, rates);
        self
    }

    /// Effective rates for a provider
    pub fn rates_for(&self, provider: &ProviderDescriptor) -> ProviderRates {
        self.defaults
            .get(&provider.kind)
            .copied()
            .unwrap_or_default()
            .with_overrides(&provider.pricing)
    }

    /// Per-call estimate used when comparing providers before a call
    pub fn estimate(&self, provider: &ProviderDescriptor, capability: Capability) -> f64 {
        let rates = self.rates_for(provider);
        match capability {
            Capability::Text => rates.text_estimate,
            Capability::Image => rates.per_image,
            Capability::Voice => rates.per_voice,
            Capability::Video => rates.per_video,
            Capability::Audio => rates.per_transcription,
        }
    }

    /// Cost of a completed call
    pub fn cost_of(&self, provider: &ProviderDescriptor, payload: &ResponsePayload) -> f64 {
        let rates = self.rates_for(provider);
        let cost = match payload {
            ResponsePayload::Text {
                usage: Some(usage), ..
            } => {
                usage.prompt_tokens as f64 / 1000.0 * rates.input_per_1k_tokens
                    + usage.completion_tokens as f64 / 1000.0 * rates.output_per_1k_tokens
            }
            ResponsePayload::Text { usage: None, .. } => rates.text_estimate,
            ResponsePayload::Image { .. } => rates.per_image,
            ResponsePayload::Voice { .. } => rates.per_voice,
            ResponsePayload::Video { .. } => rates.per_video,
            ResponsePayload::Transcript { .. } => rates.per_transcription,
        };
        if cost.is_finite() { cost.max(0.0) } else { 0.0 }
    }
}

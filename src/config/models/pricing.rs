//! Pricing overrides

use serde::{Deserialize, Serialize};

/// Per-provider price overrides in USD; unset fields use the provider kind's defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_per_1k_tokens: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_per_1k_tokens: Option<f64>,
    /// Charged per text call when the provider reports no usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_estimate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_image: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_voice: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_video: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_transcription: Option<f64>,
}

impl PricingConfig {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// All configured rates, for validation
    pub(crate) fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        [
            self.input_per_1k_tokens,
            self.output_per_1k_tokens,
            self.text_estimate,
            self.per_image,
            self.per_voice,
            self.per_video,
            self.per_transcription,
        ]
        .into_iter()
        .flatten()
    }
}

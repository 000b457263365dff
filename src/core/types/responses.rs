//! Response envelope and normalized payloads

use serde::{Deserialize, Serialize};

/// Token usage reported by a text provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// Read two token counts from a provider's usage object
    ///
    /// Missing or non-numeric fields count as 0; counts above `u32::MAX` saturate.
    pub fn from_fields(usage: &serde_json::Value, prompt_field: &str, completion_field: &str) -> Self {
        let field = |name: &str| {
            usage
                .get(name)
                .and_then(serde_json::Value::as_u64)
                .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
                .unwrap_or(0)
        };
        Self::new(field(prompt_field), field(completion_field))
    }
}

/// Synthesized audio, either hosted or inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AudioData {
    Url { url: String },
    Base64 { data: String, mime_type: String },
}

/// Normalized provider output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponsePayload {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<Usage>,
    },
    Image {
        url: String,
    },
    Voice {
        audio: AudioData,
    },
    Transcript {
        text: String,
    },
    Video {
        job_id: String,
        status: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl ResponsePayload {
    /// Textual rendering of the payload, if it has one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponsePayload::Text { text, .. } | ResponsePayload::Transcript { text } => Some(text),
            ResponsePayload::Image { url } => Some(url),
            ResponsePayload::Voice {
                audio: AudioData::Url { url },
            } => Some(url),
            ResponsePayload::Video { url, .. } => url.as_deref(),
            ResponsePayload::Voice { .. } => None,
        }
    }
}

/// Uniform result of `Orchestrator::process`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub request_id: String,
    pub success: bool,
    /// Output was synthesized locally after an upstream failure
    #[serde(default)]
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ResponsePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Estimated cost in USD
    pub cost: f64,
    pub response_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(
        request_id: impl Into<String>,
        payload: ResponsePayload,
        provider: impl Into<String>,
        model: impl Into<String>,
        cost: f64,
        response_time_ms: u64,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            success: true,
            degraded: false,
            payload: Some(payload),
            provider: Some(provider.into()),
            model: Some(model.into()),
            cost: if cost.is_finite() { cost.max(0.0) } else { 0.0 },
            response_time_ms,
            error: None,
        }
    }

    pub fn failure(
        request_id: impl Into<String>,
        error: impl Into<String>,
        response_time_ms: u64,
    ) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "request failed".to_string();
        }
        Self {
            request_id: request_id.into(),
            success: false,
            degraded: false,
            payload: None,
            provider: None,
            model: None,
            cost: 0.0,
            response_time_ms,
            error: Some(error),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn mark_degraded(mut self) -> Self {
        self.degraded = true;
        self
    }

    /// Whether this response was served from the cache
    pub fn is_cached(&self) -> bool {
        self.provider.as_deref() == Some(crate::core::cache_manager::CACHE_PROVIDER)
    }

    /// The payload's text, or `fallback` when the call failed or produced none
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if !self.success {
            return fallback;
        }
        self.payload
            .as_ref()
            .and_then(ResponsePayload::as_text)
            .unwrap_or(fallback)
    }
}

//! Generation request envelope
//!
//! A request is a tagged union over capability so each variant only carries
//! the fields that make sense for it.

use super::capability::{Capability, Tier};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Capability-specific part of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RequestKind {
    Text {
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        system: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_tokens: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature: Option<f32>,
    },
    Image {
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<String>,
    },
    Voice {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        voice: Option<String>,
    },
    Video {
        prompt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_secs: Option<u32>,
    },
    /// Transcription of an audio reference
    Audio {
        audio_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

impl RequestKind {
    pub fn capability(&self) -> Capability {
        match self {
            RequestKind::Text { .. } => Capability::Text,
            RequestKind::Image { .. } => Capability::Image,
            RequestKind::Voice { .. } => Capability::Voice,
            RequestKind::Video { .. } => Capability::Video,
            RequestKind::Audio { .. } => Capability::Audio,
        }
    }

    /// The primary text input of the request
    pub fn prompt(&self) -> &str {
        match self {
            RequestKind::Text { prompt, .. }
            | RequestKind::Image { prompt, .. }
            | RequestKind::Video { prompt, .. } => prompt,
            RequestKind::Voice { text, .. } => text,
            RequestKind::Audio { audio_url, .. } => audio_url,
        }
    }
}

/// Capability-agnostic request handed to the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(flatten)]
    pub kind: RequestKind,
    /// Requested model; the selected provider may substitute its default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub tier: Tier,
    /// Free-form fields merged into the provider request body
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
    /// Per-request deadline override in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl GenerationRequest {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            model: None,
            tier: Tier::default(),
            options: Map::new(),
            timeout_secs: None,
        }
    }

    pub fn text(prompt: impl Into<String>) -> Self {
        Self::new(RequestKind::Text {
            prompt: prompt.into(),
            system: None,
            max_tokens: None,
            temperature: None,
        })
    }

    pub fn image(prompt: impl Into<String>) -> Self {
        Self::new(RequestKind::Image {
            prompt: prompt.into(),
            size: None,
        })
    }

    pub fn voice(text: impl Into<String>) -> Self {
        Self::new(RequestKind::Voice {
            text: text.into(),
            voice: None,
        })
    }

    pub fn video(prompt: impl Into<String>) -> Self {
        Self::new(RequestKind::Video {
            prompt: prompt.into(),
            duration_secs: None,
        })
    }

    pub fn transcription(audio_url: impl Into<String>) -> Self {
        Self::new(RequestKind::Audio {
            audio_url: audio_url.into(),
            language: None,
        })
    }

    /// Build a request from a capability and its primary input
    pub fn for_capability(capability: Capability, input: impl Into<String>) -> Self {
        match capability {
            Capability::Text => Self::text(input),
            Capability::Image => Self::image(input),
            Capability::Voice => Self::voice(input),
            Capability::Video => Self::video(input),
            Capability::Audio => Self::transcription(input),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    /// Set the system prompt; ignored for non-text requests
    pub fn with_system(mut self, system_prompt: impl Into<String>) -> Self {
        if let RequestKind::Text { system, .. } = &mut self.kind {
            *system = Some(system_prompt.into());
        }
        self
    }

    /// Set max output tokens; ignored for non-text requests
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        if let RequestKind::Text { max_tokens, .. } = &mut self.kind {
            *max_tokens = Some(tokens);
        }
        self
    }

    pub fn capability(&self) -> Capability {
        self.kind.capability()
    }

    pub fn prompt(&self) -> &str {
        self.kind.prompt()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

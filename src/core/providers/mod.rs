//! Upstream AI providers
//!
//! The registry of configured providers and one request module per
//! provider kind. Every kind speaks HTTP through the shared connection pool
//! and reports failures as [`ProviderError`].

// Base infrastructure
pub mod base;

// Provider modules
pub mod anthropic;
pub mod elevenlabs;
pub mod gemini;
pub mod generic;
pub mod openai;

// Registry and unified error
pub mod provider_registry;
pub mod unified_provider;

pub use provider_registry::{ProviderDescriptor, ProviderRegistry};
pub use unified_provider::ProviderError;

use crate::core::types::Capability;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Wire protocol family of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(alias = "open_ai")]
    OpenAi,
    Anthropic,
    #[serde(alias = "gemini")]
    Google,
    #[serde(alias = "eleven_labs")]
    ElevenLabs,
    Generic,
}

/// How a provider expects its credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// Named request header
    Header(&'static str),
    /// `?key=<key>` query parameter
    Query,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Google,
        ProviderKind::ElevenLabs,
        ProviderKind::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Google => "google",
            ProviderKind::ElevenLabs => "elevenlabs",
            ProviderKind::Generic => "generic",
        }
    }

    /// Public endpoint used when the configuration names none
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAi => Some("https://api.openai.com/v1"),
            ProviderKind::Anthropic => Some("https://api.anthropic.com"),
            ProviderKind::Google => Some("https://generativelanguage.googleapis.com"),
            ProviderKind::ElevenLabs => Some("https://api.elevenlabs.io"),
            ProviderKind::Generic => None,
        }
    }

    /// Capabilities this kind's request module can execute
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            ProviderKind::OpenAi => &[
                Capability::Text,
                Capability::Image,
                Capability::Voice,
                Capability::Audio,
            ],
            ProviderKind::Anthropic | ProviderKind::Google => &[Capability::Text],
            ProviderKind::ElevenLabs => &[Capability::Voice],
            ProviderKind::Generic => &Capability::ALL,
        }
    }

    pub fn can_execute(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        match self {
            ProviderKind::OpenAi | ProviderKind::Generic => AuthScheme::Bearer,
            ProviderKind::Anthropic => AuthScheme::Header("x-api-key"),
            ProviderKind::Google => AuthScheme::Query,
            ProviderKind::ElevenLabs => AuthScheme::Header("xi-api-key"),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "open_ai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "google" | "gemini" => Ok(ProviderKind::Google),
            "elevenlabs" | "eleven_labs" => Ok(ProviderKind::ElevenLabs),
            "generic" => Ok(ProviderKind::Generic),
            other => Err(format!("Unknown provider type: {}", other)),
        }
    }
}

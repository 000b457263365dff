//! Capability and tier enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of generation a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Text,
    Image,
    Voice,
    Video,
    /// Audio transcription
    Audio,
}

impl Capability {
    /// Every capability in declaration order
    pub const ALL: [Capability; 5] = [
        Capability::Text,
        Capability::Image,
        Capability::Voice,
        Capability::Video,
        Capability::Audio,
    ];

    /// Stable lowercase tag, also used as the cache key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Text => "text",
            Capability::Image => "image",
            Capability::Voice => "voice",
            Capability::Video => "video",
            Capability::Audio => "audio",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Capability::Text),
            "image" => Ok(Capability::Image),
            "voice" => Ok(Capability::Voice),
            "video" => Ok(Capability::Video),
            "audio" => Ok(Capability::Audio),
            other => Err(format!("unknown capability '{}'", other)),
        }
    }
}

/// Caller-supplied quality/cost class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Premium,
    Enterprise,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Free, Tier::Premium, Tier::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
            Tier::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "premium" => Ok(Tier::Premium),
            "enterprise" => Ok(Tier::Enterprise),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

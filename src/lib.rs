//! # Universal AI
//!
//! A multi-provider AI request router. Requests for text, image, voice,
//! video or transcription output are routed to the best healthy provider
//! for the requested quality tier, answered from an LRU+TTL cache when
//! possible, and accounted for in a per-provider cost ledger.
//!
//! ## Features
//!
//! - **Provider registry**: OpenAI, Anthropic, Google, ElevenLabs and
//!   generic HTTP endpoints, keyed by name in registration order
//! - **Health monitoring**: periodic probes with per-provider history
//! - **Response caching**: bounded LRU with expiry
//! - **Cost tracking**: concurrent per-provider totals
//! - **Pluggable selection**: tier preference, registry order or least cost
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use universal_ai::{Config, GenerationRequest, Orchestrator, Tier};
//!
//! #[tokio::main]
//! async fn main() -> universal_ai::Result<()> {
//!     let config = Config::from_file("config/router.yaml").await?;
//!     let orchestrator = Orchestrator::from_config(&config)?;
//!     orchestrator.start().await;
//!
//!     let request = GenerationRequest::text("Hello world").with_tier(Tier::Free);
//!     let response = orchestrator.process(request).await;
//!     println!("{} via {:?}", response.text_or(""), response.provider);
//!
//!     orchestrator.shutdown();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::cache_manager::{CacheStats, ResponseCache};
pub use core::cost::{CostReport, CostTracker, PricingTable};
pub use core::health::{HealthMonitor, HealthProbe, HealthSnapshot, SystemHealth};
pub use core::orchestrator::{Orchestrator, OrchestratorBuilder};
pub use core::providers::{ProviderDescriptor, ProviderError, ProviderKind, ProviderRegistry};
pub use core::router::{ProviderSelector, RequestExecutor, SelectionPolicy};
pub use core::types::{
    Capability, GenerationRequest, RequestKind, ResponseEnvelope, ResponsePayload, Tier, Usage,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Router build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}

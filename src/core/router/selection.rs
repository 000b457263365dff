//! Provider selection

use super::strategy::{SelectionPolicy, TierPreference};
use crate::core::health::HealthSnapshot;
use crate::core::providers::{ProviderDescriptor, ProviderRegistry};
use crate::core::types::{Capability, Tier};
use std::sync::Arc;
use tracing::debug;

/// Filters the registry down to healthy, capable providers and asks the policy to pick one
#[derive(Debug, Clone)]
pub struct ProviderSelector {
    registry: Arc<ProviderRegistry>,
    policy: Arc<dyn SelectionPolicy>,
}

impl ProviderSelector {
    pub fn new(registry: Arc<ProviderRegistry>, policy: Arc<dyn SelectionPolicy>) -> Self {
        Self { registry, policy }
    }

    /// Selector with the default tier preference table
    pub fn with_defaults(registry: Arc<ProviderRegistry>) -> Self {
        Self::new(registry, Arc::new(TierPreference::default()))
    }

    pub fn policy(&self) -> &dyn SelectionPolicy {
        self.policy.as_ref()
    }

    /// Healthy providers offering the capability, in registry order
    pub fn candidates(
        &self,
        capability: Capability,
        health: &HealthSnapshot,
    ) -> Vec<&ProviderDescriptor> {
        self.registry
            .supporting(capability)
            .filter(|p| health.get(&p.name).copied().unwrap_or(false))
            .collect()
    }

    /// Choose a provider, or `None` when no healthy provider offers the capability
    pub fn select(
        &self,
        capability: Capability,
        tier: Tier,
        health: &HealthSnapshot,
    ) -> Option<&ProviderDescriptor> {
        let candidates = self.candidates(capability, health);
        if candidates.is_empty() {
            debug!("No healthy candidates for {}", capability);
            return None;
        }

        // A policy may only pick from the candidate set
        let chosen = self
            .policy
            .choose(capability, tier, &candidates)
            .filter(|p| candidates.iter().any(|c| c.name == p.name))
            .or_else(|| candidates.first().copied());

        if let Some(provider) = chosen {
            debug!(
                "Policy {} selected {} for {}/{}",
                self.policy.name(),
                provider.name,
                capability,
                tier
            );
        }
        chosen
    }
}

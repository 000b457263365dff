//! Selection strategies
//!
//! A policy only ranks the candidates it is given; filtering by capability
//! and health happens in [`ProviderSelector`](super::ProviderSelector).

use crate::config::{RouterConfig, RoutingStrategy};
use crate::core::cost::PricingTable;
use crate::core::providers::ProviderDescriptor;
use crate::core::types::{Capability, Tier};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Picks one provider out of the healthy candidates
pub trait SelectionPolicy: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// `candidates` is non-empty and in registry order
    fn choose<'a>(
        &self,
        capability: Capability,
        tier: Tier,
        candidates: &[&'a ProviderDescriptor],
    ) -> Option<&'a ProviderDescriptor>;
}

/// Capability x tier -> preferred provider id
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceTable {
    entries: BTreeMap<Capability, BTreeMap<Tier, String>>,
}

impl Default for PreferenceTable {
    fn default() -> Self {
        use Capability::*;
        use Tier::*;

        let rows: [(Capability, [(Tier, &str); 3]); 5] = [
            (
                Text,
                [(Enterprise, "anthropic"), (Premium, "openai"), (Free, "google")],
            ),
            (
                Image,
                [(Enterprise, "openai"), (Premium, "openai"), (Free, "stability")],
            ),
            (
                Voice,
                [(Enterprise, "elevenlabs"), (Premium, "elevenlabs"), (Free, "openai")],
            ),
            (
                Audio,
                [(Enterprise, "openai"), (Premium, "openai"), (Free, "openai")],
            ),
            (
                Video,
                [(Enterprise, "runway"), (Premium, "runway"), (Free, "runway")],
            ),
        ];

        let entries = rows
            .into_iter()
            .map(|(capability, tiers)| {
                let tiers = tiers
                    .into_iter()
                    .map(|(tier, provider)| (tier, provider.to_string()))
                    .collect();
                (capability, tiers)
            })
            .collect();
        Self { entries }
    }
}

impl PreferenceTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Replace individual cells
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<Capability, BTreeMap<Tier, String>>,
    ) -> Self {
        for (capability, tiers) in overrides {
            self.entries
                .entry(*capability)
                .or_default()
                .extend(tiers.iter().map(|(tier, provider)| (*tier, provider.clone())));
        }
        self
    }

    pub fn set(&mut self, capability: Capability, tier: Tier, provider: impl Into<String>) {
        self.entries
            .entry(capability)
            .or_default()
            .insert(tier, provider.into());
    }

    pub fn preferred(&self, capability: Capability, tier: Tier) -> Option<&str> {
        self.entries
            .get(&capability)
            .and_then(|tiers| tiers.get(&tier))
            .map(String::as_str)
    }
}

/// Preferred provider for the tier, else the first healthy candidate
#[derive(Debug, Clone, Default)]
pub struct TierPreference {
    table: PreferenceTable,
}

impl TierPreference {
    pub fn new(table: PreferenceTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PreferenceTable {
        &self.table
    }
}

impl SelectionPolicy for TierPreference {
    fn name(&self) -> &'static str {
        "tier_preference"
    }

    fn choose<'a>(
        &self,
        capability: Capability,
        tier: Tier,
        candidates: &[&'a ProviderDescriptor],
    ) -> Option<&'a ProviderDescriptor> {
        let preferred = self.table.preferred(capability, tier);
        if let Some(provider) =
            preferred.and_then(|name| candidates.iter().copied().find(|p| p.name == name))
        {
            debug!(
                "Tier preference selected {} for {}/{}",
                provider.name, capability, tier
            );
            return Some(provider);
        }

        let fallback = candidates.first().copied();
        debug!(
            "Preferred provider {:?} unavailable for {}/{}, falling back to {:?}",
            preferred,
            capability,
            tier,
            fallback.map(|p| p.name.as_str())
        );
        fallback
    }
}

/// First healthy candidate in declaration order
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryOrder;

impl SelectionPolicy for RegistryOrder {
    fn name(&self) -> &'static str {
        "registry_order"
    }

    fn choose<'a>(
        &self,
        _capability: Capability,
        _tier: Tier,
        candidates: &[&'a ProviderDescriptor],
    ) -> Option<&'a ProviderDescriptor> {
        candidates.first().copied()
    }
}

/// Cheapest candidate by per-call estimate; ties keep registry order
#[derive(Debug, Clone, Default)]
pub struct LeastCost {
    pricing: PricingTable,
}

impl LeastCost {
    pub fn new(pricing: PricingTable) -> Self {
        Self { pricing }
    }
}

impl SelectionPolicy for LeastCost {
    fn name(&self) -> &'static str {
        "least_cost"
    }

    fn choose<'a>(
        &self,
        capability: Capability,
        _tier: Tier,
        candidates: &[&'a ProviderDescriptor],
    ) -> Option<&'a ProviderDescriptor> {
        let mut best: Option<(&'a ProviderDescriptor, f64)> = None;
        for provider in candidates.iter().copied() {
            let cost = self.pricing.estimate(provider, capability);
            // Strict comparison keeps the earlier provider on ties
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((provider, cost));
            }
        }

        if let Some((provider, cost)) = best {
            debug!(
                "Least cost selected provider: {} (${:.4})",
                provider.name, cost
            );
        }
        best.map(|(provider, _)| provider)
    }
}

/// Build the configured built-in policy
pub fn policy_for(config: &RouterConfig, pricing: PricingTable) -> Arc<dyn SelectionPolicy> {
    match config.strategy {
        RoutingStrategy::TierPreference => Arc::new(TierPreference::new(
            PreferenceTable::default().with_overrides(&config.preferences),
        )),
        RoutingStrategy::RegistryOrder => Arc::new(RegistryOrder),
        RoutingStrategy::LeastCost => Arc::new(LeastCost::new(pricing)),
    }
}

//! Router configuration

use super::*;
use crate::core::types::{Capability, Tier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in selection strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    /// Fixed capability x tier preference table, first healthy fallback
    #[default]
    TierPreference,
    /// First healthy provider in declaration order
    RegistryOrder,
    /// Cheapest healthy provider for the capability
    LeastCost,
}

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub strategy: RoutingStrategy,
    /// Overrides for the tier preference table
    #[serde(default)]
    pub preferences: BTreeMap<Capability, BTreeMap<Tier, String>>,
    /// Wall-clock deadline for each upstream call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strategy: RoutingStrategy::default(),
            preferences: BTreeMap::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl RouterConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.strategy != RoutingStrategy::default() {
            self.strategy = other.strategy;
        }
        for (capability, tiers) in other.preferences {
            self.preferences.entry(capability).or_default().extend(tiers);
        }
        if other.request_timeout_secs != default_request_timeout() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        self
    }
}

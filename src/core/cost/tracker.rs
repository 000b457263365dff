//! Per-provider cost ledger

use dashmap::DashMap;
use std::collections::BTreeMap;
use tracing::debug;

use super::types::{CostError, CostReport, ProviderCost};

/// Accumulates estimated spend per provider
#[derive(Debug, Default)]
pub struct CostTracker {
    ledger: DashMap<String, ProviderCost>,
}

impl CostTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call's cost; negative or non-finite amounts are rejected
    pub fn add(&self, provider: &str, amount: f64) -> Result<(), CostError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CostError::InvalidAmount {
                provider: provider.to_string(),
                amount,
            });
        }

        let mut entry = self.ledger.entry(provider.to_string()).or_default();
        entry.total += amount;
        entry.requests += 1;
        debug!(provider, amount, total = entry.total, "Recorded cost");
        Ok(())
    }

    /// Running total for one provider
    pub fn total_for(&self, provider: &str) -> f64 {
        self.ledger.get(provider).map(|e| e.total).unwrap_or(0.0)
    }

    pub fn request_count(&self, provider: &str) -> u64 {
        self.ledger.get(provider).map(|e| e.requests).unwrap_or(0)
    }

    /// Total across all providers
    pub fn total(&self) -> f64 {
        self.ledger.iter().map(|e| e.total).sum()
    }

    /// Provider -> running total
    pub fn totals(&self) -> BTreeMap<String, f64> {
        self.ledger
            .iter()
            .map(|e| (e.key().clone(), e.total))
            .collect()
    }

    pub fn report(&self) -> CostReport {
        let providers: BTreeMap<String, ProviderCost> = self
            .ledger
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect();
        CostReport {
            total: providers.values().map(|c| c.total).sum(),
            providers,
        }
    }

    pub fn reset(&self) {
        self.ledger.clear();
    }
}

//! Cost accounting
//!
//! Pricing lookups per provider kind (overridable per provider) and a
//! running per-provider ledger. Purely observational: nothing here enforces
//! budgets.

pub mod calculator;
pub mod tracker;
pub mod types;

pub use calculator::PricingTable;
pub use tracker::CostTracker;
pub use types::{CostError, CostReport, ProviderCost, ProviderRates};

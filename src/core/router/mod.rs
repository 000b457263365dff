//! Routing: provider selection and request execution

pub mod execution;
pub mod selection;
pub mod strategy;

pub use execution::{ExecutionOutput, RequestExecutor};
pub use selection::ProviderSelector;
pub use strategy::{
    LeastCost, PreferenceTable, RegistryOrder, SelectionPolicy, TierPreference, policy_for,
};

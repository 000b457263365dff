//! Core routing components
//!
//! The registry, health, cache, cost, selection and execution pieces that
//! the [`orchestrator::Orchestrator`] composes into one request pipeline.

pub mod cache_manager;
pub mod cost;
pub mod health;
pub mod orchestrator;
pub mod providers;
pub mod router;
pub mod types;

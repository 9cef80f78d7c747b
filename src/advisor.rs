//! AI advisory module for fleet-advisor
//!
//! Wraps a remote generative-AI service for place autocomplete, route
//! optimization and predictive maintenance, with caching, request coalescing,
//! a quota cooldown, and deterministic local fallbacks.

pub mod cache;
pub mod cooldown;
pub mod fallback;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod proxy;
pub mod single_flight;
pub mod types;

pub use provider::{AsyncAiProvider, GenerateRequest, Generator, ModelTier, RemoteCallError};
pub use proxy::{AdvisorSettings, AdvisoryProxy};
pub use types::{Advisory, MaintenanceForecastItem, Provenance, RoutePlan, Urgency};

//! fleet-advisor library - AI advisory proxy for fleet management
//!
//! This library exposes the advisory proxy, its provider layer, and the fleet
//! record types it consumes.

pub mod advisor;
pub mod config;
pub mod error;
pub mod fleet;
pub mod render;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use advisor::{Advisory, AdvisoryProxy, AsyncAiProvider, Provenance};
pub use config::Config;

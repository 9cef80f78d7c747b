// AI configuration type definitions

use serde::Deserialize;

use crate::advisor::provider::GEMINI_API_URL;

/// Default model for place suggestions and route planning
fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

/// Default model for maintenance forecasting
fn default_deep_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_base_url() -> String {
    GEMINI_API_URL.to_string()
}

/// AI provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderType {
    #[default]
    Gemini,
}

/// Gemini-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// API key (required when AI is enabled)
    pub api_key: Option<String>,
    /// Fast model, used for places and routes
    #[serde(default = "default_model")]
    pub model: String,
    /// Stronger model, used for maintenance forecasts
    #[serde(default = "default_deep_model")]
    pub deep_model: String,
    /// API root; override to point at a proxy or local stub
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: default_model(),
            deep_model: default_deep_model(),
            base_url: default_base_url(),
        }
    }
}

/// AI section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AiConfig {
    /// Whether remote AI calls are attempted at all
    #[serde(default)]
    pub enabled: bool,
    /// Which AI provider to use
    #[serde(default)]
    pub provider: AiProviderType,
    /// Gemini-specific configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[cfg(test)]
#[path = "ai_types_tests.rs"]
mod ai_types_tests;

//! Remote generation provider abstraction
//!
//! Defines the `Generator` seam the advisory proxy calls through, the
//! `RemoteCallError` taxonomy, and the `AsyncAiProvider` factory that builds a
//! concrete transport from configuration.

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::config::ai_types::{AiConfig, AiProviderType};

mod async_gemini;

pub use async_gemini::{AsyncGeminiClient, GEMINI_API_URL};

/// Errors that can occur during a remote generation call
///
/// Cloneable so a single outcome can be handed to every coalesced waiter.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum RemoteCallError {
    /// No usable provider (missing API key or disabled)
    #[error("[{provider}] AI not configured: {message}")]
    NotConfigured { provider: String, message: String },

    /// Network error during API request
    #[error("[{provider}] Network error: {message}")]
    Network { provider: String, message: String },

    /// API returned an error response
    #[error("[{provider}] API error ({code}): {message}")]
    Api {
        provider: String,
        code: u16,
        message: String,
        /// Set by the transport when the response signals quota exhaustion
        quota_exceeded: bool,
    },

    /// Response text could not be turned into the requested payload
    #[error("Malformed response: {message}")]
    Parse { message: String },

    /// The call did not finish within the configured bound
    #[error("[{provider}] Request timed out after {after_ms}ms")]
    Timeout { provider: String, after_ms: u64 },

    /// The shared call ended without producing an outcome
    #[error("Remote call aborted: {message}")]
    Aborted { message: String },
}

impl RemoteCallError {
    /// Whether this failure should start the quota cooldown
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            RemoteCallError::Api {
                quota_exceeded: true,
                ..
            }
        )
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        RemoteCallError::Parse {
            message: message.into(),
        }
    }
}

/// Classify an API failure as a quota/rate-limit signal
///
/// A failure counts when the status is 429 or the message carries either the
/// `429` or `RESOURCE_EXHAUSTED` token.
pub fn is_quota_signal(code: Option<u16>, message: &str) -> bool {
    code == Some(429) || message.contains("429") || message.contains("RESOURCE_EXHAUSTED")
}

/// Which model class a request should run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelTier {
    /// Low-latency model for autocomplete and routing
    #[default]
    Fast,
    /// Stronger model for maintenance analysis
    Deep,
}

/// One logical "generate content from prompt" call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Response schema; when present the provider is asked for JSON output
    pub schema: Option<Value>,
    pub tier: ModelTier,
}

impl GenerateRequest {
    /// Free-text request
    pub fn text(prompt: String, tier: ModelTier) -> Self {
        Self {
            prompt,
            schema: None,
            tier,
        }
    }

    /// Schema-constrained JSON request
    pub fn structured(prompt: String, schema: Value, tier: ModelTier) -> Self {
        Self {
            prompt,
            schema: Some(schema),
            tier,
        }
    }
}

/// Anything that can turn a prompt into response text
pub trait Generator: Send + Sync + 'static {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<String, RemoteCallError>> + Send;
}

/// Configured AI providers
#[derive(Debug, Clone)]
pub enum AsyncAiProvider {
    /// Google Generative Language API
    Gemini(AsyncGeminiClient),
    /// No provider available; every call fails with `NotConfigured`
    Offline { reason: String },
}

impl AsyncAiProvider {
    /// Returns the display name of the provider
    pub fn provider_name(&self) -> &'static str {
        match self {
            AsyncAiProvider::Gemini(_) => "Gemini",
            AsyncAiProvider::Offline { .. } => "Offline",
        }
    }

    /// Create a provider from configuration
    ///
    /// Returns an error if the configuration is disabled or incomplete.
    pub fn from_config(config: &AiConfig) -> Result<Self, RemoteCallError> {
        let provider_name = match config.provider {
            AiProviderType::Gemini => "Gemini",
        };

        if !config.enabled {
            return Err(RemoteCallError::NotConfigured {
                provider: provider_name.to_string(),
                message: format!(
                    "AI is disabled. Set 'enabled = true' in [ai] section with provider = \"{}\", or export API_KEY.",
                    provider_name.to_lowercase()
                ),
            });
        }

        match config.provider {
            AiProviderType::Gemini => {
                let api_key = config
                    .gemini
                    .api_key
                    .as_ref()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| RemoteCallError::NotConfigured {
                        provider: "Gemini".to_string(),
                        message: "Missing API key. Add 'api_key' in [ai.gemini] section or export API_KEY.".to_string(),
                    })?;

                if config.gemini.model.trim().is_empty() {
                    return Err(RemoteCallError::NotConfigured {
                        provider: "Gemini".to_string(),
                        message: "Empty model. Set 'model' in [ai.gemini] section (e.g., 'gemini-3-flash-preview').".to_string(),
                    });
                }

                let deep_model = if config.gemini.deep_model.trim().is_empty() {
                    config.gemini.model.clone()
                } else {
                    config.gemini.deep_model.clone()
                };

                Ok(AsyncAiProvider::Gemini(AsyncGeminiClient::new(
                    api_key.clone(),
                    config.gemini.model.clone(),
                    deep_model,
                    config.gemini.base_url.clone(),
                )))
            }
        }
    }

    /// Like `from_config`, but degrades to `Offline` instead of failing
    pub fn from_config_or_offline(config: &AiConfig) -> Self {
        match Self::from_config(config) {
            Ok(provider) => provider,
            Err(e) => {
                log::info!("Remote advisory disabled: {}", e);
                AsyncAiProvider::Offline {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl Generator for AsyncAiProvider {
    fn name(&self) -> &str {
        self.provider_name()
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, RemoteCallError> {
        match self {
            AsyncAiProvider::Gemini(client) => client.generate(request).await,
            AsyncAiProvider::Offline { reason } => Err(RemoteCallError::NotConfigured {
                provider: "Offline".to_string(),
                message: reason.clone(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;

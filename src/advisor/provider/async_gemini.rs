//! Async Gemini API client
//!
//! Implements non-streaming `generateContent` calls against the Google
//! Generative Language API. Uses reqwest for HTTP; the caller owns the
//! runtime and any timeout.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{GenerateRequest, ModelTier, RemoteCallError, is_quota_signal};

/// Default Gemini API endpoint
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Async Gemini API client
#[derive(Debug, Clone)]
pub struct AsyncGeminiClient {
    client: Client,
    api_key: String,
    model: String,
    deep_model: String,
    base_url: String,
}

impl AsyncGeminiClient {
    /// Create a new async Gemini client
    pub fn new(api_key: String, model: String, deep_model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            deep_model,
            base_url,
        }
    }

    /// Returns the stored API key (used in tests)
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Model used for a given tier
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.model,
            ModelTier::Deep => &self.deep_model,
        }
    }

    /// Build the request body JSON for Gemini API
    ///
    /// Structured requests carry `generationConfig` with a JSON mime type and
    /// the response schema; free-text requests omit it.
    fn build_request_body(&self, request: &GenerateRequest) -> Result<String, RemoteCallError> {
        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }

        #[derive(Serialize)]
        struct Content<'a> {
            role: &'static str,
            parts: Vec<Part<'a>>,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GenerationConfig<'a> {
            response_mime_type: &'static str,
            response_schema: &'a Value,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct RequestBody<'a> {
            contents: Vec<Content<'a>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            generation_config: Option<GenerationConfig<'a>>,
        }

        let body = RequestBody {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: request.schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        serde_json::to_string(&body)
            .map_err(|e| RemoteCallError::parse(format!("Failed to serialize request body: {}", e)))
    }

    /// Build the URL: `{base_url}/{model}:generateContent`
    fn build_url(&self, tier: ModelTier) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_for(tier)
        )
    }

    /// Pull the generated text out of a `generateContent` response body
    ///
    /// Concatenates every text part of the first candidate.
    fn extract_text(body: &str) -> Result<String, RemoteCallError> {
        #[derive(Deserialize)]
        struct Part {
            text: Option<String>,
        }

        #[derive(Deserialize)]
        struct Content {
            #[serde(default)]
            parts: Vec<Part>,
        }

        #[derive(Deserialize)]
        struct Candidate {
            content: Option<Content>,
        }

        #[derive(Deserialize)]
        struct ResponseBody {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }

        let parsed: ResponseBody = serde_json::from_str(body)
            .map_err(|e| RemoteCallError::parse(format!("Invalid Gemini response: {}", e)))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(RemoteCallError::parse("Gemini returned no text"));
        }
        Ok(text)
    }

    /// Send one `generateContent` request and return the response text
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, RemoteCallError> {
        let body = self.build_request_body(request)?;
        let url = self.build_url(request.tier);

        log::debug!(
            "Gemini request to {} ({} prompt bytes, structured: {})",
            self.model_for(request.tier),
            request.prompt.len(),
            request.schema.is_some()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(body)
            .send()
            .await
            .map_err(|e| RemoteCallError::Network {
                provider: "Gemini".to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| RemoteCallError::Network {
            provider: "Gemini".to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let code = status.as_u16();
            return Err(RemoteCallError::Api {
                provider: "Gemini".to_string(),
                code,
                quota_exceeded: is_quota_signal(Some(code), &text),
                message: text,
            });
        }

        Self::extract_text(&text)
    }
}

#[cfg(test)]
#[path = "async_gemini_tests.rs"]
mod async_gemini_tests;

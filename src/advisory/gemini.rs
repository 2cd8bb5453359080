//! Google Gemini advisory client
//!
//! Sends the posting to the Gemini `generateContent` endpoint and returns the
//! first candidate's text untouched.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::AdvisoryProvider;
use crate::error::{AdvisoryError, AdvisoryResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temperature: Some(0.2),
            max_output_tokens: Some(256),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

/// Gemini-backed [`AdvisoryProvider`]
#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    settings: GeminiSettings,
    client: Client,
}

impl GeminiAdvisor {
    pub fn new(settings: GeminiSettings) -> AdvisoryResult<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(AdvisoryError::MissingApiKey);
        }

        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn build_prompt(&self, message: &str, domain: &str) -> String {
        format!(
            r#"You are a fraud analyst reviewing internship offers sent to students.

Decide whether the offer below is a scam. Look for upfront fees, pressure to
act quickly, free email addresses and impersonation of well-known companies.

SENDER DOMAIN: {domain}
MESSAGE:
{message}

Respond ONLY with JSON of the form:
{{"verdict": "Legit" | "Suspicious" | "Scam", "reason": "one short sentence"}}"#,
            domain = if domain.trim().is_empty() { "(none)" } else { domain },
        )
    }

    fn build_request(&self, message: &str, domain: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: self.build_prompt(message, domain),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
            }),
        }
    }

    // The key travels in a header so it never appears in a URL or in
    // reqwest's error messages.
    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model,
        )
    }

    fn extract_text(body: &str) -> AdvisoryResult<String> {
        let response: GeminiResponse = serde_json::from_str(body)?;

        if let Some(usage) = &response.usage_metadata {
            info!(
                "Gemini usage - Prompt: {:?} tokens, Response: {:?} tokens",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| AdvisoryError::InvalidResponse("No candidates in response".into()))?;

        let text = candidate
            .content
            .as_ref()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .ok_or_else(|| {
                AdvisoryError::InvalidResponse(format!(
                    "No text in candidate (finish_reason: {:?})",
                    candidate.finish_reason
                ))
            })?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl AdvisoryProvider for GeminiAdvisor {
    async fn advise(&self, message: &str, domain: &str) -> AdvisoryResult<String> {
        let url = self.endpoint();
        debug!("Sending advisory request: {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(&self.build_request(message, domain))
            .send()
            .await
            .map_err(|e| AdvisoryError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdvisoryError::Http(e.without_url()))?;

        if !status.is_success() {
            error!("Gemini API error: {} - {}", status, body);
            return Err(AdvisoryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Self::extract_text(&body)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

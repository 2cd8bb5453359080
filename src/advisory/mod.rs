//! AI advisory: a second opinion from a generative-AI text service
//!
//! The advisory never affects the risk score or verdict. Its raw text is
//! appended to the reasons list behind [`ADVISORY_LABEL`]; when the provider
//! fails for any reason the [`FALLBACK_ADVISORY`] payload is used instead, so
//! a request always completes.

pub mod gemini;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AdvisoryResult;
use crate::types::NormalizedPosting;

pub use gemini::{GeminiAdvisor, GeminiSettings};

/// Prefix of the advisory reason string
pub const ADVISORY_LABEL: &str = "AI Analysis: ";

/// Substituted for the advisory text whenever the provider fails
pub const FALLBACK_ADVISORY: &str = r#"{"verdict": "Unknown", "reason": "AI service unavailable"}"#;

/// Capability interface for an external advisory service
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    /// Ask for an opinion on a lower-cased message and domain.
    ///
    /// Returns the service's raw text. No schema is enforced on it.
    async fn advise(&self, message: &str, domain: &str) -> AdvisoryResult<String>;

    /// Whether the handler should consult this provider at all
    fn is_enabled(&self) -> bool {
        true
    }

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Rule-only configuration: the advisory is never consulted
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAdvisor;

#[async_trait]
impl AdvisoryProvider for DisabledAdvisor {
    async fn advise(&self, _message: &str, _domain: &str) -> AdvisoryResult<String> {
        Ok(String::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

/// Consult the provider and fold the outcome into one labelled reason.
///
/// Returns `None` when the provider is disabled.
pub async fn advisory_reason(
    provider: &dyn AdvisoryProvider,
    posting: &NormalizedPosting,
) -> Option<String> {
    if !provider.is_enabled() {
        return None;
    }

    let text = match provider.advise(&posting.message, &posting.domain).await {
        Ok(text) => {
            debug!(provider = provider.name(), len = text.len(), "Advisory received");
            text
        }
        Err(e) => {
            warn!(
                provider = provider.name(),
                timeout = e.is_timeout(),
                "Advisory failed, using fallback: {}",
                e
            );
            FALLBACK_ADVISORY.to_string()
        }
    };

    Some(format!("{}{}", ADVISORY_LABEL, text))
}

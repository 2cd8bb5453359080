//! Request and response payloads for the verification API

use serde::{Deserialize, Serialize};

use crate::scorer::{RuleOutcome, Verdict};

/// Incoming posting as submitted by the client.
///
/// Every field is optional; absent or `null` values are treated as empty
/// strings by [`VerificationRequest::normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationRequest {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl VerificationRequest {
    /// Lower-case all fields, defaulting missing ones to `""`
    pub fn normalize(self) -> NormalizedPosting {
        NormalizedPosting::new(
            self.company.as_deref().unwrap_or_default(),
            self.domain.as_deref().unwrap_or_default(),
            self.message.as_deref().unwrap_or_default(),
        )
    }
}

/// Lower-cased posting fields, the only input the scorer and advisory see
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPosting {
    pub company: String,
    pub domain: String,
    pub message: String,
}

impl NormalizedPosting {
    pub fn new(company: &str, domain: &str, message: &str) -> Self {
        Self {
            company: company.to_lowercase(),
            domain: domain.to_lowercase(),
            message: message.to_lowercase(),
        }
    }
}

/// Verdict returned by `POST /api/verify`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub company: String,
    pub risk_score: u32,
    pub verdict: Verdict,
    pub reasons: Vec<String>,
}

impl VerificationResponse {
    pub fn from_outcome(company: String, outcome: RuleOutcome) -> Self {
        let verdict = outcome.verdict();
        Self {
            company,
            risk_score: outcome.score,
            verdict,
            reasons: outcome.reasons,
        }
    }
}

/// Liveness payload for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            message: "InternShield Backend is running".to_string(),
        }
    }
}

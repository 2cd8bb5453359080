//! InternShield - internship posting scam scorer
//!
//! Scores a posting (company, contact domain, message text) against a fixed
//! table of keyword and domain heuristics and optionally asks a generative-AI
//! service for a second opinion.
//!
//! ## Call chain
//! HTTP request -> [`types::VerificationRequest`] -> normalize ->
//! [`scorer::RiskScorer`] -> [`advisory::AdvisoryProvider`] -> JSON response
//!
//! ## Quick Start
//!
//! ```rust
//! use internshield::scorer::{score, Verdict};
//! use internshield::types::VerificationRequest;
//!
//! let posting = VerificationRequest {
//!     company: Some("Acme".into()),
//!     domain: Some("".into()),
//!     message: Some("Pay a registration fee today only".into()),
//! }
//! .normalize();
//!
//! let outcome = score(&posting);
//! assert_eq!(outcome.score, 60);
//! assert_eq!(outcome.verdict(), Verdict::LikelyScam);
//! ```

pub mod advisory;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod scorer;
pub mod types;

pub use advisory::{AdvisoryProvider, DisabledAdvisor, GeminiAdvisor};
pub use config::{AdvisoryMode, ServiceConfig};
pub use error::{AdvisoryError, ConfigError};
pub use router::{build_router, AppState};
pub use scorer::{RiskScorer, RuleOutcome, Verdict};
pub use types::{NormalizedPosting, VerificationRequest, VerificationResponse};

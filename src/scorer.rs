//! Rule-based risk scorer
//!
//! Four fixed heuristics are evaluated in order over a lower-cased posting.
//! Each one either contributes nothing or adds its weight and exactly one
//! reason. The verdict is a pure function of the summed score.
//!
//! | Rule | Weight | Trigger |
//! |------|--------|---------|
//! | Payment / urgency keywords | 40 | message contains a keyword |
//! | Free email domain | 30 | domain contains a free-mail provider |
//! | Missing domain | 20 | trimmed domain is empty |
//! | Brand misuse | 30 | message names a brand the domain doesn't |
//!
//! | Verdict | Score |
//! |---------|-------|
//! | Likely Scam | >= 60 |
//! | Suspicious | >= 30 |
//! | Looks Legit | < 30 |

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::NormalizedPosting;

pub const SCAM_KEYWORDS: &[&str] = &[
    "fee",
    "fees",
    "pay",
    "payment",
    "registration",
    "processing",
    "urgent",
    "limited slots",
    "confirm now",
    "today only",
];

pub const FREE_EMAIL_DOMAINS: &[&str] = &["gmail", "yahoo", "outlook", "hotmail"];

pub const KNOWN_BRANDS: &[&str] = &["google", "microsoft", "amazon", "infosys", "tcs"];

pub const LIKELY_SCAM_THRESHOLD: u32 = 60;
pub const SUSPICIOUS_THRESHOLD: u32 = 30;

/// A single weighted heuristic
pub struct Rule {
    pub name: &'static str,
    pub weight: u32,
    pub reason: &'static str,
    trigger: fn(&NormalizedPosting) -> bool,
}

impl Rule {
    pub fn triggers(&self, posting: &NormalizedPosting) -> bool {
        (self.trigger)(posting)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// The rule table, in evaluation order
pub static RULES: [Rule; 4] = [
    Rule {
        name: "payment_keywords",
        weight: 40,
        reason: "Payment or urgency related keywords detected",
        trigger: has_payment_keywords,
    },
    Rule {
        name: "free_email_domain",
        weight: 30,
        reason: "Uses free/public email domain instead of official company domain",
        trigger: uses_free_email_domain,
    },
    Rule {
        name: "missing_domain",
        weight: 20,
        reason: "No official company domain provided",
        trigger: is_domain_missing,
    },
    Rule {
        name: "brand_misuse",
        weight: 30,
        reason: "Possible misuse of well-known company name",
        trigger: misuses_brand,
    },
];

fn has_payment_keywords(posting: &NormalizedPosting) -> bool {
    SCAM_KEYWORDS.iter().any(|kw| posting.message.contains(kw))
}

fn uses_free_email_domain(posting: &NormalizedPosting) -> bool {
    FREE_EMAIL_DOMAINS
        .iter()
        .any(|provider| posting.domain.contains(provider))
}

fn is_domain_missing(posting: &NormalizedPosting) -> bool {
    trim_blank(&posting.domain).is_empty()
}

/// Strip Unicode whitespace and the ASCII separators 0x1C-0x1F;
/// `str::trim` alone keeps the separators.
fn trim_blank(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

// Counts once even when several brands match.
fn misuses_brand(posting: &NormalizedPosting) -> bool {
    KNOWN_BRANDS
        .iter()
        .any(|brand| posting.message.contains(brand) && !posting.domain.contains(brand))
}

/// Categorical verdict derived from the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Looks Legit")]
    LooksLegit,
    #[serde(rename = "Suspicious")]
    Suspicious,
    #[serde(rename = "Likely Scam")]
    LikelyScam,
}

impl Verdict {
    pub fn from_score(score: u32) -> Self {
        if score >= LIKELY_SCAM_THRESHOLD {
            Verdict::LikelyScam
        } else if score >= SUSPICIOUS_THRESHOLD {
            Verdict::Suspicious
        } else {
            Verdict::LooksLegit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::LooksLegit => "Looks Legit",
            Verdict::Suspicious => "Suspicious",
            Verdict::LikelyScam => "Likely Scam",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated score and reasons, in rule order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub score: u32,
    pub reasons: Vec<String>,
}

impl RuleOutcome {
    fn apply(&mut self, rule: &Rule) {
        self.score += rule.weight;
        self.reasons.push(rule.reason.to_string());
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.score)
    }
}

/// Stateless scorer over the static rule table
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer;

impl RiskScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, posting: &NormalizedPosting) -> RuleOutcome {
        let mut outcome = RuleOutcome::default();
        for rule in RULES.iter() {
            if rule.triggers(posting) {
                debug!(rule = rule.name, weight = rule.weight, "Rule triggered");
                outcome.apply(rule);
            }
        }
        outcome
    }
}

/// Score a normalized posting with the default rule table
pub fn score(posting: &NormalizedPosting) -> RuleOutcome {
    RiskScorer::new().score(posting)
}

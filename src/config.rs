//! Service configuration
//!
//! Read once at startup from command-line flags with environment fallbacks
//! (a `.env` file is honoured by `main`). The resulting [`ServiceConfig`] is
//! immutable for the life of the process.
//!
//! | Env | Default |
//! |-----|---------|
//! | `INTERNSHIELD_BIND_ADDR` | `127.0.0.1:5000` |
//! | `INTERNSHIELD_ADVISORY` | `gemini` |
//! | `GEMINI_API_KEY` | required when advisory is `gemini` |
//! | `GEMINI_MODEL` | `gemini-1.5-flash` |
//! | `GEMINI_BASE_URL` | Gemini v1beta models endpoint |
//! | `INTERNSHIELD_ADVISORY_TIMEOUT_SECS` | `15` |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

use crate::advisory::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::advisory::GeminiSettings;
use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Which advisory provider to wire in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryMode {
    Gemini,
    Off,
}

impl FromStr for AdvisoryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(AdvisoryMode::Gemini),
            "off" | "none" | "disabled" => Ok(AdvisoryMode::Off),
            other => Err(ConfigError::UnknownAdvisoryMode(other.to_string())),
        }
    }
}

/// Command-line flags
#[derive(Parser, Debug, Clone)]
#[command(name = "internshield")]
#[command(about = "Score internship postings for scam likelihood")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "INTERNSHIELD_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// Advisory provider: gemini or off
    #[arg(long, env = "INTERNSHIELD_ADVISORY", default_value = "gemini")]
    pub advisory: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    /// Advisory request timeout in seconds
    #[arg(long, env = "INTERNSHIELD_ADVISORY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub advisory_timeout_secs: u64,
}

/// Validated, immutable service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub advisory: AdvisoryMode,
    /// Present iff `advisory` is [`AdvisoryMode::Gemini`]
    pub gemini: Option<GeminiSettings>,
}

impl ServiceConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let bind_addr = cli
            .bind
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                addr: cli.bind.clone(),
                source,
            })?;

        let advisory = cli.advisory.parse::<AdvisoryMode>()?;

        let gemini = match advisory {
            AdvisoryMode::Off => None,
            AdvisoryMode::Gemini => {
                let api_key = cli
                    .gemini_api_key
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ConfigError::MissingApiKey)?;

                let mut settings = GeminiSettings::new(api_key);
                settings.model = cli.gemini_model;
                settings.base_url = cli.gemini_base_url;
                settings.timeout = Duration::from_secs(cli.advisory_timeout_secs);
                Some(settings)
            }
        };

        Ok(Self {
            bind_addr,
            advisory,
            gemini,
        })
    }

    /// Parse flags and environment of the current process
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_cli(Cli::parse())
    }
}

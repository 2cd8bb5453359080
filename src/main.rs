//! internshield - HTTP server for internship scam scoring.
//!
//! Reads config from flags or env vars (see `config`):
//!   INTERNSHIELD_BIND_ADDR — listen address (default: 127.0.0.1:5000)
//!   INTERNSHIELD_ADVISORY  — gemini | off (default: gemini)
//!   GEMINI_API_KEY         — required when the advisory is gemini

use std::sync::Arc;

use anyhow::Context;
use internshield::advisory::{AdvisoryProvider, DisabledAdvisor, GeminiAdvisor};
use internshield::config::ServiceConfig;
use internshield::router::{build_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,internshield=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServiceConfig::from_env().context("invalid configuration")?;

    let advisor: Arc<dyn AdvisoryProvider> = match config.gemini.clone() {
        Some(settings) => {
            let gemini = GeminiAdvisor::new(settings).context("failed to build Gemini client")?;
            info!(
                model = %gemini.settings().model,
                timeout_secs = gemini.settings().timeout.as_secs(),
                "Gemini advisory enabled"
            );
            Arc::new(gemini)
        }
        None => {
            info!("Advisory disabled, scoring with rules only");
            Arc::new(DisabledAdvisor)
        }
    };

    let app = build_router(AppState::new(advisor));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    info!("internshield listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

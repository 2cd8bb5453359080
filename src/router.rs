//! Router construction for the scoring service.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::advisory::{AdvisoryProvider, DisabledAdvisor};
use crate::handlers;
use crate::scorer::RiskScorer;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub scorer: RiskScorer,
    pub advisor: Arc<dyn AdvisoryProvider>,
}

impl AppState {
    pub fn new(advisor: Arc<dyn AdvisoryProvider>) -> Self {
        Self {
            scorer: RiskScorer::new(),
            advisor,
        }
    }

    pub fn rules_only() -> Self {
        Self::new(Arc::new(DisabledAdvisor))
    }
}

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::health))
        .route("/api/verify", post(handlers::verify::verify))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

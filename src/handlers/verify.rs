//! POST /api/verify - score an internship posting.
//!
//! Always answers 200: missing fields are treated as empty and advisory
//! failures are replaced by the fallback reason.

use axum::{extract::State, Json};
use tracing::info;

use crate::advisory::advisory_reason;
use crate::router::AppState;
use crate::types::{VerificationRequest, VerificationResponse};

pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerificationRequest>,
) -> Json<VerificationResponse> {
    let posting = req.normalize();
    let mut outcome = state.scorer.score(&posting);

    info!(
        company = %posting.company,
        score = outcome.score,
        verdict = %outcome.verdict(),
        "Posting scored"
    );

    // Appended after every rule reason; never touches the score.
    if let Some(reason) = advisory_reason(state.advisor.as_ref(), &posting).await {
        outcome.reasons.push(reason);
    }

    Json(VerificationResponse::from_outcome(posting.company, outcome))
}

//! HTTP-level tests for the scoring router.
//!
//! Requests go through the full axum router via `tower::ServiceExt::oneshot`.
//! Gemini failure cases talk to a closed local port or to a local listener
//! that never answers; nothing leaves the machine.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use http_body_util::BodyExt;
use internshield::advisory::{
    AdvisoryProvider, GeminiAdvisor, GeminiSettings, ADVISORY_LABEL, FALLBACK_ADVISORY,
};
use internshield::error::{AdvisoryError, AdvisoryResult};
use internshield::router::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

use axum::http::{header, Method, Request, StatusCode};

// ── Test advisors ──────────────────────────────────────────────

struct CannedAdvisor(&'static str);

#[async_trait]
impl AdvisoryProvider for CannedAdvisor {
    async fn advise(&self, _message: &str, _domain: &str) -> AdvisoryResult<String> {
        Ok(self.0.to_string())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

struct DownAdvisor;

#[async_trait]
impl AdvisoryProvider for DownAdvisor {
    async fn advise(&self, _message: &str, _domain: &str) -> AdvisoryResult<String> {
        Err(AdvisoryError::InvalidResponse("service unavailable".into()))
    }

    fn name(&self) -> &str {
        "down"
    }
}

// ── Helpers ────────────────────────────────────────────────────

async fn post_verify(state: AppState, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/verify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn reasons(body: &Value) -> Vec<String> {
    body["reasons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_check_returns_status_message() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = build_router(AppState::rules_only())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"message": "InternShield Backend is running"}));
}

#[tokio::test]
async fn registration_fee_without_domain_is_likely_scam() {
    let (status, body) = post_verify(
        AppState::rules_only(),
        json!({
            "company": "Acme",
            "domain": "",
            "message": "Pay a registration fee today only to confirm your internship"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"], "acme");
    assert_eq!(body["risk_score"], 60);
    assert_eq!(body["verdict"], "Likely Scam");
    assert_eq!(
        reasons(&body),
        vec![
            "Payment or urgency related keywords detected",
            "No official company domain provided",
        ]
    );
}

#[tokio::test]
async fn clean_posting_looks_legit() {
    let (status, body) = post_verify(
        AppState::rules_only(),
        json!({
            "company": "Foo",
            "domain": "foo.com",
            "message": "Welcome aboard, here are your onboarding docs"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_score"], 0);
    assert_eq!(body["verdict"], "Looks Legit");
    assert!(reasons(&body).is_empty());
}

#[tokio::test]
async fn free_mail_with_urgency_scores_seventy() {
    let (_, body) = post_verify(
        AppState::rules_only(),
        json!({
            "domain": "candidate@gmail.com",
            "message": "Please confirm now, limited slots available"
        }),
    )
    .await;

    assert_eq!(body["risk_score"], 70);
    assert_eq!(body["verdict"], "Likely Scam");
    assert_eq!(body["company"], "");
}

#[tokio::test]
async fn empty_body_object_is_tolerated() {
    let (status, body) = post_verify(AppState::rules_only(), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["company"], "");
    assert_eq!(body["risk_score"], 20);
    assert_eq!(body["verdict"], "Looks Legit");
    assert_eq!(reasons(&body), vec!["No official company domain provided"]);
}

#[tokio::test]
async fn mixed_case_input_is_normalized() {
    let (_, body) = post_verify(
        AppState::rules_only(),
        json!({
            "company": "MegaCorp",
            "domain": "HR@Outlook.COM",
            "message": "Join MICROSOFT now"
        }),
    )
    .await;

    assert_eq!(body["company"], "megacorp");
    assert_eq!(body["risk_score"], 60);
    assert_eq!(
        reasons(&body),
        vec![
            "Uses free/public email domain instead of official company domain",
            "Possible misuse of well-known company name",
        ]
    );
}

#[tokio::test]
async fn advisory_reason_is_appended_last() {
    let state = AppState::new(Arc::new(CannedAdvisor(
        r#"{"verdict": "Scam", "reason": "upfront fee"}"#,
    )));
    let (_, body) = post_verify(
        state,
        json!({"domain": "", "message": "urgent: pay processing fee"}),
    )
    .await;

    // The advisory never moves the score.
    assert_eq!(body["risk_score"], 60);
    let reasons = reasons(&body);
    assert_eq!(reasons.len(), 3);
    assert_eq!(
        reasons[2],
        r#"AI Analysis: {"verdict": "Scam", "reason": "upfront fee"}"#
    );
}

#[tokio::test]
async fn advisory_on_clean_posting_adds_single_reason() {
    let state = AppState::new(Arc::new(CannedAdvisor("legit")));
    let (_, body) = post_verify(
        state,
        json!({"company": "Foo", "domain": "foo.com", "message": "Welcome aboard"}),
    )
    .await;

    assert_eq!(body["risk_score"], 0);
    assert_eq!(reasons(&body), vec!["AI Analysis: legit"]);
}

#[tokio::test]
async fn advisory_failure_still_returns_ok_with_fallback() {
    let state = AppState::new(Arc::new(DownAdvisor));
    let (status, body) = post_verify(
        state,
        json!({"domain": "candidate@gmail.com", "message": "confirm now"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_score"], 70);
    assert_eq!(body["verdict"], "Likely Scam");
    let reasons = reasons(&body);
    assert_eq!(reasons.len(), 3);
    assert_eq!(reasons[2], format!("{}{}", ADVISORY_LABEL, FALLBACK_ADVISORY));
}

#[tokio::test]
async fn unreachable_gemini_falls_back() {
    let mut settings = GeminiSettings::new("test-key");
    settings.base_url = "http://127.0.0.1:9/v1beta/models".into();
    settings.timeout = Duration::from_secs(2);
    let advisor = GeminiAdvisor::new(settings).unwrap();

    let (status, body) = post_verify(
        AppState::new(Arc::new(advisor)),
        json!({"company": "Foo", "domain": "foo.com", "message": "hello"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_score"], 0);
    assert_eq!(
        reasons(&body),
        vec![format!("{}{}", ADVISORY_LABEL, FALLBACK_ADVISORY)]
    );
}

#[tokio::test]
async fn silent_gemini_times_out_to_fallback() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut settings = GeminiSettings::new("test-key");
    settings.base_url = format!("http://{}/v1beta/models", listener.local_addr().unwrap());
    settings.timeout = Duration::from_secs(1);
    let advisor = GeminiAdvisor::new(settings).unwrap();

    // Accept and never answer.
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let (status, body) = post_verify(
        AppState::new(Arc::new(advisor)),
        json!({"domain": "", "message": "urgent: pay the fee"}),
    )
    .await;
    server.abort();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_score"], 60);
    assert_eq!(body["verdict"], "Likely Scam");
    let reasons = reasons(&body);
    assert_eq!(reasons.len(), 3);
    assert_eq!(reasons[2], format!("{}{}", ADVISORY_LABEL, FALLBACK_ADVISORY));
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/verify")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = build_router(AppState::rules_only())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

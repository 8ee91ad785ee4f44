use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use outreach_ai::error::AppError;
use outreach_ai::workflows::matching::{
    CompositeScore, ConfidenceTier, FallbackConfig, MatchRequest, MatchingEngine,
    OrganizationCandidate, OrganizationId,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    pub(crate) required_skills: Vec<String>,
    pub(crate) domain: String,
    /// Evaluation date; defaults to today.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    pub(crate) candidates: Vec<OrganizationCandidate>,
    /// Per-request fallback policy override.
    #[serde(default)]
    pub(crate) fallback: Option<FallbackConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankResponse {
    pub(crate) today: NaiveDate,
    pub(crate) ranked: Vec<RankedCandidateView>,
    /// Full audit map for caller-side storage.
    pub(crate) scores: BTreeMap<OrganizationId, CompositeScore>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankedCandidateView {
    pub(crate) id: OrganizationId,
    pub(crate) name: String,
    pub(crate) overall: u8,
    pub(crate) confidence: ConfidenceTier,
}

pub(crate) fn router(engine: Arc<MatchingEngine>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/match/rank", post(rank_endpoint))
        .layer(Extension(engine))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rank_endpoint(
    Extension(engine): Extension<Arc<MatchingEngine>>,
    Json(payload): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let RankRequest {
        required_skills,
        domain,
        today,
        candidates,
        fallback,
    } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let request = MatchRequest {
        required_skills,
        domain,
        today,
    };

    let outcome = engine.rank(request, candidates, fallback).await?;

    let ranked = outcome
        .ranked
        .iter()
        .map(|candidate| {
            let overall_confidence = outcome
                .scores
                .get(&candidate.id)
                .map(|score| (score.overall, score.confidence))
                .unwrap_or((0, ConfidenceTier::Low));
            RankedCandidateView {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                overall: overall_confidence.0,
                confidence: overall_confidence.1,
            }
        })
        .collect();

    Ok(Json(RankResponse {
        today,
        ranked,
        scores: outcome.scores,
    }))
}

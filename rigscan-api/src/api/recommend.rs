//! Streamed recommendation endpoint
//!
//! POST /api/recommend

use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    routing::post,
    Json, Router,
};
use futures::StreamExt;
use rigscan_common::{Error, UsageProfile};
use serde::Deserialize;
use std::convert::Infallible;
use uuid::Uuid;

use crate::{error::ApiResult, AppState};

/// POST /api/recommend request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub analysis_id: String,
    pub profile: String,
}

/// POST /api/recommend
///
/// Failures before the stream opens render the structured JSON envelope;
/// once the plain-text body starts, later failures arrive in-band.
pub async fn recommend(
    State(state): State<AppState>,
    request: Result<Json<RecommendRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = request.map_err(|e| Error::InvalidRequest(e.body_text()))?;

    let analysis_id = Uuid::parse_str(&request.analysis_id).map_err(|_| {
        Error::InvalidRequest(format!("Invalid analysis id: {}", request.analysis_id))
    })?;
    let usage = UsageProfile::from_label(&request.profile).ok_or_else(|| {
        Error::InvalidRequest(format!("Unknown usage profile: {}", request.profile))
    })?;

    let stream = state.orchestrator.begin(analysis_id, usage).await?;

    // The relay task owns persistence and outlives this response; dropping
    // its handle detaches it.
    let body = Body::from_stream(stream.chunks.map(Ok::<_, Infallible>));
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .map_err(|e| Error::Internal(format!("Failed to build response: {e}")))?;
    Ok(response)
}

/// Build recommendation routes
pub fn recommend_routes() -> Router<AppState> {
    Router::new().route("/api/recommend", post(recommend))
}

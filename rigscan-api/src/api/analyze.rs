//! Hardware snapshot ingestion endpoint
//!
//! POST /api/analyze

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rigscan_common::normalize;
use serde_json::{json, Value};

use crate::{error::ApiResult, AppState};

/// POST /api/analyze
///
/// Accepts any of the historical snapshot shapes, archives the payload
/// exactly as received, and persists the canonical profile derived from it.
/// Returns 201 with the new record's id.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(payload) =
        payload.map_err(|e| rigscan_common::Error::malformed("body", e.body_text()))?;

    let profile = normalize::normalize(&payload)?;

    // Agents may stamp the snapshot themselves; keep it when parseable.
    let timestamp = payload
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));

    let record = state.store.create(&profile, &payload, timestamp).await?;

    tracing::info!(
        analysis_id = %record.id,
        cpu = %record.hardware_profile.cpu.name,
        "analysis stored"
    );

    // `id` is duplicated at the root because deployed agents read it there.
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "id": record.id,
            "data": {
                "id": record.id,
                "createdAt": record.created_at,
            },
            "timestamp": Utc::now(),
        })),
    ))
}

/// Build ingestion routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze))
}

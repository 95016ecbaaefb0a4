//! Stored analysis report endpoint
//!
//! GET /api/report/{id}

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use rigscan_common::{render, Error};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{error::ApiResult, AppState};

/// GET /api/report/{id}
///
/// Serves the full stored analysis: canonical profile, plain-text summary,
/// and whatever the latest recommendation cycle attached.
pub async fn report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    // Shape-check before touching the store so junk ids are 400, not 404.
    let id = Uuid::parse_str(&id)
        .map_err(|_| Error::InvalidRequest(format!("Invalid analysis id: {id}")))?;

    let record = state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Analysis not found".to_string()))?;

    let summary = render::profile_summary(&record.hardware_profile);

    Ok(Json(json!({
        "success": true,
        "data": {
            "id": record.id,
            "createdAt": record.created_at,
            "hardwareProfile": record.hardware_profile,
            "summary": summary,
            "usageProfile": record.usage_profile,
            "performanceScore": record.performance_score,
            "recommendations": record.recommendations,
        },
        "timestamp": Utc::now(),
    })))
}

/// Build report routes
pub fn report_routes() -> Router<AppState> {
    Router::new().route("/api/report/:id", get(report))
}

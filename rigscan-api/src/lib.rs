//! rigscan-api library interface
//!
//! Exposes the router, state, and service seams so integration tests can
//! drive the full HTTP surface without binding a socket.

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod recommend;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::llm::RecommendationGenerator;
use crate::recommend::RecommendationOrchestrator;
use crate::store::AnalysisStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysis persistence
    pub store: Arc<dyn AnalysisStore>,
    /// Recommendation cycle coordinator
    pub orchestrator: Arc<RecommendationOrchestrator>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AnalysisStore>,
        generator: Arc<dyn RecommendationGenerator>,
    ) -> Self {
        let orchestrator = Arc::new(RecommendationOrchestrator::new(
            Arc::clone(&store),
            generator,
        ));
        Self {
            store,
            orchestrator,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::analyze_routes())
        .merge(api::report_routes())
        .merge(api::recommend_routes())
        .merge(api::health_routes())
        .with_state(state)
}

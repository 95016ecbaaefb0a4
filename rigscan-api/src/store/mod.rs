//! Analysis record persistence
//!
//! Handlers and the orchestrator depend on the [`AnalysisStore`] trait; the
//! concrete backend is constructed once in `main` and injected through
//! `AppState`. There is no ambient or lazily initialized connection.

pub mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rigscan_common::{HardwareProfile, Result, UsageProfile};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{AnalysisRecord, RecommendationSet};

/// Persistence operations the analysis pipeline requires.
///
/// An absent id is `Ok(None)`, never an error; the caller decides whether
/// that becomes a 404. Backend failures surface as `Error::Persistence`.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persist a new analysis. The store mints the id, and the creation
    /// time when the agent did not report a snapshot timestamp.
    async fn create(
        &self,
        hardware_profile: &HardwareProfile,
        raw_data: &Value,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<AnalysisRecord>;

    /// Fetch a record by id.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<AnalysisRecord>>;

    /// Overwrite the recommendation fields of a record as a unit. There is
    /// no merge: a later cycle fully replaces an earlier one, and when two
    /// cycles for the same id race the last writer wins.
    async fn attach_recommendations(
        &self,
        id: Uuid,
        recommendations: &RecommendationSet,
        score: u8,
        usage: UsageProfile,
    ) -> Result<Option<AnalysisRecord>>;
}

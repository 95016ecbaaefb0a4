//! Analysis record documents
//!
//! Wire format is camelCase JSON, matching the documents the store archives
//! and the report endpoint serves.

use chrono::{DateTime, Utc};
use rigscan_common::{HardwareProfile, UsageProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One persisted hardware analysis
///
/// `id`, `created_at`, `raw_data` and `hardware_profile` are immutable after
/// creation. The remaining fields are overwritten as a unit by each
/// recommendation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Record identity, minted by the store
    pub id: Uuid,
    /// Creation timestamp, minted by the store unless the agent supplied one
    pub created_at: DateTime<Utc>,
    /// Ingest payload archived exactly as received
    pub raw_data: Value,
    /// Canonical profile derived at ingestion
    pub hardware_profile: HardwareProfile,
    /// Usage profile of the latest recommendation cycle
    pub usage_profile: Option<UsageProfile>,
    /// Latest generated recommendations
    pub recommendations: Option<RecommendationSet>,
    /// Score computed by the latest recommendation cycle
    pub performance_score: Option<u8>,
}

/// Result of one recommendation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSet {
    /// Accumulated recommendation text, trimmed
    pub content: String,
    /// Usage profile the cycle ran under
    pub usage_profile: UsageProfile,
    /// Score persisted alongside the text
    pub performance_score: u8,
    /// When generation finished
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_set_wire_names() {
        let set = RecommendationSet {
            content: "Upgrade the GPU.".to_string(),
            usage_profile: UsageProfile::Gaming,
            performance_score: 72,
            generated_at: Utc::now(),
        };
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["content"], "Upgrade the GPU.");
        assert_eq!(json["usageProfile"], "gaming");
        assert_eq!(json["performanceScore"], 72);
        assert!(json["generatedAt"].is_string());
    }
}

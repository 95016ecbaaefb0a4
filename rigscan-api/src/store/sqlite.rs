//! SQLite-backed analysis store
//!
//! Documents (raw payload, canonical profile, recommendation set) are stored
//! as JSON TEXT columns, timestamps as RFC 3339 TEXT, ids as UUID TEXT.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use uuid::Uuid;

use rigscan_common::{Error, HardwareProfile, Result, UsageProfile};
use serde_json::Value;

use crate::models::{AnalysisRecord, RecommendationSet};
use crate::store::AnalysisStore;

/// Analysis store over a SQLite connection pool
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database at `db_path`, creating the file and the analyses
    /// table when missing.
    pub async fn connect(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // SQLite URI with mode=rwc (read, write, create)
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        tracing::debug!("Connecting to database: {}", db_url);

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(|e| Error::Persistence(format!("database connect failed: {e}")))?;

        let store = Self { pool };
        store.init_tables().await?;
        Ok(store)
    }

    /// In-memory database for tests. Pinned to a single pooled connection:
    /// every `:memory:` connection is its own private database, so a larger
    /// pool would scatter rows across databases.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(":memory:")
            .await
            .map_err(|e| Error::Persistence(format!("database connect failed: {e}")))?;

        let store = Self { pool };
        store.init_tables().await?;
        Ok(store)
    }

    async fn init_tables(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS analyses (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                raw_data TEXT NOT NULL,
                hardware_profile TEXT NOT NULL,
                usage_profile TEXT,
                recommendations TEXT,
                performance_score INTEGER
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        tracing::info!("Database tables initialized (analyses)");
        Ok(())
    }
}

#[async_trait]
impl AnalysisStore for SqliteStore {
    async fn create(
        &self,
        hardware_profile: &HardwareProfile,
        raw_data: &Value,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<AnalysisRecord> {
        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            created_at: timestamp.unwrap_or_else(Utc::now),
            raw_data: raw_data.clone(),
            hardware_profile: hardware_profile.clone(),
            usage_profile: None,
            recommendations: None,
            performance_score: None,
        };

        let raw = serde_json::to_string(&record.raw_data)
            .map_err(|e| Error::Internal(format!("Failed to serialize raw data: {e}")))?;
        let profile = serde_json::to_string(&record.hardware_profile)
            .map_err(|e| Error::Internal(format!("Failed to serialize hardware profile: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO analyses (id, created_at, raw_data, hardware_profile)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.created_at.to_rfc3339())
        .bind(&raw)
        .bind(&profile)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<AnalysisRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, created_at, raw_data, hardware_profile,
                   usage_profile, recommendations, performance_score
            FROM analyses
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?;

        row.map(row_to_record).transpose()
    }

    async fn attach_recommendations(
        &self,
        id: Uuid,
        recommendations: &RecommendationSet,
        score: u8,
        usage: UsageProfile,
    ) -> Result<Option<AnalysisRecord>> {
        let recommendations = serde_json::to_string(recommendations)
            .map_err(|e| Error::Internal(format!("Failed to serialize recommendations: {e}")))?;

        // Whole-value overwrite in one UPDATE; concurrent cycles for the
        // same id race here and the last writer wins.
        let result = sqlx::query(
            r#"
            UPDATE analyses
            SET usage_profile = ?, recommendations = ?, performance_score = ?
            WHERE id = ?
            "#,
        )
        .bind(usage.as_str())
        .bind(&recommendations)
        .bind(score as i64)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }
}

fn persistence(e: sqlx::Error) -> Error {
    Error::Persistence(e.to_string())
}

fn row_to_record(row: sqlx::sqlite::SqliteRow) -> Result<AnalysisRecord> {
    let id: String = row.get("id");
    let id = Uuid::parse_str(&id)
        .map_err(|e| Error::Internal(format!("Failed to parse stored id: {e}")))?;

    let created_at: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {e}")))?
        .with_timezone(&Utc);

    let raw_data: String = row.get("raw_data");
    let raw_data: Value = serde_json::from_str(&raw_data)
        .map_err(|e| Error::Internal(format!("Failed to deserialize raw data: {e}")))?;

    let hardware_profile: String = row.get("hardware_profile");
    let hardware_profile: HardwareProfile = serde_json::from_str(&hardware_profile)
        .map_err(|e| Error::Internal(format!("Failed to deserialize hardware profile: {e}")))?;

    let usage_profile: Option<String> = row.get("usage_profile");
    let usage_profile = match usage_profile {
        Some(label) => Some(UsageProfile::from_label(&label).ok_or_else(|| {
            Error::Internal(format!("Unrecognized stored usage profile: {label}"))
        })?),
        None => None,
    };

    let recommendations: Option<String> = row.get("recommendations");
    let recommendations: Option<RecommendationSet> = recommendations
        .map(|doc| serde_json::from_str(&doc))
        .transpose()
        .map_err(|e| Error::Internal(format!("Failed to deserialize recommendations: {e}")))?;

    let performance_score: Option<i64> = row.get("performance_score");

    Ok(AnalysisRecord {
        id,
        created_at,
        raw_data,
        hardware_profile,
        usage_profile,
        recommendations,
        performance_score: performance_score.map(|s| s.clamp(0, 100) as u8),
    })
}

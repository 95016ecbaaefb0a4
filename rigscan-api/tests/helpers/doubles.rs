//! Test doubles for the persistence and generation seams
//!
//! `MemoryStore` stands in for the SQLite store, `ScriptedGenerator` for
//! the Groq client. Both let tests inject failures at exact points in a
//! recommendation cycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rigscan_api::llm::{ChunkStream, RecommendationGenerator};
use rigscan_api::models::{AnalysisRecord, RecommendationSet};
use rigscan_api::store::AnalysisStore;
use rigscan_common::{Error, HardwareProfile, Result, UsageProfile};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory analysis store
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<Uuid, AnalysisRecord>>,
    fail_attach: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a stored record.
    pub fn record(&self, id: Uuid) -> Option<AnalysisRecord> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    /// Make the next `attach_recommendations` call fail.
    pub fn fail_next_attach(&self, message: &str) {
        *self.fail_attach.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
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
        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<AnalysisRecord>> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn attach_recommendations(
        &self,
        id: Uuid,
        recommendations: &RecommendationSet,
        score: u8,
        usage: UsageProfile,
    ) -> Result<Option<AnalysisRecord>> {
        if let Some(message) = self.fail_attach.lock().unwrap().take() {
            return Err(Error::Persistence(message));
        }
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };
        record.usage_profile = Some(usage);
        record.recommendations = Some(recommendations.clone());
        record.performance_score = Some(score);
        Ok(Some(record.clone()))
    }
}

/// One scripted step of a generation stream
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Yield a text fragment
    Chunk(&'static str),
    /// Fail the stream at this point
    Fail(&'static str),
    /// Park forever without ending the stream; models an upstream that
    /// stays open while a caller disconnects
    Hang,
}

/// Scripted generation capability
pub struct ScriptedGenerator {
    script: Vec<Step>,
    refuse: Option<&'static str>,
}

impl ScriptedGenerator {
    /// Generator whose streams replay `script` in order.
    pub fn yielding(script: Vec<Step>) -> Self {
        Self {
            script,
            refuse: None,
        }
    }

    /// Generator whose `open_stream` itself fails.
    pub fn refusing(message: &'static str) -> Self {
        Self {
            script: Vec::new(),
            refuse: Some(message),
        }
    }
}

#[async_trait]
impl RecommendationGenerator for ScriptedGenerator {
    async fn open_stream(
        &self,
        _profile: &HardwareProfile,
        _usage: UsageProfile,
    ) -> Result<ChunkStream> {
        if let Some(message) = self.refuse {
            return Err(Error::Generation(message.to_string()));
        }
        let script = self.script.clone();
        let stream = async_stream::stream! {
            for step in script {
                match step {
                    Step::Chunk(text) => yield Ok(text.to_string()),
                    Step::Fail(message) => {
                        yield Err(Error::Generation(message.to_string()));
                        return;
                    }
                    Step::Hang => {
                        std::future::pending::<()>().await;
                    }
                }
            }
        };
        Ok(Box::pin(stream))
    }
}

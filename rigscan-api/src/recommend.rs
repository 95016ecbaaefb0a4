//! Recommendation stream orchestration
//!
//! Walks one recommendation cycle through its phases: fetch the stored
//! analysis, score it, open the generation stream, relay fragments to the
//! caller while accumulating them, then persist the final text. The
//! structured-error-versus-partial-stream decision lives here and nowhere
//! else: anything that fails before the first generated fragment surfaces
//! as an error with nothing streamed; anything after it degrades to an
//! in-band notice, and whatever was accumulated is still persisted.

use chrono::Utc;
use futures::StreamExt;
use rigscan_common::{score, Error, Result, UsageProfile};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

use crate::llm::{ChunkStream, RecommendationGenerator};
use crate::models::RecommendationSet;
use crate::store::AnalysisStore;

/// Relay channel depth: enough to decouple upstream receipt from client
/// writes without reordering or unbounded buffering.
const RELAY_CHANNEL_CAPACITY: usize = 32;

/// In-band notice sent as the final fragment when generation fails after
/// output has already been delivered. Transport-only, never persisted.
pub const GENERATION_FAILURE_NOTICE: &str =
    "\n\nError generating recommendations. Please try again.";

/// In-band notice sent when the final persistence write fails while the
/// transport is still open.
pub const PERSISTENCE_FAILURE_NOTICE: &str =
    "\n\nWarning: recommendations were generated but could not be saved.";

/// A running recommendation stream handed to the transport.
pub struct ActiveStream {
    /// Ordered text fragments for the response body. Dropping this is how
    /// the caller disconnects; the relay observes it and stops consuming
    /// the generation stream.
    pub chunks: ReceiverStream<String>,
    /// Relay worker; completes after the persistence attempt settles.
    pub task: JoinHandle<()>,
}

/// Coordinates recommendation cycles against the injected store and
/// generation capability. One instance serves the whole process; each
/// `begin` call runs an independent cycle.
pub struct RecommendationOrchestrator {
    store: Arc<dyn AnalysisStore>,
    generator: Arc<dyn RecommendationGenerator>,
}

impl RecommendationOrchestrator {
    pub fn new(
        store: Arc<dyn AnalysisStore>,
        generator: Arc<dyn RecommendationGenerator>,
    ) -> Self {
        Self { store, generator }
    }

    /// Run the pre-stream phases of a cycle and hand back the live stream.
    ///
    /// The id and usage profile are assumed already validated at the
    /// boundary. The first generated fragment is pulled before this
    /// returns: an upstream that errors out or ends without producing
    /// anything is a structured failure, never an empty success stream.
    pub async fn begin(&self, analysis_id: Uuid, usage: UsageProfile) -> Result<ActiveStream> {
        tracing::debug!(analysis_id = %analysis_id, usage = %usage, "fetching analysis");
        let record = self
            .store
            .get_by_id(analysis_id)
            .await?
            .ok_or_else(|| Error::NotFound("Analysis not found".to_string()))?;

        // Scored before any byte is streamed so the score persists with
        // the text no matter how the generation call behaves.
        let performance_score = score::performance_score(&record.hardware_profile, usage);
        tracing::debug!(
            analysis_id = %analysis_id,
            score = performance_score,
            "scored stored profile"
        );

        let mut upstream = self
            .generator
            .open_stream(&record.hardware_profile, usage)
            .await?;

        let first = match upstream.next().await {
            Some(Ok(fragment)) => fragment,
            Some(Err(e)) => {
                tracing::warn!(
                    analysis_id = %analysis_id,
                    error = %e,
                    "generation failed before producing output"
                );
                return Err(e);
            }
            None => {
                return Err(Error::Generation(
                    "generation stream ended before producing output".to_string(),
                ));
            }
        };

        tracing::info!(analysis_id = %analysis_id, usage = %usage, "generation stream opened");

        let (tx, rx) = mpsc::channel(RELAY_CHANNEL_CAPACITY);
        let store = Arc::clone(&self.store);
        let task = tokio::spawn(relay(
            store,
            analysis_id,
            usage,
            performance_score,
            upstream,
            first,
            tx,
        ));

        Ok(ActiveStream {
            chunks: ReceiverStream::new(rx),
            task,
        })
    }
}

/// Forward fragments to the caller in arrival order while accumulating
/// them, then persist whatever was collected.
///
/// The accumulator only ever holds text received from the generation
/// stream; in-band notices go to the transport alone. A caller disconnect
/// stops upstream consumption promptly but still persists the partial
/// accumulator: generated text is work already paid for.
async fn relay(
    store: Arc<dyn AnalysisStore>,
    analysis_id: Uuid,
    usage: UsageProfile,
    performance_score: u8,
    mut upstream: ChunkStream,
    first: String,
    tx: mpsc::Sender<String>,
) {
    let mut accumulator = first.clone();

    if tx.send(first).await.is_ok() {
        loop {
            tokio::select! {
                // Caller closed the response body: stop pulling from the
                // generation stream, keep what was accumulated.
                _ = tx.closed() => {
                    tracing::info!(analysis_id = %analysis_id, "caller disconnected mid-stream");
                    break;
                }
                next = upstream.next() => match next {
                    Some(Ok(fragment)) => {
                        accumulator.push_str(&fragment);
                        if tx.send(fragment).await.is_err() {
                            tracing::info!(analysis_id = %analysis_id, "caller disconnected mid-stream");
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        // Delivered fragments stand. Notify in-band, stop
                        // forwarding, and fall through to persistence with
                        // the partial accumulator.
                        tracing::warn!(
                            analysis_id = %analysis_id,
                            error = %e,
                            "generation failed mid-stream"
                        );
                        let _ = tx.send(GENERATION_FAILURE_NOTICE.to_string()).await;
                        break;
                    }
                    None => break,
                }
            }
        }
    } else {
        tracing::info!(analysis_id = %analysis_id, "caller disconnected before first fragment");
    }

    // Releases the upstream HTTP response so no further generation is
    // requested once the cycle stops forwarding.
    drop(upstream);

    let recommendations = RecommendationSet {
        content: accumulator.trim().to_string(),
        usage_profile: usage,
        performance_score,
        generated_at: Utc::now(),
    };

    // Best-effort durability after best-effort delivery: a failed write is
    // logged and noticed in-band, but never retracts a completed transport.
    match store
        .attach_recommendations(analysis_id, &recommendations, performance_score, usage)
        .await
    {
        Ok(Some(_)) => {
            tracing::info!(
                analysis_id = %analysis_id,
                content_len = recommendations.content.len(),
                score = performance_score,
                "recommendations persisted"
            );
        }
        Ok(None) => {
            tracing::error!(analysis_id = %analysis_id, "analysis vanished before persistence");
            let _ = tx.send(PERSISTENCE_FAILURE_NOTICE.to_string()).await;
        }
        Err(e) => {
            tracing::error!(
                analysis_id = %analysis_id,
                error = %e,
                "failed to persist recommendations"
            );
            let _ = tx.send(PERSISTENCE_FAILURE_NOTICE.to_string()).await;
        }
    }
}

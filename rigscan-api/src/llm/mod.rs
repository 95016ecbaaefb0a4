//! Recommendation generation capability
//!
//! The orchestrator depends on the [`RecommendationGenerator`] trait: given
//! a canonical hardware profile and a usage profile, produce an ordered
//! stream of text fragments. [`GroqGenerator`] is the production backend.

pub mod groq;

pub use groq::GroqGenerator;

use async_trait::async_trait;
use futures::stream::Stream;
use rigscan_common::{HardwareProfile, Result, UsageProfile};
use std::pin::Pin;

/// Ordered stream of generated text fragments.
///
/// An `Err` item means generation failed at that point; no further items
/// follow it.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// External text-generation capability.
#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    /// Open a generation stream seeded with the canonical profile and the
    /// usage profile. Fails with `Error::Config` when no credential is
    /// configured and `Error::Generation` when the upstream call cannot be
    /// started.
    async fn open_stream(
        &self,
        profile: &HardwareProfile,
        usage: UsageProfile,
    ) -> Result<ChunkStream>;
}

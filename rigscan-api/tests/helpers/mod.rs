//! Shared test helpers
//!
//! Doubles for the store and generation seams plus ingest payload fixtures.

pub mod doubles;
pub mod fixtures;

pub use doubles::{MemoryStore, ScriptedGenerator, Step};
pub use fixtures::{agent_payload, legacy_payload, report_payload, test_profile};

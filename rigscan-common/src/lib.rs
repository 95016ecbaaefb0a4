//! # RigScan Common Library
//!
//! Domain core shared by the RigScan services:
//! - Canonical hardware model (HardwareProfile)
//! - Ingest payload normalization (shape detection, unit reconciliation)
//! - Usage profiles and performance scoring
//! - Plain-text rendering helpers
//! - Common error types

pub mod error;
pub mod hardware;
pub mod normalize;
pub mod profile;
pub mod render;
pub mod score;

pub use error::{Error, Result};
pub use hardware::HardwareProfile;
pub use profile::UsageProfile;

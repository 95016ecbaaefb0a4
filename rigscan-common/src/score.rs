//! Performance scoring
//!
//! Deterministic, pure functions from a normalized [`HardwareProfile`] and a
//! [`UsageProfile`] to a 0-100 score. Component ratios are measured against
//! fixed reference capacities, weighted per usage profile, scaled to a
//! percentage, rounded, then clamped. Scoring never fails and never touches
//! raw payloads.

use crate::hardware::HardwareProfile;
use crate::profile::UsageProfile;

/// CPU reference throughput, logical cores times MHz.
const CPU_REFERENCE: f64 = 40_000.0;
/// GPU reference memory, 8 GiB.
const GPU_REFERENCE_BYTES: f64 = 8.0 * 1024.0 * 1024.0 * 1024.0;
/// RAM reference capacity, 16 GiB.
const RAM_REFERENCE_BYTES: f64 = 16.0 * 1024.0 * 1024.0 * 1024.0;

/// Per-component ratios against the reference capacities, each capped at 100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub cpu: f64,
    pub gpu: f64,
    pub ram: f64,
}

/// Compute the raw component ratios for a profile.
///
/// A machine with no GPU, or a GPU with unreported memory, contributes
/// exactly zero to the GPU component; there is no substitute floor value.
pub fn component_scores(profile: &HardwareProfile) -> ComponentScores {
    let cpu =
        (profile.cpu.cores as f64 * profile.cpu.frequency_mhz / CPU_REFERENCE).min(100.0);
    let gpu_memory = profile
        .primary_gpu()
        .and_then(|g| g.memory_bytes)
        .unwrap_or(0);
    let gpu = (gpu_memory as f64 / GPU_REFERENCE_BYTES).min(100.0);
    let ram = (profile.memory.total_bytes as f64 / RAM_REFERENCE_BYTES).min(100.0);
    ComponentScores { cpu, gpu, ram }
}

/// Weighted 0-100 performance score for a profile under a usage profile.
///
/// The weighted ratio sum is scaled to a percentage, rounded, and only then
/// clamped to 100. Rounding before clamping matches the scores served since
/// the first release; changing the order would shift persisted history.
pub fn performance_score(profile: &HardwareProfile, usage: UsageProfile) -> u8 {
    let c = component_scores(profile);
    let w = usage.weights();
    let weighted = c.cpu * w.cpu + c.gpu * w.gpu + c.ram * w.ram;
    (weighted * 100.0).round().min(100.0) as u8
}

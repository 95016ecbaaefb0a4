//! Canonical hardware inventory model
//!
//! Every ingest payload, regardless of which agent generation produced it,
//! is reconciled into this one shape by [`crate::normalize`]. Downstream
//! consumers (scoring, reports, prompt rendering) never see raw payloads.
//!
//! Wire format is camelCase JSON; all capacities are bytes after
//! normalization.

use serde::{Deserialize, Serialize};

/// Canonical, fully normalized hardware snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProfile {
    /// Processor description
    pub cpu: CpuInfo,
    /// System memory, all fields in bytes
    pub memory: MemoryInfo,
    /// Storage devices (may be empty)
    pub storage: Vec<StorageDevice>,
    /// Graphics adapters (may be empty)
    pub gpu: Vec<GpuInfo>,
    /// Operating system description
    pub os: OsInfo,
}

impl HardwareProfile {
    /// First reported GPU, the one scoring and summaries consider primary.
    pub fn primary_gpu(&self) -> Option<&GpuInfo> {
        self.gpu.first()
    }
}

/// Processor description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    /// Model name as reported by the agent
    pub name: String,
    /// Logical core count
    pub cores: u32,
    /// Clock frequency in MHz (legacy agents reported GHz and are carried
    /// through unchanged; see normalize module notes)
    pub frequency_mhz: f64,
    /// Instruction set architecture (e.g. "x86_64")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    /// Vendor (e.g. "GenuineIntel")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

/// System memory, normalized to bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfo {
    /// Total installed memory in bytes
    pub total_bytes: u64,
    /// Available memory in bytes at snapshot time
    pub available_bytes: u64,
    /// Used memory in bytes (derived as total - available when the agent
    /// did not report it)
    pub used_bytes: u64,
    /// Module speed in MHz when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_mhz: Option<u32>,
}

/// A single storage device or volume, normalized to bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageDevice {
    /// Device or volume name
    pub name: String,
    /// Mount point or drive letter ("" when unknown)
    pub mount_point: String,
    /// Total capacity in bytes
    pub total_bytes: u64,
    /// Free capacity in bytes
    pub available_bytes: u64,
    /// Used capacity in bytes, clamped to total
    pub used_bytes: u64,
    /// Filesystem name ("" when unknown)
    pub file_system: String,
    /// Device technology
    pub kind: StorageKind,
}

/// Storage device technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StorageKind {
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "NVME")]
    Nvme,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl StorageKind {
    /// Parse an agent-supplied device type label, case-insensitively.
    /// Anything unrecognized maps to `Unknown` rather than failing ingestion.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "nvme" => StorageKind::Nvme,
            "ssd" => StorageKind::Ssd,
            "hdd" | "disk" => StorageKind::Hdd,
            _ => StorageKind::Unknown,
        }
    }
}

/// Graphics adapter description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuInfo {
    /// Adapter name as reported
    pub name: String,
    /// Vendor name ("" when unknown)
    pub vendor: String,
    /// Dedicated memory in bytes when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_bytes: Option<u64>,
    /// Driver version string when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

/// Operating system description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsInfo {
    /// OS name (e.g. "Windows", "Linux")
    pub name: String,
    /// Version string ("" when unknown)
    pub version: String,
    /// OS architecture ("" when unknown)
    pub arch: String,
    /// Build identifier when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

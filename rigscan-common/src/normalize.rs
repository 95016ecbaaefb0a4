//! Ingest payload normalization
//!
//! Three generations of clients report hardware snapshots in three different
//! JSON shapes:
//! - **Report**: current schema, `{hardware: {...}, software: {os: {...}}}`,
//!   capacities nominally in bytes
//! - **Agent**: desktop agent envelope, `{hardwareData: {...}}`, snake_case
//!   storage keys
//! - **Legacy**: first-generation flat shape, `{cpu, gpu, ram, storage,
//!   system}`, single GPU object, capacities in megabytes
//!
//! All shape tolerance lives in this module. [`normalize`] detects the shape
//! from structural markers, maps it field by field, and applies the byte
//! reconciliation rule to every capacity. The output is always a fully
//! populated [`HardwareProfile`]; optional fields degrade to empty/zero
//! values, and only missing identity fields (CPU name, OS name) fail.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::hardware::{
    CpuInfo, GpuInfo, HardwareProfile, MemoryInfo, OsInfo, StorageDevice, StorageKind,
};

/// Capacities strictly above this are bytes; at or below, megabytes.
pub const CAPACITY_BYTE_THRESHOLD: f64 = 1_048_576.0;

/// Detected ingest payload generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Report,
    Agent,
    Legacy,
}

/// Detect which payload generation a raw document belongs to.
///
/// Probes structural markers in a fixed order: a `hardware` object marks the
/// current report shape, otherwise a `hardwareData` object marks the agent
/// envelope, otherwise the payload is treated as legacy. A document carrying
/// both markers is read as a report.
pub fn detect_shape(raw: &Value) -> PayloadShape {
    if member(raw, "hardware").is_object() {
        PayloadShape::Report
    } else if member(raw, "hardwareData").is_object() {
        PayloadShape::Agent
    } else {
        PayloadShape::Legacy
    }
}

/// Reconcile a raw ingest payload into the canonical [`HardwareProfile`].
///
/// Pure and total over well-formed inputs: the only failure mode is
/// [`Error::MalformedInput`] naming the JSON path of a missing identity
/// field (or a non-object payload).
pub fn normalize(raw: &Value) -> Result<HardwareProfile> {
    if !raw.is_object() {
        return Err(Error::malformed("$", "payload must be a JSON object"));
    }
    let shape = detect_shape(raw);
    tracing::debug!(shape = ?shape, "normalizing ingest payload");
    match shape {
        PayloadShape::Report => normalize_report(raw),
        PayloadShape::Agent => normalize_agent(raw),
        PayloadShape::Legacy => normalize_legacy(raw),
    }
}

/// Reconcile a reported capacity into bytes.
///
/// Clients disagree on units: current reports send bytes, older ones send
/// megabytes, and some agent storage fields arrived pre-divided further
/// still. One rule is applied to every capacity field: values strictly
/// greater than [`CAPACITY_BYTE_THRESHOLD`] are taken as bytes, values at or
/// below it as megabytes (multiplied by 1,048,576). The boundary is
/// ambiguous for genuinely tiny byte counts and for gigabyte-scale storage
/// values inherited from old agents; that gap comes with the historical
/// data and is documented here rather than resolved per call site.
/// Negative and non-numeric inputs clamp to zero.
pub fn capacity_to_bytes(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value > CAPACITY_BYTE_THRESHOLD {
        value.round() as u64
    } else {
        (value * 1_048_576.0).round() as u64
    }
}

// ---------------------------------------------------------------------------
// Per-shape mappers
// ---------------------------------------------------------------------------

fn normalize_report(raw: &Value) -> Result<HardwareProfile> {
    let hardware = member(raw, "hardware");
    let cpu = member(hardware, "cpu");
    let os = member(member(raw, "software"), "os");

    Ok(HardwareProfile {
        cpu: CpuInfo {
            name: require_str(cpu, "name", "hardware.cpu")?,
            cores: count_or_zero(cpu, "cores"),
            frequency_mhz: number_or_zero(cpu, &["frequency"]),
            architecture: opt_str(cpu, "architecture"),
            manufacturer: opt_str(cpu, "manufacturer"),
        },
        memory: map_memory(
            member(hardware, "memory"),
            &["total"],
            &["available"],
            &["used"],
            &["speed"],
        ),
        storage: entries(hardware, "storage").iter().map(map_storage_entry).collect(),
        gpu: entries(hardware, "gpu").iter().map(map_gpu_entry).collect(),
        os: OsInfo {
            name: require_str(os, "name", "software.os")?,
            version: str_or_empty(os, "version"),
            arch: str_or_empty(os, "arch"),
            build: opt_str(os, "build"),
        },
    })
}

fn normalize_agent(raw: &Value) -> Result<HardwareProfile> {
    let sys = member(raw, "hardwareData");
    let cpu = member(sys, "cpu");
    let os = member(sys, "os");

    Ok(HardwareProfile {
        cpu: CpuInfo {
            name: require_str(cpu, "name", "hardwareData.cpu")?,
            cores: count_or_zero(cpu, "cores"),
            frequency_mhz: number_or_zero(cpu, &["frequency"]),
            architecture: opt_str(cpu, "architecture"),
            manufacturer: None,
        },
        memory: map_memory(
            member(sys, "memory"),
            &["total"],
            &["available"],
            &["used"],
            &["speed"],
        ),
        storage: entries(sys, "storage").iter().map(map_storage_entry).collect(),
        gpu: entries(sys, "gpu").iter().map(map_gpu_entry).collect(),
        os: OsInfo {
            name: require_str(os, "name", "hardwareData.os")?,
            version: str_or_empty(os, "version"),
            arch: str_or_empty(os, "arch"),
            build: None,
        },
    })
}

fn normalize_legacy(raw: &Value) -> Result<HardwareProfile> {
    let cpu = member(raw, "cpu");
    let system = member(raw, "system");

    // legacy reports carry a single GPU object, not a list
    let gpu = match raw.get("gpu") {
        Some(g) if g.is_object() => vec![map_gpu_entry(g)],
        _ => vec![],
    };

    Ok(HardwareProfile {
        cpu: CpuInfo {
            name: require_str(cpu, "name", "cpu")?,
            cores: count_or_zero(cpu, "cores"),
            // legacy agents reported GHz; the value is carried through
            // unchanged because rescaling would be a guess
            frequency_mhz: number_or_zero(cpu, &["frequency"]),
            architecture: opt_str(cpu, "architecture"),
            manufacturer: None,
        },
        memory: map_memory(
            member(raw, "ram"),
            &["totalMemory"],
            &["availableMemory"],
            &["usedMemory"],
            &["speed"],
        ),
        storage: entries(raw, "storage").iter().map(map_storage_entry).collect(),
        gpu,
        os: OsInfo {
            name: require_str(system, "os", "system")?,
            version: str_or_empty(system, "osVersion"),
            arch: str_or_empty(system, "architecture"),
            build: None,
        },
    })
}

fn map_memory(
    v: &Value,
    total_keys: &[&str],
    available_keys: &[&str],
    used_keys: &[&str],
    speed_keys: &[&str],
) -> MemoryInfo {
    let total = capacity_to_bytes(number_or_zero(v, total_keys));
    let available = capacity_to_bytes(number_or_zero(v, available_keys));
    let used = match opt_number(v, used_keys) {
        Some(u) => capacity_to_bytes(u).min(total),
        None => total.saturating_sub(available),
    };
    MemoryInfo {
        total_bytes: total,
        available_bytes: available,
        used_bytes: used,
        speed_mhz: opt_number(v, speed_keys).map(|s| s.max(0.0) as u32),
    }
}

/// Map one storage entry, tolerating every historical key spelling.
/// Entries degrade to empty/zero fields instead of failing ingestion.
fn map_storage_entry(entry: &Value) -> StorageDevice {
    let total = capacity_to_bytes(number_or_zero(entry, &["total", "capacity"]));
    let available =
        capacity_to_bytes(number_or_zero(entry, &["available", "freeSpace", "free_space"]));
    let used = match opt_number(entry, &["used"]) {
        Some(u) => capacity_to_bytes(u).min(total),
        None => total.saturating_sub(available),
    };
    StorageDevice {
        name: str_or_empty(entry, "name"),
        mount_point: first_str(entry, &["mountPoint", "mount_point"]),
        total_bytes: total,
        available_bytes: available,
        used_bytes: used,
        file_system: first_str(entry, &["fileSystem", "file_system"]),
        kind: first_str_opt(entry, &["type", "drive_type"])
            .map(|s| StorageKind::from_label(&s))
            .unwrap_or_default(),
    }
}

fn map_gpu_entry(entry: &Value) -> GpuInfo {
    GpuInfo {
        name: str_or_empty(entry, "name"),
        vendor: str_or_empty(entry, "vendor"),
        memory_bytes: opt_number(entry, &["memory"]).map(capacity_to_bytes),
        driver: opt_str(entry, "driver"),
    }
}

// ---------------------------------------------------------------------------
// Value extraction helpers
// ---------------------------------------------------------------------------

static NULL: Value = Value::Null;

/// Child value, or Null when absent. Lets mappers compose paths without
/// checking every intermediate object.
fn member<'a>(v: &'a Value, key: &str) -> &'a Value {
    v.get(key).unwrap_or(&NULL)
}

fn entries<'a>(v: &'a Value, key: &str) -> &'a [Value] {
    member(v, key).as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Required string field; absence or a non-string value is a malformed
/// payload, reported with the full JSON path.
fn require_str(v: &Value, key: &str, parent_path: &str) -> Result<String> {
    v.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::malformed(format!("{parent_path}.{key}"), "missing or not a string"))
}

fn opt_str(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(Value::as_str).map(str::to_string)
}

fn str_or_empty(v: &Value, key: &str) -> String {
    opt_str(v, key).unwrap_or_default()
}

fn first_str_opt(v: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| opt_str(v, k))
}

fn first_str(v: &Value, keys: &[&str]) -> String {
    first_str_opt(v, keys).unwrap_or_default()
}

fn opt_number(v: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| v.get(*k).and_then(Value::as_f64))
}

fn number_or_zero(v: &Value, keys: &[&str]) -> f64 {
    opt_number(v, keys).unwrap_or(0.0).max(0.0)
}

fn count_or_zero(v: &Value, key: &str) -> u32 {
    number_or_zero(v, &[key]).min(u32::MAX as f64) as u32
}

//! Ingest payload fixtures covering the three historical client shapes
//!
//! All three describe the same machine, so tests can assert the shapes
//! normalize identically.

use rigscan_common::hardware::{
    CpuInfo, GpuInfo, HardwareProfile, MemoryInfo, OsInfo, StorageDevice, StorageKind,
};
use serde_json::{json, Value};

pub const GIB_16: u64 = 17_179_869_184;
pub const GIB_8: u64 = 8_589_934_592;

/// Current-generation report payload (capacities in bytes)
pub fn report_payload() -> Value {
    json!({
        "hardware": {
            "cpu": {
                "name": "AMD Ryzen 7 5800X",
                "cores": 8,
                "frequency": 3800,
                "architecture": "x86_64"
            },
            "memory": {
                "total": GIB_16,
                "available": GIB_8,
                "speed": 3200
            },
            "storage": [{
                "name": "Samsung 980",
                "total": 524_288_000_000u64,
                "available": 209_715_200_000u64,
                "type": "NVME"
            }],
            "gpu": [{
                "name": "GeForce RTX 3070",
                "vendor": "NVIDIA",
                "memory": GIB_8,
                "driver": "551.23"
            }]
        },
        "software": {
            "os": { "name": "Windows 11", "version": "23H2", "arch": "x86_64" }
        },
        "agentVersion": "2.3.1"
    })
}

/// Desktop agent envelope (snake_case storage keys)
pub fn agent_payload() -> Value {
    json!({
        "hardwareData": {
            "cpu": {
                "name": "AMD Ryzen 7 5800X",
                "cores": 8,
                "frequency": 3800,
                "architecture": "x86_64"
            },
            "memory": {
                "total": GIB_16,
                "available": GIB_8,
                "speed": 3200
            },
            "storage": [{
                "name": "Samsung 980",
                "total": 524_288_000_000u64,
                "available": 209_715_200_000u64,
                "drive_type": "NVME"
            }],
            "gpu": [{
                "name": "GeForce RTX 3070",
                "vendor": "NVIDIA",
                "memory": GIB_8,
                "driver": "551.23"
            }],
            "os": { "name": "Windows 11", "version": "23H2", "arch": "x86_64" }
        }
    })
}

/// First-generation flat payload (capacities in megabytes, single GPU)
pub fn legacy_payload() -> Value {
    json!({
        "cpu": {
            "name": "AMD Ryzen 7 5800X",
            "cores": 8,
            "threads": 16,
            "frequency": 3800,
            "architecture": "x86_64"
        },
        "gpu": {
            "name": "GeForce RTX 3070",
            "vendor": "NVIDIA",
            "memory": 8192,
            "driver": "551.23"
        },
        "ram": {
            "totalMemory": 16384,
            "availableMemory": 8192,
            "speed": 3200
        },
        "storage": [{
            "name": "Samsung 980",
            "type": "NVME",
            "capacity": 500_000,
            "freeSpace": 200_000
        }],
        "system": { "os": "Windows 11", "osVersion": "23H2", "architecture": "x86_64" }
    })
}

/// Canonical profile of the fixture machine, built directly.
///
/// Matches what any of the three payloads normalizes to; the legacy shape
/// cannot express mount points or filesystems, so those stay empty.
pub fn test_profile() -> HardwareProfile {
    HardwareProfile {
        cpu: CpuInfo {
            name: "AMD Ryzen 7 5800X".to_string(),
            cores: 8,
            frequency_mhz: 3800.0,
            architecture: Some("x86_64".to_string()),
            manufacturer: None,
        },
        memory: MemoryInfo {
            total_bytes: GIB_16,
            available_bytes: GIB_8,
            used_bytes: GIB_16 - GIB_8,
            speed_mhz: Some(3200),
        },
        storage: vec![StorageDevice {
            name: "Samsung 980".to_string(),
            mount_point: String::new(),
            total_bytes: 524_288_000_000,
            available_bytes: 209_715_200_000,
            used_bytes: 314_572_800_000,
            file_system: String::new(),
            kind: StorageKind::Nvme,
        }],
        gpu: vec![GpuInfo {
            name: "GeForce RTX 3070".to_string(),
            vendor: "NVIDIA".to_string(),
            memory_bytes: Some(GIB_8),
            driver: Some("551.23".to_string()),
        }],
        os: OsInfo {
            name: "Windows 11".to_string(),
            version: "23H2".to_string(),
            arch: "x86_64".to_string(),
            build: None,
        },
    }
}

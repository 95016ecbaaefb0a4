//! Plain-text presentation helpers
//!
//! Shared by the report payload and the generation prompt so both describe
//! a machine the same way. Formatting only; all unit reconciliation happened
//! in [`crate::normalize`].

use crate::hardware::HardwareProfile;

/// Human-readable byte count, binary units.
pub fn format_bytes(bytes: u64) -> String {
    const GIB: f64 = 1_073_741_824.0;
    const MIB: f64 = 1_048_576.0;
    let b = bytes as f64;
    if b >= GIB {
        format!("{:.1} GB", b / GIB)
    } else if b >= MIB {
        format!("{:.0} MB", b / MIB)
    } else {
        format!("{bytes} B")
    }
}

/// Whole binary gigabytes, rounded.
fn gib_round(bytes: u64) -> u64 {
    (bytes as f64 / 1_073_741_824.0).round() as u64
}

/// One line per component, in the order OS, CPU, memory, GPU, storage.
pub fn profile_summary(profile: &HardwareProfile) -> String {
    let mut os_line = format!("OS: {}", profile.os.name);
    if !profile.os.version.is_empty() {
        os_line.push(' ');
        os_line.push_str(&profile.os.version);
    }
    if !profile.os.arch.is_empty() {
        os_line.push_str(&format!(" ({})", profile.os.arch));
    }

    let cpu_line = format!(
        "CPU: {} ({} cores, {}MHz)",
        profile.cpu.name, profile.cpu.cores, profile.cpu.frequency_mhz
    );

    let memory_line = format!(
        "Memory: {}GB used / {}GB total",
        gib_round(profile.memory.used_bytes),
        gib_round(profile.memory.total_bytes)
    );

    let gpu_line = if profile.gpu.is_empty() {
        "GPU: Not specified".to_string()
    } else {
        format!(
            "GPU: {}",
            profile
                .gpu
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    let storage_line = if profile.storage.is_empty() {
        "Storage: Not specified".to_string()
    } else {
        format!(
            "Storage: {}",
            profile
                .storage
                .iter()
                .map(|d| format!("{} ({})", d.name, format_bytes(d.total_bytes)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    format!("{os_line}\n{cpu_line}\n{memory_line}\n{gpu_line}\n{storage_line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{CpuInfo, GpuInfo, MemoryInfo, OsInfo, StorageDevice, StorageKind};

    fn sample() -> HardwareProfile {
        HardwareProfile {
            cpu: CpuInfo {
                name: "AMD Ryzen 7 5800X".to_string(),
                cores: 8,
                frequency_mhz: 3800.0,
                architecture: Some("x86_64".to_string()),
                manufacturer: None,
            },
            memory: MemoryInfo {
                total_bytes: 17_179_869_184,
                available_bytes: 8_589_934_592,
                used_bytes: 8_589_934_592,
                speed_mhz: None,
            },
            storage: vec![StorageDevice {
                name: "Samsung 980".to_string(),
                mount_point: "C:".to_string(),
                total_bytes: 524_288_000_000,
                available_bytes: 209_715_200_000,
                used_bytes: 314_572_800_000,
                file_system: "NTFS".to_string(),
                kind: StorageKind::Nvme,
            }],
            gpu: vec![GpuInfo {
                name: "GeForce RTX 3070".to_string(),
                vendor: "NVIDIA".to_string(),
                memory_bytes: Some(8_589_934_592),
                driver: None,
            }],
            os: OsInfo {
                name: "Windows 11".to_string(),
                version: "23H2".to_string(),
                arch: "x86_64".to_string(),
                build: None,
            },
        }
    }

    #[test]
    fn test_format_bytes_tiers() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(16_384 * 1_048_576), "16.0 GB");
        assert_eq!(format_bytes(524_288_000), "500 MB");
        assert_eq!(format_bytes(524_288_000_000), "488.3 GB");
    }

    #[test]
    fn test_summary_lines() {
        let text = profile_summary(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "OS: Windows 11 23H2 (x86_64)");
        assert_eq!(lines[1], "CPU: AMD Ryzen 7 5800X (8 cores, 3800MHz)");
        assert_eq!(lines[2], "Memory: 8GB used / 16GB total");
        assert_eq!(lines[3], "GPU: GeForce RTX 3070");
        assert!(
            lines[4].starts_with("Storage: Samsung 980 ("),
            "got {}",
            lines[4]
        );
    }

    #[test]
    fn test_summary_tolerates_missing_components() {
        let mut profile = sample();
        profile.gpu.clear();
        profile.storage.clear();
        profile.os.version = String::new();
        profile.os.arch = String::new();
        let text = profile_summary(&profile);
        assert!(text.contains("GPU: Not specified"));
        assert!(text.contains("Storage: Not specified"));
        assert!(text.lines().next().unwrap() == "OS: Windows 11");
    }
}

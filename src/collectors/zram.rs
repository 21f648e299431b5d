//! zRAM device counters.
//!
//! Scans the block class directory for `zram*` entries. A device is active
//! when it exposes `mm_stat`, whose leading columns are:
//!
//! `orig_data_size compr_data_size mem_used_total mem_limit mem_used_max ...`
//!
//! Later columns (same_pages, pages_compacted, huge_pages) vary by kernel
//! and are ignored. `disksize` is a single number in its own file.

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::error::{AdvisorError, Result};
use crate::types::{DeviceMap, DeviceStats};

const MM_STAT_FIELDS: usize = 5;

/// Parse the leading `mm_stat` columns.
///
/// # Errors
///
/// Returns an error unless at least five numeric columns are present.
pub fn parse_mm_stat(device: &str, content: &str) -> Result<DeviceStats> {
    let line = content.lines().next().unwrap_or("");
    let nums: Vec<u64> = line
        .split_whitespace()
        .take(MM_STAT_FIELDS)
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| AdvisorError::collection(device, format!("bad mm_stat '{line}': {e}")))?;

    if nums.len() < MM_STAT_FIELDS {
        return Err(AdvisorError::collection(
            device,
            format!("mm_stat has {} fields, need {MM_STAT_FIELDS}", nums.len()),
        ));
    }

    Ok(DeviceStats {
        orig_data_size: nums[0],
        compr_data_size: nums[1],
        mem_used_total: nums[2],
        mem_limit: nums[3],
        mem_used_max: nums[4],
        disksize: 0,
    })
}

fn read_disksize(device: &str, path: &Path) -> Result<u64> {
    let content = fs::read_to_string(path).map_err(|e| {
        AdvisorError::collection(device, format!("failed to read {}: {e}", path.display()))
    })?;
    content
        .trim()
        .parse()
        .map_err(|e| {
            AdvisorError::collection(device, format!("bad disksize '{}': {e}", content.trim()))
        })
}

/// Read every active zRAM device under `block_dir`, keyed by device name.
///
/// A missing `block_dir` yields an empty map.
///
/// # Errors
///
/// Returns an error if an active device's files are unreadable or malformed.
pub fn read_devices(block_dir: &Path) -> Result<DeviceMap> {
    let mut devices = DeviceMap::new();

    let entries = match fs::read_dir(block_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(devices),
        Err(e) => {
            return Err(AdvisorError::collection(
                "zram",
                format!("failed to list {}: {e}", block_dir.display()),
            ))
        }
    };

    for entry in entries {
        let entry = entry.map_err(|e| {
            let msg = format!("failed to list {}: {e}", block_dir.display());
            AdvisorError::collection("zram", msg)
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with("zram") {
            continue;
        }

        let base = block_dir.join(&name);
        let mm_stat_path = base.join("mm_stat");
        let mm_stat = match fs::read_to_string(&mm_stat_path) {
            Ok(content) => content,
            // not active
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(AdvisorError::collection(
                    &name,
                    format!("failed to read {}: {e}", mm_stat_path.display()),
                ))
            }
        };

        let mut stats = parse_mm_stat(&name, &mm_stat)?;
        stats.disksize = read_disksize(&name, &base.join("disksize"))?;
        debug!(device = %name, ?stats, "zram device");
        devices.insert(name, stats);
    }

    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mm_stat_full_line() {
        let stats =
            parse_mm_stat("zram0", "2147483648 536870912 603979776 0 805306368 1024 0 12\n")
                .unwrap();
        assert_eq!(stats.orig_data_size, 2_147_483_648);
        assert_eq!(stats.compr_data_size, 536_870_912);
        assert_eq!(stats.mem_used_total, 603_979_776);
        assert_eq!(stats.mem_limit, 0);
        assert_eq!(stats.mem_used_max, 805_306_368);
        assert_eq!(stats.disksize, 0);
    }

    #[test]
    fn test_parse_mm_stat_exactly_five() {
        assert!(parse_mm_stat("zram0", "1 2 3 4 5").is_ok());
    }

    #[test]
    fn test_parse_mm_stat_too_short() {
        let err = parse_mm_stat("zram3", "1 2 3").unwrap_err();
        let display = err.to_string();
        assert!(display.contains("zram3"));
        assert!(display.contains("3 fields"));
    }

    #[test]
    fn test_parse_mm_stat_garbage() {
        assert!(parse_mm_stat("zram0", "1 2 x 4 5").is_err());
    }

    #[test]
    fn test_unreadable_mm_stat_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let dev = dir.path().join("zram0");
        // a directory where the file should be: exists, but reads fail
        fs::create_dir_all(dev.join("mm_stat")).unwrap();
        fs::write(dev.join("disksize"), "4096\n").unwrap();

        let err = read_devices(dir.path()).unwrap_err();
        assert!(err.to_string().contains("zram0"), "{err}");
    }

    #[test]
    fn test_missing_block_dir_is_empty() {
        let devices = read_devices(Path::new("/nonexistent/block")).unwrap();
        assert!(devices.is_empty());
    }
}

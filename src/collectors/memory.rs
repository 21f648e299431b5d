//! Host memory totals.
//!
//! Parses `/proc/meminfo`; values are reported in kB and converted to bytes.

use std::path::Path;
use tracing::debug;

use crate::error::{AdvisorError, Result};
use crate::types::MemoryTotals;

/// Parse `MemTotal` and `MemAvailable` out of meminfo text.
///
/// # Errors
///
/// Returns [`AdvisorError::CollectionFailed`] naming any missing key.
pub fn parse_meminfo(content: &str) -> Result<MemoryTotals> {
    let mut total: Option<u64> = None;
    let mut available: Option<u64> = None;

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }
        let slot = match parts[0] {
            "MemTotal:" => &mut total,
            "MemAvailable:" => &mut available,
            _ => continue,
        };
        let kb: u64 = parts[1].parse().map_err(|_| {
            AdvisorError::collection("meminfo", format!("bad value in line '{line}'"))
        })?;
        *slot = Some(kb.saturating_mul(1024));
        if total.is_some() && available.is_some() {
            break;
        }
    }

    match (total, available) {
        (Some(total), Some(available)) => {
            Ok(MemoryTotals::from_total_available(total, available))
        }
        _ => {
            let missing: Vec<&str> = [("MemTotal", total), ("MemAvailable", available)]
                .into_iter()
                .filter(|(_, v)| v.is_none())
                .map(|(k, _)| k)
                .collect();
            Err(AdvisorError::collection(
                "meminfo",
                format!("missing {}", missing.join(", ")),
            ))
        }
    }
}

/// Read and parse a meminfo file.
///
/// # Errors
///
/// Returns an error if the file is unreadable or incomplete.
pub fn read_meminfo(path: &Path) -> Result<MemoryTotals> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AdvisorError::collection("meminfo", format!("failed to read {}: {e}", path.display()))
    })?;
    let totals = parse_meminfo(&content)?;
    debug!(?totals, "meminfo");
    Ok(totals)
}

//! Kernel VM tunables relevant to zRAM.
//!
//! Recommended ranges follow the usual zRAM guidance: swap eagerly to the
//! compressed device, read one page at a time, and keep watermarks steady.

use std::path::Path;
use tracing::debug;

use crate::error::{AdvisorError, Result};
use crate::types::Tunable;

/// Tunable name with its recommended `[least, most]` range.
pub const RECOMMENDED: &[(&str, i64, i64)] = &[
    ("swappiness", 150, 200),
    ("watermark_boost_factor", 0, 0),
    ("watermark_scale_factor", 125, 125),
    ("page-cluster", 0, 0),
];

/// Read every tunable in [`RECOMMENDED`] from `vm_dir`.
///
/// # Errors
///
/// Returns an error if a tunable file is missing or not an integer.
pub fn read_tunables(vm_dir: &Path) -> Result<Vec<Tunable>> {
    RECOMMENDED
        .iter()
        .map(|&(name, least, most)| -> Result<Tunable> {
            let path = vm_dir.join(name);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                AdvisorError::collection(
                    format!("vm.{name}"),
                    format!("failed to read {}: {e}", path.display()),
                )
            })?;
            let first = content.lines().next().unwrap_or("").trim();
            let value: i64 = first.parse().map_err(|_| {
                AdvisorError::collection(
                    format!("vm.{name}"),
                    format!("'{first}' is not an integer"),
                )
            })?;
            debug!(name, value, "vm tunable");
            Ok(Tunable {
                name: name.to_string(),
                value,
                least,
                most,
            })
        })
        .collect()
}

//! Core data model.
//!
//! Every record here is produced fresh each refresh tick and passed by value
//! between pipeline stages:
//!
//! - [`MemoryTotals`] and [`DeviceMap`]: raw samples from a stats source
//! - [`AggregatedStats`]: all devices summed into one record
//! - [`ProjectionResult`]: the effective-capacity estimate
//! - [`Context`]: static pass-through for the renderer (distro, tunables)
//! - [`Snapshot`]: everything a renderer needs for one frame

use std::collections::BTreeMap;

/// Host-wide memory totals in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryTotals {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
}

impl MemoryTotals {
    /// Build totals from `MemTotal`/`MemAvailable`; used is derived.
    #[must_use]
    pub fn from_total_available(total_bytes: u64, available_bytes: u64) -> Self {
        Self {
            total_bytes,
            used_bytes: total_bytes.saturating_sub(available_bytes),
            available_bytes,
        }
    }
}

/// Counters for a single compressed-swap device, all in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Uncompressed bytes logically stored
    pub orig_data_size: u64,
    /// Compressed bytes actually stored
    pub compr_data_size: u64,
    /// Physical bytes consumed, metadata included
    pub mem_used_total: u64,
    /// Cap on physical bytes (0 = unlimited)
    pub mem_limit: u64,
    /// High-water mark of `mem_used_total`
    pub mem_used_max: u64,
    /// Configured maximum uncompressed capacity
    pub disksize: u64,
}

impl DeviceStats {
    /// Pure data-reduction factor (`orig / compr`), 0 when nothing is stored.
    #[must_use]
    pub fn compression_factor(&self) -> f64 {
        if self.compr_data_size == 0 {
            return 0.0;
        }
        self.orig_data_size as f64 / self.compr_data_size as f64
    }
}

/// Active devices keyed by name (e.g. "zram0"), in name order.
pub type DeviceMap = BTreeMap<String, DeviceStats>;

/// Element-wise sum of [`DeviceStats`] across every device in a sample.
///
/// Only meaningful when all devices share configuration; this is not checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatedStats {
    pub device_count: usize,
    pub orig_data_size: u64,
    pub compr_data_size: u64,
    pub mem_used_total: u64,
    pub mem_limit: u64,
    pub mem_used_max: u64,
    pub disksize: u64,
}

/// How much the projected ratio can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    /// Under 10% of disksize in use
    Uncertain,
    /// 10% to 50% in use
    Confident,
    /// 50% or more in use
    Certain,
}

impl Confidence {
    /// Select the tier for a usage fraction.
    #[must_use]
    pub fn from_usage(usage_fraction: f64) -> Self {
        if usage_fraction < 0.10 {
            Self::Uncertain
        } else if usage_fraction < 0.50 {
            Self::Confident
        } else {
            Self::Certain
        }
    }

    /// Multiplier applied to the observed ratio for projection.
    #[must_use]
    pub fn degradation_factor(&self) -> f64 {
        match self {
            Self::Uncertain => 0.75,
            Self::Confident => 0.85,
            Self::Certain => 0.95,
        }
    }

    /// Lowercase label used in the display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uncertain => "uncertain",
            Self::Confident => "confident",
            Self::Certain => "certain",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Effective (uncompressed-equivalent) capacity estimate for one tick.
///
/// Byte quantities are `f64`; `effective_available` may be negative when the
/// host is already past the projected ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionResult {
    pub effective_used: f64,
    pub effective_available: f64,
    pub effective_max_capacity: f64,
    pub ratio_current: f64,
    pub ratio_projected: f64,
    pub confidence: Confidence,
    pub usage_fraction: f64,
}

/// A kernel VM tunable and the range considered good for zRAM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tunable {
    /// Name as it appears under /proc/sys/vm (e.g. "page-cluster")
    pub name: String,
    pub value: i64,
    pub least: i64,
    pub most: i64,
}

impl Tunable {
    /// Whether the current value lies within `[least, most]`.
    #[must_use]
    pub fn in_range(&self) -> bool {
        self.least <= self.value && self.value <= self.most
    }
}

/// Static information shown alongside every frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub distro: String,
    pub tunables: Vec<Tunable>,
}

/// One sample plus its projection, handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub memory: MemoryTotals,
    pub devices: DeviceMap,
    pub aggregated: AggregatedStats,
    pub projection: ProjectionResult,
}

//! Effective-capacity projection.
//!
//! Converts raw compression counters into an estimate of how much memory the
//! host behaves as if it had, now and with compressed swap filled to its
//! configured ceiling.
//!
//! ## Model
//!
//! 1. `effective_used = used - mem_used_total + orig_data_size`, i.e. used
//!    memory if the swapped data were stored uncompressed. When that is not
//!    larger than `used` (no net gain yet) it is clamped to `used` and the
//!    ratio becomes [`PLACEHOLDER_RATIO`].
//! 2. `ratio_current = orig_data_size / mem_used_total`.
//! 3. A device `mem_limit` tightens the configured `limit_pct`.
//! 4. `usage_fraction = orig_data_size / disksize` selects a degradation factor
//!    and [`Confidence`] tier; `ratio_projected = ratio_current * factor`.
//! 5. Maximum capacity: uncompressed bytes zRAM could hold at `limit_pct` of
//!    RAM (capped by `disksize`) plus the RAM left outside zRAM.
//! 6. `effective_available = max - used`, negative when over-committed.

use tracing::debug;

use crate::types::{AggregatedStats, Confidence, MemoryTotals, ProjectionResult};

/// Default share of RAM compressed swap may claim in projections.
pub const DEFAULT_LIMIT_PCT: f64 = 80.0;

/// Ratio assumed before compression has accumulated enough data.
pub const PLACEHOLDER_RATIO: f64 = 2.75;

/// Flat inputs to [`project`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInput {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub orig_data_size: u64,
    pub mem_used_total: u64,
    pub disksize: u64,
    pub mem_limit: u64,
    /// Percentage (0-100] of RAM compressed swap may claim
    pub limit_pct: f64,
}

impl ModelInput {
    /// Gather model inputs from one sample.
    #[must_use]
    pub fn new(memory: &MemoryTotals, stats: &AggregatedStats, limit_pct: f64) -> Self {
        Self {
            total_bytes: memory.total_bytes,
            used_bytes: memory.used_bytes,
            orig_data_size: stats.orig_data_size,
            mem_used_total: stats.mem_used_total,
            disksize: stats.disksize,
            mem_limit: stats.mem_limit,
            limit_pct,
        }
    }

    /// Tightest of 100%, the configured limit, and the device's own cap.
    #[must_use]
    pub fn effective_limit_pct(&self) -> f64 {
        if self.mem_limit == 0 {
            return self.limit_pct;
        }
        let stats_limit_pct = 100.0 * self.mem_limit as f64 / self.total_bytes as f64;
        100.0_f64.min(self.limit_pct).min(stats_limit_pct)
    }

    /// Fraction of `disksize` holding data; 0 when no disksize is set.
    #[must_use]
    pub fn usage_fraction(&self) -> f64 {
        if self.disksize == 0 {
            return 0.0;
        }
        self.orig_data_size as f64 / self.disksize as f64
    }
}

/// Run the projection. Pure and deterministic.
#[must_use]
pub fn project(input: &ModelInput) -> ProjectionResult {
    let total = input.total_bytes as f64;
    let used = input.used_bytes as f64;
    let disksize = input.disksize as f64;

    let mut effective_used = used - input.mem_used_total as f64 + input.orig_data_size as f64;
    let ratio_current = if effective_used <= used {
        effective_used = used;
        PLACEHOLDER_RATIO
    } else if input.mem_used_total > 0 {
        input.orig_data_size as f64 / input.mem_used_total as f64
    } else {
        PLACEHOLDER_RATIO
    };

    let limit_pct = input.effective_limit_pct();
    let usage_fraction = input.usage_fraction();
    let confidence = Confidence::from_usage(usage_fraction);
    let ratio_projected = ratio_current * confidence.degradation_factor();

    // Uncompressed bytes zRAM may hold, never beyond disksize.
    let zram_share = (ratio_projected * total * limit_pct / 100.0).min(disksize);
    let physical_share = if ratio_projected > 0.0 {
        zram_share / ratio_projected
    } else {
        0.0
    };
    let effective_max_capacity = zram_share + total - physical_share;
    let effective_available = effective_max_capacity - effective_used;

    let result = ProjectionResult {
        effective_used,
        effective_available,
        effective_max_capacity,
        ratio_current,
        ratio_projected,
        confidence,
        usage_fraction,
    };
    debug!(?input, limit_pct, ?result, "projection");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn reference() -> ModelInput {
        ModelInput {
            total_bytes: 8 * GIB,
            used_bytes: 5 * GIB,
            orig_data_size: 2 * GIB,
            mem_used_total: GIB,
            disksize: 4 * GIB,
            mem_limit: 0,
            limit_pct: DEFAULT_LIMIT_PCT,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let r = project(&reference());
        assert_relative_eq!(r.effective_used, (6 * GIB) as f64);
        assert_relative_eq!(r.ratio_current, 2.0);
        assert_relative_eq!(r.usage_fraction, 0.5);
        assert_eq!(r.confidence, Confidence::Certain);
        assert_relative_eq!(r.ratio_projected, 1.9);

        // 1.9 * 8G * 0.8 = 12.16G, capped to the 4G disksize,
        // plus 8G minus the 4G/1.9 of RAM it occupies.
        let expected_max = 4.0 * GIB as f64 + 8.0 * GIB as f64 - 4.0 * GIB as f64 / 1.9;
        assert_relative_eq!(r.effective_max_capacity, expected_max, max_relative = 1e-12);
        assert_relative_eq!(
            r.effective_available,
            expected_max - (6 * GIB) as f64,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_empty_device_uses_placeholder() {
        let input = ModelInput {
            orig_data_size: 0,
            mem_used_total: 0,
            ..reference()
        };
        let r = project(&input);
        assert_relative_eq!(r.effective_used, (5 * GIB) as f64);
        assert_relative_eq!(r.ratio_current, PLACEHOLDER_RATIO);
        assert_relative_eq!(r.usage_fraction, 0.0);
        assert_eq!(r.confidence, Confidence::Uncertain);
        assert_relative_eq!(r.ratio_projected, 2.0625);
    }

    #[test]
    fn test_no_net_gain_forces_placeholder() {
        // Overhead exceeds stored data: effective used would shrink.
        let input = ModelInput {
            orig_data_size: GIB / 2,
            mem_used_total: GIB,
            ..reference()
        };
        let r = project(&input);
        assert_relative_eq!(r.effective_used, (5 * GIB) as f64);
        assert_relative_eq!(r.ratio_current, PLACEHOLDER_RATIO);
    }

    #[test]
    fn test_zero_mem_used_total_with_data() {
        let input = ModelInput {
            mem_used_total: 0,
            ..reference()
        };
        let r = project(&input);
        assert_relative_eq!(r.ratio_current, PLACEHOLDER_RATIO);
        assert_relative_eq!(r.effective_used, (7 * GIB) as f64);
    }

    #[test]
    fn test_mem_limit_tightens_limit_pct() {
        let limited = ModelInput {
            mem_limit: GIB,
            ..reference()
        };
        assert_relative_eq!(limited.effective_limit_pct(), 12.5);

        let free = project(&reference());
        let capped = project(&limited);
        assert!(capped.effective_max_capacity < free.effective_max_capacity);
        // 1.9 * 8G * 12.5% = 1.9G, which fits under disksize.
        let expected = 1.9 * GIB as f64 + 8.0 * GIB as f64 - GIB as f64;
        assert_relative_eq!(capped.effective_max_capacity, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_mem_limit_above_configured_keeps_configured() {
        let input = ModelInput {
            mem_limit: 16 * GIB,
            ..reference()
        };
        assert_relative_eq!(input.effective_limit_pct(), 80.0);
    }

    #[test]
    fn test_limit_never_exceeds_hundred() {
        let input = ModelInput {
            mem_limit: 16 * GIB,
            limit_pct: 150.0,
            ..reference()
        };
        assert_relative_eq!(input.effective_limit_pct(), 100.0);
    }

    #[test]
    fn test_zero_disksize() {
        let input = ModelInput {
            disksize: 0,
            ..reference()
        };
        let r = project(&input);
        assert_relative_eq!(r.usage_fraction, 0.0);
        assert_eq!(r.confidence, Confidence::Uncertain);
        assert_relative_eq!(r.effective_max_capacity, (8 * GIB) as f64);
    }

    #[test]
    fn test_negative_available_is_preserved() {
        let input = ModelInput {
            total_bytes: 4 * GIB,
            used_bytes: 4 * GIB,
            orig_data_size: 30 * GIB,
            mem_used_total: 3 * GIB,
            disksize: 32 * GIB,
            mem_limit: 0,
            limit_pct: 10.0,
        };
        let r = project(&input);
        assert!(r.effective_available < 0.0, "got {}", r.effective_available);
    }

    #[test]
    fn test_confidence_tiers_from_usage() {
        let tier = |orig: u64| {
            project(&ModelInput {
                orig_data_size: orig,
                mem_used_total: orig / 3,
                ..reference()
            })
            .confidence
        };
        assert_eq!(tier(GIB / 4), Confidence::Uncertain);
        assert_eq!(tier(GIB), Confidence::Confident);
        assert_eq!(tier(3 * GIB), Confidence::Certain);
    }

    #[test]
    fn test_deterministic() {
        let input = reference();
        assert_eq!(project(&input), project(&input));
    }

    #[test]
    fn test_from_sample() {
        let memory = MemoryTotals::from_total_available(8 * GIB, 3 * GIB);
        let stats = AggregatedStats {
            device_count: 1,
            orig_data_size: 2 * GIB,
            compr_data_size: GIB / 2,
            mem_used_total: GIB,
            mem_limit: 0,
            mem_used_max: GIB,
            disksize: 4 * GIB,
        };
        assert_eq!(ModelInput::new(&memory, &stats, 80.0), reference());
    }
}

//! Property-based tests for the effective-capacity model and aggregation.
//!
//! Counters are drawn up to 16 TiB so every value is exact in `f64`.
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use zram_advisor::analyzers::{aggregate, project, ModelInput};
use zram_advisor::types::{Confidence, DeviceMap, DeviceStats};

const MAX_BYTES: u64 = 1 << 44;

prop_compose! {
    fn model_input()(
        total_bytes in 0..MAX_BYTES,
        used_bytes in 0..MAX_BYTES,
        orig_data_size in 0..MAX_BYTES,
        mem_used_total in 0..MAX_BYTES,
        disksize in 0..MAX_BYTES,
        mem_limit in 0..MAX_BYTES,
        limit_pct in 0.001f64..=100.0,
    ) -> ModelInput {
        ModelInput {
            total_bytes,
            used_bytes: used_bytes.min(total_bytes),
            orig_data_size,
            mem_used_total,
            disksize,
            mem_limit,
            limit_pct,
        }
    }
}

prop_compose! {
    fn device_stats()(
        orig_data_size in 0..MAX_BYTES,
        compr_data_size in 0..MAX_BYTES,
        mem_used_total in 0..MAX_BYTES,
        mem_limit in 0..MAX_BYTES,
        mem_used_max in 0..MAX_BYTES,
        disksize in 0..MAX_BYTES,
    ) -> DeviceStats {
        DeviceStats {
            orig_data_size,
            compr_data_size,
            mem_used_total,
            mem_limit,
            mem_used_max,
            disksize,
        }
    }
}

proptest! {
    #[test]
    fn ratios_and_usage_are_finite_and_non_negative(input in model_input()) {
        let r = project(&input);
        for v in [r.ratio_current, r.ratio_projected, r.usage_fraction] {
            prop_assert!(v.is_finite(), "{:?} gave non-finite {}", input, v);
            prop_assert!(v >= 0.0, "{:?} gave negative {}", input, v);
        }
        prop_assert!(r.effective_max_capacity.is_finite());
        prop_assert!(r.effective_available.is_finite());
    }

    #[test]
    fn empty_device_means_no_gain_and_uncertain(mut input in model_input()) {
        input.orig_data_size = 0;
        let r = project(&input);
        prop_assert_eq!(r.effective_used, input.used_bytes as f64);
        prop_assert_eq!(r.confidence, Confidence::Uncertain);
    }

    #[test]
    fn usage_never_decreases_with_more_data(
        input in model_input(),
        a in 0u64..MAX_BYTES,
        b in 0u64..MAX_BYTES,
    ) {
        prop_assume!(input.disksize > 0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo = lo.min(input.disksize);
        let hi = hi.min(input.disksize);

        let r_lo = project(&ModelInput {
            orig_data_size: lo,
            ..input
        });
        let r_hi = project(&ModelInput {
            orig_data_size: hi,
            ..input
        });
        prop_assert!(r_hi.usage_fraction >= r_lo.usage_fraction);
        prop_assert!(r_hi.confidence >= r_lo.confidence);
    }

    #[test]
    fn confidence_is_a_step_function_of_usage(usage in 0.0f64..=1.0) {
        let expected = if usage < 0.10 {
            Confidence::Uncertain
        } else if usage < 0.50 {
            Confidence::Confident
        } else {
            Confidence::Certain
        };
        prop_assert_eq!(Confidence::from_usage(usage), expected);
    }

    #[test]
    fn projected_tier_matches_usage(input in model_input()) {
        let r = project(&input);
        prop_assert_eq!(r.confidence, Confidence::from_usage(r.usage_fraction));
        prop_assert_eq!(r.ratio_projected, r.ratio_current * r.confidence.degradation_factor());
    }

    #[test]
    fn max_capacity_bounded_by_disksize_plus_ram(input in model_input()) {
        let r = project(&input);
        let bound = input.disksize as f64 + input.total_bytes as f64;
        prop_assert!(
            r.effective_max_capacity <= bound,
            "max {} exceeds {} for {:?}",
            r.effective_max_capacity,
            bound,
            input
        );
    }

    #[test]
    fn projection_is_deterministic(input in model_input()) {
        prop_assert_eq!(project(&input), project(&input));
    }

    #[test]
    fn two_identical_devices_double_every_field(stats in device_stats()) {
        let mut one = DeviceMap::new();
        one.insert("zram0".to_string(), stats);
        let mut two = one.clone();
        two.insert("zram1".to_string(), stats);

        let single = aggregate(&one).unwrap();
        let double = aggregate(&two).unwrap();
        prop_assert_eq!(double.device_count, 2);
        prop_assert_eq!(double.orig_data_size, 2 * single.orig_data_size);
        prop_assert_eq!(double.compr_data_size, 2 * single.compr_data_size);
        prop_assert_eq!(double.mem_used_total, 2 * single.mem_used_total);
        prop_assert_eq!(double.mem_limit, 2 * single.mem_limit);
        prop_assert_eq!(double.mem_used_max, 2 * single.mem_used_max);
        prop_assert_eq!(double.disksize, 2 * single.disksize);
    }
}

#[test]
fn empty_map_is_not_aggregated() {
    assert!(aggregate(&DeviceMap::new()).is_none());
}

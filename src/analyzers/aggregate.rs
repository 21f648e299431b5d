//! Combine per-device counters into one record.

use crate::types::{AggregatedStats, DeviceMap, DeviceStats};

impl AggregatedStats {
    fn absorb(&mut self, stats: &DeviceStats) {
        self.device_count += 1;
        self.orig_data_size = self.orig_data_size.saturating_add(stats.orig_data_size);
        self.compr_data_size = self.compr_data_size.saturating_add(stats.compr_data_size);
        self.mem_used_total = self.mem_used_total.saturating_add(stats.mem_used_total);
        self.mem_limit = self.mem_limit.saturating_add(stats.mem_limit);
        self.mem_used_max = self.mem_used_max.saturating_add(stats.mem_used_max);
        self.disksize = self.disksize.saturating_add(stats.disksize);
    }
}

/// Sum every counter across `devices`.
///
/// Returns `None` for an empty map: "no zRAM" must be reported by the caller,
/// never fed to the model as zeros. Multi-device sums assume identically
/// configured devices.
#[must_use]
pub fn aggregate(devices: &DeviceMap) -> Option<AggregatedStats> {
    if devices.is_empty() {
        return None;
    }
    let mut combined = AggregatedStats::default();
    for stats in devices.values() {
        combined.absorb(stats);
    }
    Some(combined)
}

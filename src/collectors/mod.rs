//! Raw stats acquisition.
//!
//! - **memory**: `/proc/meminfo` totals
//! - **zram**: per-device `mm_stat` and `disksize` from sysfs
//! - **vm_params**: `/proc/sys/vm` tunables
//! - **release**: distro label from os-release / lsb-release
//!
//! Every reader either yields a complete record or fails; partial records
//! never reach the projection model.

pub mod memory;
pub mod release;
pub mod vm_params;
pub mod zram;

use tracing::warn;

use crate::analyzers::advice;
use crate::config::PathsConfig;
use crate::error::Result;
use crate::types::{Context, DeviceMap, MemoryTotals};

/// A source of raw memory and zRAM counters, sampled once per tick.
pub trait StatsSource {
    /// Returns the unique identifier for this source.
    fn id(&self) -> &'static str;

    /// Host memory totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the totals cannot be read completely.
    fn memory_totals(&mut self) -> Result<MemoryTotals>;

    /// Active compressed-swap devices; inactive devices are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if an active device's counters are unreadable.
    fn devices(&mut self) -> Result<DeviceMap>;
}

/// Reads counters from procfs and sysfs.
#[derive(Debug, Clone)]
pub struct LinuxSource {
    paths: PathsConfig,
}

impl LinuxSource {
    #[must_use]
    pub fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }
}

impl StatsSource for LinuxSource {
    fn id(&self) -> &'static str {
        "linux"
    }

    fn memory_totals(&mut self) -> Result<MemoryTotals> {
        memory::read_meminfo(&self.paths.meminfo)
    }

    fn devices(&mut self) -> Result<DeviceMap> {
        zram::read_devices(&self.paths.block_dir)
    }
}

/// Read the static renderer context once at startup.
///
/// # Errors
///
/// Returns an error if a VM tunable cannot be read.
pub fn load_context(paths: &PathsConfig) -> Result<Context> {
    let distro = release::distro_label(&paths.os_release, &paths.lsb_release);
    let tunables = vm_params::read_tunables(&paths.vm_dir)?;
    let context = Context { distro, tunables };
    for tunable in advice::out_of_range(&context) {
        warn!(
            name = %tunable.name,
            value = tunable.value,
            least = tunable.least,
            most = tunable.most,
            "vm tunable outside recommended range"
        );
    }
    Ok(context)
}

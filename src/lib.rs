//! # zram-advisor
//!
//! Live advisor for compressed in-memory swap (zRAM).
//!
//! Samples host memory and every active zRAM device, then projects how much
//! uncompressed data the system could hold if swap filled up at the currently
//! observed compression ratio, discounted by a confidence tier that depends on
//! how much evidence the devices have accumulated.
//!
//! ## Pipeline
//!
//! ```text
//! collectors ─▶ analyzers::aggregate ─▶ analyzers::effective ─▶ ui
//!  (procfs,        (sum devices)          (project capacity)    (ratatui
//!   sysfs)                                                       or plain)
//! ```
//!
//! [`monitor::MonitorLoop`] drives the pipeline once per tick until a key is
//! pressed.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zram_advisor::prelude::*;
//!
//! let config = Config::new();
//! let context = load_context(&config.paths)?;
//! let mut source = LinuxSource::new(config.paths.clone());
//! let snapshot = take_snapshot(&mut source, config.model.limit_pct)?;
//! println!("effective available: {}", human(snapshot.projection.effective_available));
//! ```

// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

pub mod analyzers;
pub mod bookmarks;
pub mod collectors;
pub mod config;
pub mod display_rules;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod theme;
pub mod types;
pub mod ui;

pub use error::{AdvisorError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analyzers::{aggregate, project, ModelInput};
    pub use crate::collectors::{load_context, LinuxSource, StatsSource};
    pub use crate::config::Config;
    pub use crate::display_rules::{human, human_pct};
    pub use crate::error::{AdvisorError, Result};
    pub use crate::monitor::{take_snapshot, LoopExit, LoopSettings, MonitorLoop};
    pub use crate::types::{Confidence, Context, ProjectionResult, Snapshot};
}

//! Analysis over raw zRAM counters.
//!
//! - Device aggregation (element-wise sum across devices)
//! - Effective-capacity projection with degradation tiers
//! - Advisory checks (disksize sufficiency, tunable ranges)

pub mod advice;
pub mod aggregate;
pub mod effective;

pub use advice::{disksize_sufficient, min_recommended_disksize};
pub use aggregate::aggregate;
pub use effective::{project, ModelInput, DEFAULT_LIMIT_PCT, PLACEHOLDER_RATIO};

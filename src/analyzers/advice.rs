//! Advisory checks layered on top of the projection.

use crate::types::{Context, Tunable};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Smallest disksize worth recommending for a host with `ram_total` bytes:
/// 1.5x RAM up to 8 GiB of RAM, a flat 4 GiB above that.
#[must_use]
pub fn min_recommended_disksize(ram_total: u64) -> f64 {
    let ram = ram_total as f64;
    if ram <= 8.0 * GIB {
        1.5 * ram
    } else {
        4.0 * GIB
    }
}

/// Whether the configured disksize meets [`min_recommended_disksize`].
#[must_use]
pub fn disksize_sufficient(ram_total: u64, disksize: u64) -> bool {
    min_recommended_disksize(ram_total) <= disksize as f64
}

/// Tunables outside their recommended range.
pub fn out_of_range(context: &Context) -> impl Iterator<Item = &Tunable> {
    context.tunables.iter().filter(|t| !t.in_range())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB_U: u64 = 1024 * 1024 * 1024;

    #[test]
    fn test_small_host_scales_with_ram() {
        assert_eq!(min_recommended_disksize(4 * GIB_U), 6.0 * GIB);
        assert_eq!(min_recommended_disksize(8 * GIB_U), 12.0 * GIB);
    }

    #[test]
    fn test_large_host_flat_floor() {
        assert_eq!(min_recommended_disksize(8 * GIB_U + 1), 4.0 * GIB);
        assert_eq!(min_recommended_disksize(64 * GIB_U), 4.0 * GIB);
    }

    #[test]
    fn test_disksize_sufficient() {
        assert!(disksize_sufficient(4 * GIB_U, 6 * GIB_U));
        assert!(!disksize_sufficient(4 * GIB_U, 6 * GIB_U - 1));
        assert!(disksize_sufficient(32 * GIB_U, 4 * GIB_U));
        assert!(!disksize_sufficient(32 * GIB_U, 2 * GIB_U));
    }

    #[test]
    fn test_out_of_range() {
        let context = Context {
            distro: "Test".into(),
            tunables: vec![
                Tunable {
                    name: "swappiness".into(),
                    value: 60,
                    least: 150,
                    most: 200,
                },
                Tunable {
                    name: "page-cluster".into(),
                    value: 0,
                    least: 0,
                    most: 0,
                },
            ],
        };
        let names: Vec<_> = out_of_range(&context).map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["swappiness"]);
    }
}

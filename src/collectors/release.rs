//! Distro identification.
//!
//! Both os-release and lsb-release are `KEY=value` files; keys are matched
//! case-insensitively and quotes are stripped from values.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Label shown when neither release file is usable.
pub const UNKNOWN_DISTRO: &str = "unknown";

/// Parse a `KEY=value` release file into lowercase keys.
#[must_use]
pub fn parse_name_values(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().replace('"', "")))
        .collect()
}

fn lookup(path: &Path, key: &str) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let values = parse_name_values(&content);
    debug!(path = %path.display(), ?values, "release file");
    values.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Human-readable distro name: os-release `PRETTY_NAME`, then lsb-release
/// `DISTRIB_DESCRIPTION`, then [`UNKNOWN_DISTRO`].
#[must_use]
pub fn distro_label(os_release: &Path, lsb_release: &Path) -> String {
    lookup(os_release, "pretty_name")
        .or_else(|| lookup(lsb_release, "distrib_description"))
        .unwrap_or_else(|| {
            warn!("cannot get os-release or lsb-release");
            UNKNOWN_DISTRO.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_values() {
        let values = parse_name_values(concat!(
            "NAME=\"Debian GNU/Linux\"\n",
            "# comment\n",
            "PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\n",
            "ID=debian\n",
        ));
        assert_eq!(values["pretty_name"], "Debian GNU/Linux 12 (bookworm)");
        assert_eq!(values["id"], "debian");
        assert!(!values.contains_key("# comment"));
    }

    #[test]
    fn test_os_release_preferred() {
        let dir = tempfile::tempdir().unwrap();
        let os = dir.path().join("os-release");
        let lsb = dir.path().join("lsb-release");
        std::fs::write(&os, "PRETTY_NAME=\"Linux Mint 21.3\"\n").unwrap();
        std::fs::write(&lsb, "DISTRIB_DESCRIPTION=\"Ubuntu 22.04\"\n").unwrap();
        assert_eq!(distro_label(&os, &lsb), "Linux Mint 21.3");
    }

    #[test]
    fn test_lsb_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let os = dir.path().join("missing");
        let lsb = dir.path().join("lsb-release");
        std::fs::write(&lsb, "DISTRIB_ID=Ubuntu\nDISTRIB_DESCRIPTION=\"Ubuntu 22.04.4 LTS\"\n")
            .unwrap();
        assert_eq!(distro_label(&os, &lsb), "Ubuntu 22.04.4 LTS");
    }

    #[test]
    fn test_unknown_when_both_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            distro_label(&dir.path().join("a"), &dir.path().join("b")),
            UNKNOWN_DISTRO
        );
    }
}

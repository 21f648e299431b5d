//! Display Rules
//!
//! Concise byte formatting for the advisor display.
//!
//! ## Key Features
//! - Binary-scaled byte formatting (1.5K, 2.3M, 4G) with at most one decimal
//! - Percent-of-RAM suffix for quantities that relate to total memory
//! - Negative and zero quantities render as `0`

// =============================================================================
// BYTE FORMATTING
// =============================================================================

/// Format a byte quantity with binary (1024) scaling and one decimal.
///
/// A trailing `.0` is dropped. Values that would round to `1000` or more move
/// up one unit.
///
/// # Examples
/// ```
/// use zram_advisor::display_rules::human;
/// assert_eq!(human(0.0), "0");
/// assert_eq!(human(-12.0), "0");
/// assert_eq!(human(500.0), "500");
/// assert_eq!(human(1536.0), "1.5K");
/// assert_eq!(human(4.0 * 1024.0 * 1024.0 * 1024.0), "4G");
/// ```
#[must_use]
pub fn human(bytes: f64) -> String {
    const UNITS: &[&str] = &["", "K", "M", "G", "T", "Q"];
    const THRESHOLD: f64 = 999.95;

    if bytes <= 0.0 || bytes.is_nan() {
        return "0".to_string();
    }

    let mut value = bytes;
    let mut unit_idx = 0;

    while value >= THRESHOLD && unit_idx < UNITS.len() - 1 {
        value /= 1024.0;
        unit_idx += 1;
    }

    let formatted = format!("{value:.1}");
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{trimmed}{}", UNITS[unit_idx])
}

/// Like [`human`], with `/NN%` of `total` appended when both are positive.
///
/// Exact halves round to the even percent (`12.5` → `12`).
///
/// # Examples
/// ```
/// use zram_advisor::display_rules::human_pct;
/// assert_eq!(human_pct(2048.0, 8192), "2K/25%");
/// assert_eq!(human_pct(2048.0, 0), "2K");
/// assert_eq!(human_pct(0.0, 8192), "0");
/// ```
#[must_use]
pub fn human_pct(bytes: f64, total: u64) -> String {
    let mut out = human(bytes);
    if bytes > 0.0 && total > 0 {
        let pct = (100.0 * bytes / total as f64).round_ties_even() as i64;
        out.push_str(&format!("/{pct}%"));
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

//! Theme and color system for zram-advisor.
//!
//! btop-style dark palette: confidence tiers run orange → yellow → green,
//! failed checks are red.

use ratatui::style::{Color, Modifier, Style};

use crate::types::Confidence;

/// Color for a projection confidence tier.
pub fn confidence_color(confidence: Confidence) -> Color {
    match confidence {
        Confidence::Uncertain => Color::Rgb(255, 150, 64), // Orange
        Confidence::Confident => Color::Rgb(220, 220, 80), // Yellow
        Confidence::Certain => Color::Rgb(100, 220, 100),  // Green
    }
}

/// Color for a usage percentage (0-100): green, yellow past 60%, red past 85%.
pub fn percent_color(percent: f64) -> Color {
    let p = percent.clamp(0.0, 100.0);
    if p >= 85.0 {
        Color::Rgb(255, 64, 64)
    } else if p >= 60.0 {
        Color::Rgb(255, 200, 64)
    } else {
        Color::Rgb(100, 220, 100)
    }
}

/// Style for a failed advisory check.
pub fn warning_style() -> Style {
    Style::default()
        .fg(Color::Rgb(255, 64, 64))
        .add_modifier(Modifier::BOLD)
}

/// Style for static header lines.
pub fn header_style() -> Style {
    Style::default().fg(Color::Rgb(180, 180, 200))
}

/// Panel border colors
pub mod borders {
    use ratatui::style::Color;
    use ratatui::widgets::BorderType;

    pub const HEADER: Color = Color::Rgb(100, 200, 255); // Bright cyan
    pub const BODY: Color = Color::Rgb(180, 120, 255); // Purple

    /// Rounded border style for btop-like appearance
    pub const STYLE: BorderType = BorderType::Rounded;
}

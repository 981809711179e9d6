//! Design tokens: palette and the severity/status colour rules.
//!
//! Every visual component takes its colours from here, both the ratatui
//! dashboard and the one-shot text output.

use autosoc_core::{AlertStatus, RiskLevel, Severity};
use colored::{ColoredString, Colorize};
use ratatui::style::Color;

/// A 24-bit colour token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Terminal colour for ratatui
    #[must_use]
    pub const fn color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }

    /// Paint text for line-oriented output
    #[must_use]
    pub fn paint(self, text: &str) -> ColoredString {
        text.truecolor(self.0, self.1, self.2)
    }

    /// Mix `self` over `base` with the given opacity (0.0-1.0).
    ///
    /// Stands in for translucent tints, which terminals cannot draw.
    #[must_use]
    pub fn over(self, base: Self, alpha: f32) -> Self {
        let a = alpha.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mix = |top: u8, bottom: u8| -> u8 {
            f32::from(bottom)
                .mul_add(1.0 - a, f32::from(top) * a)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self(mix(self.0, base.0), mix(self.1, base.1), mix(self.2, base.2))
    }
}

/// Base palette
pub mod palette {
    use super::Rgb;

    pub const BG: Rgb = Rgb(0x05, 0x0B, 0x14);
    pub const SURFACE: Rgb = Rgb(0x0A, 0x16, 0x28);
    pub const BORDER: Rgb = Rgb(0x0F, 0x25, 0x44);
    pub const ACCENT: Rgb = Rgb(0x00, 0xD4, 0xFF);
    pub const ACCENT_DIM: Rgb = Rgb(0x00, 0x99, 0xBB);
    pub const CRITICAL: Rgb = Rgb(0xFF, 0x3B, 0x30);
    pub const HIGH: Rgb = Rgb(0xFF, 0x9F, 0x0A);
    pub const MEDIUM: Rgb = Rgb(0xFF, 0xD6, 0x0A);
    pub const LOW: Rgb = Rgb(0x30, 0xD1, 0x58);
    pub const TEXT: Rgb = Rgb(0xE8, 0xF4, 0xFD);
    pub const TEXT_DIM: Rgb = Rgb(0x6B, 0x8C, 0xAE);
    pub const GRID: Rgb = Rgb(0x0D, 0x1F, 0x3A);
}

/// Opacity of status tints and badge backgrounds
const TINT_ALPHA: f32 = 0.13;

/// Colours of the threat-category chart, used cyclically
pub const CATEGORY_PALETTE: [Rgb; 5] = [
    palette::CRITICAL,
    palette::HIGH,
    palette::MEDIUM,
    palette::ACCENT_DIM,
    palette::TEXT_DIM,
];

/// Colour of an alert severity
#[must_use]
pub const fn severity_color(severity: Severity) -> Rgb {
    match severity {
        Severity::Critical => palette::CRITICAL,
        Severity::High => palette::HIGH,
        Severity::Medium => palette::MEDIUM,
        Severity::Low => palette::LOW,
        Severity::Info => palette::TEXT_DIM,
        // Fail safe: draw what we cannot classify as the worst case.
        Severity::Unknown => palette::CRITICAL,
    }
}

/// Colour of a risk level
#[must_use]
pub const fn level_color(level: RiskLevel) -> Rgb {
    match level.effective() {
        RiskLevel::Low => palette::LOW,
        RiskLevel::Medium => palette::MEDIUM,
        RiskLevel::High => palette::HIGH,
        RiskLevel::Critical | RiskLevel::Unknown => palette::CRITICAL,
    }
}

/// Badge colours of an alert status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTone {
    /// Badge text
    pub fg: Rgb,
    /// Badge outline
    pub border: Rgb,
    /// Badge background
    pub tint: Rgb,
}

/// Badge colours for an alert status
#[must_use]
pub fn status_tone(status: AlertStatus) -> StatusTone {
    let (fg, border) = match status.effective() {
        AlertStatus::Blocked => (palette::LOW, palette::LOW),
        AlertStatus::Quarantined => (palette::MEDIUM, palette::MEDIUM),
        AlertStatus::Investigating => (palette::HIGH, palette::TEXT_DIM),
        AlertStatus::Resolved | AlertStatus::Unknown => (palette::TEXT_DIM, palette::TEXT_DIM),
    };
    StatusTone {
        fg,
        border,
        tint: fg.over(palette::SURFACE, TINT_ALPHA),
    }
}

/// Background tint for a status, as drawn behind the badge
#[must_use]
pub fn tint(color: Rgb) -> Rgb {
    color.over(palette::SURFACE, TINT_ALPHA)
}

/// Colour of the n-th threat category
#[must_use]
pub const fn category_color(index: usize) -> Rgb {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

/// Colour of a compliance score bar
#[must_use]
pub const fn compliance_score_color(healthy: bool) -> Rgb {
    if healthy {
        palette::LOW
    } else {
        palette::HIGH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_severity_has_a_distinct_colour() {
        let colours: Vec<Rgb> = Severity::KNOWN.iter().map(|s| severity_color(*s)).collect();
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_severity_is_drawn_as_critical() {
        assert_eq!(severity_color(Severity::Unknown), palette::CRITICAL);
    }

    #[test]
    fn status_tones_follow_lifecycle() {
        assert_eq!(status_tone(AlertStatus::Blocked).fg, palette::LOW);
        assert_eq!(status_tone(AlertStatus::Quarantined).fg, palette::MEDIUM);
        assert_eq!(status_tone(AlertStatus::Investigating).fg, palette::HIGH);
        assert_eq!(status_tone(AlertStatus::Investigating).border, palette::TEXT_DIM);
        assert_eq!(status_tone(AlertStatus::Unknown), status_tone(AlertStatus::Investigating));
    }

    #[test]
    fn blending_extremes() {
        assert_eq!(palette::LOW.over(palette::SURFACE, 1.0), palette::LOW);
        assert_eq!(palette::LOW.over(palette::SURFACE, 0.0), palette::SURFACE);
    }

    #[test]
    fn category_palette_cycles() {
        assert_eq!(category_color(0), palette::CRITICAL);
        assert_eq!(category_color(5), palette::CRITICAL);
        assert_eq!(category_color(3), palette::ACCENT_DIM);
    }
}

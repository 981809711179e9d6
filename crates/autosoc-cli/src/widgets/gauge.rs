use autosoc::risk::MAX_RISK_SCORE;
use autosoc::{needle_angle, RiskLevel};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::theme::{self, palette, Rgb};

/// Needle glyphs from -90 to +90 degrees in 45 degree steps
const NEEDLES: [&str; 5] = ["←", "↖", "↑", "↗", "→"];

/// Cells in the dial track
const TRACK_CELLS: u16 = 21;

/// Half-circle risk gauge.
///
/// The colour follows the supplied level; the needle follows the score.
/// The two may disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskGauge {
    score: u32,
    level: RiskLevel,
}

impl RiskGauge {
    /// Build from the raw feed values; the score is clamped to 0-100.
    pub fn new(score: u32, level: RiskLevel) -> Self {
        Self {
            score: score.min(MAX_RISK_SCORE),
            level,
        }
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Needle angle in degrees, -90 (left) to +90 (right)
    pub fn angle(&self) -> f64 {
        needle_angle(self.score)
    }

    pub const fn color(&self) -> Rgb {
        theme::level_color(self.level)
    }

    /// Caption under the number, e.g. "low risk"
    pub fn caption(&self) -> String {
        format!("{} risk", self.level.effective())
    }

    /// Arrow closest to the needle direction
    pub fn needle(&self) -> &'static str {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let step = ((self.angle() + 90.0) / 45.0).round().clamp(0.0, 4.0) as usize;
        NEEDLES[step]
    }

    /// Track cell the needle points at
    #[allow(clippy::cast_possible_truncation)]
    pub fn marker_cell(&self, cells: u16) -> u16 {
        if cells == 0 {
            return 0;
        }
        let span = u32::from(cells - 1);
        ((self.score * span + MAX_RISK_SCORE / 2) / MAX_RISK_SCORE) as u16
    }

    fn track(&self) -> Line<'static> {
        let marker = self.marker_cell(TRACK_CELLS);
        let spans: Vec<Span<'static>> = (0..TRACK_CELLS)
            .map(|cell| {
                let zone = zone_color(u32::from(cell) * MAX_RISK_SCORE / u32::from(TRACK_CELLS - 1));
                if cell == marker {
                    Span::styled("┃", Style::default().fg(palette::TEXT.color()).add_modifier(Modifier::BOLD))
                } else {
                    Span::styled("━", Style::default().fg(zone.color()))
                }
            })
            .collect();
        Line::from(spans)
    }
}

/// Dial background: green to red left to right
const fn zone_color(position: u32) -> Rgb {
    match position {
        0..=24 => palette::LOW,
        25..=49 => palette::MEDIUM,
        50..=74 => palette::HIGH,
        _ => palette::CRITICAL,
    }
}

impl Widget for &RiskGauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.color().color();
        let lines = vec![
            self.track(),
            Line::from(vec![
                Span::styled(self.needle(), Style::default().fg(color)),
                Span::raw(" "),
                Span::styled(
                    self.score.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled("/100", Style::default().fg(palette::TEXT_DIM.color())),
            ]),
            Line::styled(
                self.caption().to_uppercase(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

use autosoc::{DashboardSnapshot, SourceCount};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::output::format_count;
use crate::theme::palette;

/// Attack source with a bar relative to the first (largest) entry
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBar {
    pub flag: String,
    pub country: String,
    pub count: u64,
    /// Percent of the first entry's count; may exceed 100 on unsorted input
    pub width_percent: f64,
}

impl SourceBar {
    pub fn new(source: &SourceCount, width_percent: f64) -> Self {
        Self {
            flag: source.flag.clone(),
            country: source.country.clone(),
            count: source.count,
            width_percent,
        }
    }

    /// One bar per source, in feed order
    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Vec<Self> {
        snapshot
            .top_attack_sources
            .iter()
            .zip(snapshot.source_bar_widths())
            .map(|(source, width)| Self::new(source, width))
            .collect()
    }

    /// Filled cells out of `total`, clamped to the track
    pub fn filled_cells(&self, total: u16) -> u16 {
        let fraction = (self.width_percent / 100.0).clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = (fraction * f64::from(total)).round() as u16;
        filled.min(total)
    }

    pub fn label(&self) -> String {
        if self.flag.is_empty() {
            self.country.clone()
        } else {
            format!("{} {}", self.flag, self.country)
        }
    }
}

impl Widget for &SourceBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let count = format_count(self.count);
        let label = self.label();
        let gap = usize::from(area.width)
            .saturating_sub(label.chars().count() + count.chars().count());
        let filled = self.filled_cells(area.width);

        let lines = vec![
            Line::from(vec![
                Span::styled(label, Style::default().fg(palette::TEXT.color())),
                Span::raw(" ".repeat(gap)),
                Span::styled(count, Style::default().fg(palette::ACCENT.color())),
            ]),
            Line::from(vec![
                Span::styled(
                    "█".repeat(usize::from(filled)),
                    Style::default().fg(palette::ACCENT.color()),
                ),
                Span::styled(
                    "░".repeat(usize::from(area.width - filled)),
                    Style::default().fg(palette::BORDER.color()),
                ),
            ]),
        ];
        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosoc::demo_snapshot;

    #[test]
    fn widths_are_relative_to_first_entry() {
        let bars = SourceBar::from_snapshot(&demo_snapshot());
        assert_eq!(bars.len(), 5);
        assert!((bars[0].width_percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(bars[0].filled_cells(20), 20);
        assert!(bars[1].width_percent < 100.0);
        assert_eq!(bars[1].label(), format!("{} {}", bars[1].flag, bars[1].country));
    }

    fn source(country: &str, count: u64) -> SourceCount {
        SourceCount {
            country: country.into(),
            count,
            flag: String::new(),
        }
    }

    #[test]
    fn unsorted_input_is_kept_and_clamped() {
        let mut snapshot = demo_snapshot();
        snapshot.top_attack_sources = vec![source("Brazil", 100), source("China", 300)];

        let bars = SourceBar::from_snapshot(&snapshot);
        assert_eq!(bars[0].country, "Brazil");
        assert!((bars[1].width_percent - 300.0).abs() < 1e-9);
        assert_eq!(bars[1].filled_cells(10), 10);
    }

    #[test]
    fn zero_denominator_draws_empty_bar() {
        let mut snapshot = demo_snapshot();
        snapshot.top_attack_sources = vec![source("Unknown", 0)];

        let bar = &SourceBar::from_snapshot(&snapshot)[0];
        assert_eq!(bar.filled_cells(10), 0);

        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 2));
        bar.render(buf.area, &mut buf);
        assert_eq!(buf.content()[20].symbol(), "░");
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};

use autosoc::SummaryStats;

use crate::output::{format_count, format_percent};
use crate::theme::{palette, Rgb};

/// Headline counter with icon, value and optional sub-caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub sub: Option<String>,
    pub color: Rgb,
    pub icon: String,
}

impl StatCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            sub: None,
            color: palette::ACCENT,
            icon: String::new(),
        }
    }

    #[must_use]
    pub fn sub(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    #[must_use]
    pub const fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Upper-case label line, prefixed by the icon if there is one
    pub fn heading(&self) -> String {
        if self.icon.is_empty() {
            self.label.to_uppercase()
        } else {
            format!("{} {}", self.icon, self.label.to_uppercase())
        }
    }
}

/// The five headline cards of the dashboard, in display order
pub fn summary_cards(summary: &SummaryStats) -> [StatCard; 5] {
    [
        StatCard::new("Events Today", format_count(summary.events_today))
            .sub("All analyzed by AI")
            .color(palette::ACCENT)
            .icon("📊"),
        StatCard::new("Threats Detected", format_count(summary.threats_detected))
            .sub("Past 24 hours")
            .color(palette::HIGH)
            .icon("⚠"),
        StatCard::new("Auto-Blocked", format_count(summary.threats_blocked))
            .sub("No human needed")
            .color(palette::LOW)
            .icon("🛡"),
        StatCard::new("Endpoints", format_count(summary.endpoints))
            .sub("All online")
            .color(palette::ACCENT_DIM)
            .icon("💻"),
        StatCard::new("Uptime", format_percent(summary.uptime_percent))
            .sub("30-day average")
            .color(palette::LOW)
            .icon("⚡"),
    ]
}

impl Widget for &StatCard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_style(Style::default().fg(palette::BORDER.color()))
            .style(Style::default().bg(palette::SURFACE.color()));

        let mut lines = vec![
            Line::styled(self.heading(), Style::default().fg(palette::TEXT_DIM.color())),
            Line::styled(
                self.value.clone(),
                Style::default()
                    .fg(self.color.color())
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(sub) = &self.sub {
            lines.push(Line::styled(sub.clone(), Style::default().fg(palette::TEXT_DIM.color())));
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

use autosoc::{framework_display_name, ComplianceStatus};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::theme::{self, palette, Rgb};

/// The two badges a framework can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Compliant,
    ActionNeeded,
}

impl BadgeVariant {
    /// Anything not explicitly compliant needs action.
    pub const fn for_status(status: ComplianceStatus) -> Self {
        if status.is_compliant() {
            Self::Compliant
        } else {
            Self::ActionNeeded
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::Compliant => "✓ Compliant",
            Self::ActionNeeded => "⚠ Action Needed",
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            Self::Compliant => palette::LOW,
            Self::ActionNeeded => palette::HIGH,
        }
    }
}

/// Framework name with its status badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceBadge {
    pub name: String,
    pub variant: BadgeVariant,
}

impl ComplianceBadge {
    /// Build from a compliance map entry (`pci_dss` becomes "PCI DSS")
    pub fn new(framework: &str, status: ComplianceStatus) -> Self {
        Self {
            name: framework_display_name(framework),
            variant: BadgeVariant::for_status(status),
        }
    }
}

impl Widget for &ComplianceBadge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.variant.color();
        let name_width = u16::try_from(self.name.chars().count()).unwrap_or(u16::MAX);
        let gap = area
            .width
            .saturating_sub(name_width)
            .saturating_sub(u16::try_from(self.variant.text().chars().count() + 2).unwrap_or(0));

        let line = Line::from(vec![
            Span::styled(
                self.name.clone(),
                Style::default()
                    .fg(palette::TEXT.color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(usize::from(gap))),
            Span::styled(
                format!(" {} ", self.variant.text()),
                Style::default()
                    .fg(color.color())
                    .bg(theme::tint(color).color())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    #[test]
    fn action_needed_scenario() {
        let badge = ComplianceBadge::new("pci_dss", ComplianceStatus::ActionNeeded);
        assert_eq!(badge.name, "PCI DSS");
        assert_eq!(badge.variant, BadgeVariant::ActionNeeded);

        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 1));
        (&badge).render(buf.area, &mut buf);
        let rendered = text(&buf);
        assert!(rendered.contains("Action Needed"));
        assert!(!rendered.contains("Compliant"));
    }

    #[test]
    fn unknown_status_fails_safe() {
        let badge = ComplianceBadge::new("hipaa", ComplianceStatus::Unknown);
        assert_eq!(badge.variant.text(), "⚠ Action Needed");
    }

    #[test]
    fn compliant_variant() {
        let badge = ComplianceBadge::new("soc2", ComplianceStatus::Compliant);
        assert_eq!(badge.name, "SOC 2");
        assert_eq!(badge.variant.text(), "✓ Compliant");
        assert_eq!(badge.variant.color(), palette::LOW);
    }
}

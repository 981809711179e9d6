use autosoc::{Alert, AlertOrigin, ResponsePlaybook};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::theme::{self, palette, Rgb, StatusTone};

/// One line of the alert feed: severity dot, type, origin, age and badge
#[derive(Debug, Clone, Copy)]
pub struct AlertRow<'a> {
    alert: &'a Alert,
    highlighted: bool,
}

impl<'a> AlertRow<'a> {
    pub const fn new(alert: &'a Alert) -> Self {
        Self {
            alert,
            highlighted: false,
        }
    }

    #[must_use]
    pub const fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub const fn severity_color(&self) -> Rgb {
        theme::severity_color(self.alert.severity)
    }

    pub fn tone(&self) -> StatusTone {
        theme::status_tone(self.alert.status)
    }

    /// "Source: <ip>" or "Email-based"
    pub fn origin_caption(&self) -> String {
        match self.alert.origin() {
            AlertOrigin::Address(ip) => format!("Source: {ip}"),
            AlertOrigin::Email => "Email-based".to_string(),
        }
    }

    /// Second line: origin and relative time
    pub fn caption(&self) -> String {
        format!("{} · {}", self.origin_caption(), self.alert.relative_time)
    }

    /// Status name in upper case
    pub fn badge_text(&self) -> String {
        self.alert.status.effective().as_str().to_uppercase()
    }

    pub fn playbook(&self) -> &'static ResponsePlaybook {
        ResponsePlaybook::for_severity(self.alert.severity)
    }
}

/// Width reserved for the status badge
const BADGE_WIDTH: u16 = 16;

impl Widget for &AlertRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.highlighted {
            buf.set_style(area, Style::default().bg(palette::GRID.color()));
        }

        let [body, badge] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(BADGE_WIDTH)]).areas(area);

        let severity = self.severity_color().color();
        let lines = vec![
            Line::from(vec![
                Span::styled("● ", Style::default().fg(severity)),
                Span::styled(
                    self.alert.kind.clone(),
                    Style::default()
                        .fg(palette::TEXT.color())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(self.caption(), Style::default().fg(palette::TEXT_DIM.color())),
            ]),
        ];
        Paragraph::new(lines).render(body, buf);

        let tone = self.tone();
        let label = Line::from(vec![
            Span::styled("▌", Style::default().fg(tone.border.color())),
            Span::styled(
                format!(" {} ", self.badge_text()),
                Style::default()
                    .fg(tone.fg.color())
                    .bg(tone.tint.color())
                    .add_modifier(Modifier::BOLD),
            ),
        ])
        .right_aligned();
        Paragraph::new(label).render(badge, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosoc::{demo_snapshot, AlertStatus, Severity};

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(ratatui::buffer::Cell::symbol).collect()
    }

    fn alert(severity: Severity, status: AlertStatus, source_ip: &str) -> Alert {
        Alert {
            id: "a1".into(),
            relative_time: "2 min ago".into(),
            kind: "Brute Force Attack".into(),
            severity,
            source_ip: source_ip.into(),
            status,
        }
    }

    #[test]
    fn critical_blocked_alert_scenario() {
        let alert = alert(Severity::Critical, AlertStatus::Blocked, "185.220.101.45");
        let row = AlertRow::new(&alert);

        assert_eq!(row.severity_color(), palette::CRITICAL);
        assert_eq!(row.origin_caption(), "Source: 185.220.101.45");
        assert_eq!(row.badge_text(), "BLOCKED");
        assert_eq!(row.tone(), theme::status_tone(AlertStatus::Blocked));

        let mut buf = Buffer::empty(Rect::new(0, 0, 70, 2));
        (&row).render(buf.area, &mut buf);
        let rendered = text(&buf);
        assert!(rendered.contains("Source: 185.220.101.45"));
        assert!(rendered.contains("BLOCKED"));
        assert_eq!(buf.content()[0].fg, palette::CRITICAL.color());
    }

    #[test]
    fn sentinel_source_is_email_based() {
        let alert = alert(Severity::High, AlertStatus::Quarantined, "N/A");
        assert_eq!(AlertRow::new(&alert).origin_caption(), "Email-based");
    }

    #[test]
    fn undefined_severity_still_renders() {
        let alert = alert(Severity::Unknown, AlertStatus::Unknown, "10.0.0.1");
        let row = AlertRow::new(&alert);
        assert_eq!(row.severity_color(), palette::CRITICAL);
        assert_eq!(row.badge_text(), "INVESTIGATING");

        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        (&row).render(buf.area, &mut buf);
    }

    #[test]
    fn highlight_paints_the_row_background() {
        let snapshot = demo_snapshot();
        let row = AlertRow::new(&snapshot.recent_alerts[1]).highlighted(true);
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 2));
        (&row).render(buf.area, &mut buf);
        assert_eq!(buf.content()[5].bg, palette::GRID.color());
    }

    #[test]
    fn playbook_follows_severity() {
        let alert = alert(Severity::Low, AlertStatus::Resolved, "N/A");
        assert!(!AlertRow::new(&alert).playbook().auto_execute);
    }
}

//! Frame layout: header, the active tab, footer.

use autosoc::{
    Alert, ComplianceStatus, ControlCheck, DashboardSnapshot, FrameworkDetail, ResponsePlaybook,
    WeeklyReport, HEALTHY_COMPLIANCE_SCORE,
};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::output::format_count;
use crate::theme::{self, palette, Rgb};
use crate::view::{Controller, Tab};
use crate::widgets::{summary_cards, AlertRow, ComplianceBadge, RiskGauge, SourceBar};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Legend entries under the threat mix bar
const CATEGORY_LEGEND_LEN: usize = 4;

/// Draw the whole dashboard.
pub fn draw(frame: &mut Frame, controller: &Controller) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(
            Style::default()
                .bg(palette::BG.color())
                .fg(palette::TEXT.color()),
        ),
        area,
    );

    let rejected = controller
        .snapshot()
        .and(controller.store().rejected());
    let [header, notice, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(u16::from(rejected.is_some())),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(frame, header, controller);
    if let Some(reason) = rejected {
        draw_rejection(frame, notice, reason);
    }
    match controller.snapshot() {
        Some(snapshot) => match controller.state().active_tab {
            Tab::Dashboard => draw_dashboard(frame, body, snapshot, controller),
            Tab::Alerts => draw_alerts(frame, body, snapshot, controller.state().highlighted_alert),
            Tab::Compliance => draw_compliance(frame, body, snapshot),
            Tab::Reports => draw_reports(frame, body, snapshot),
        },
        None => draw_waiting(frame, body, controller),
    }
    draw_footer(frame, footer, controller);
}

fn dim() -> Style {
    Style::default().fg(palette::TEXT_DIM.color())
}

fn panel(title: &str) -> Block<'static> {
    Block::bordered()
        .title(Span::styled(
            format!(" {} ", title.to_uppercase()),
            dim().add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(palette::BORDER.color()))
        .style(Style::default().bg(palette::SURFACE.color()))
}

/// Fixed-height slots stacked from the top of `area`
fn stacked(area: Rect, height: u16, count: usize) -> impl Iterator<Item = Rect> {
    (0..area.height / height.max(1))
        .take(count)
        .map(move |i| Rect::new(area.x, area.y + i * height, area.width, height))
}

fn draw_header(frame: &mut Frame, area: Rect, controller: &Controller) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette::BORDER.color()))
        .style(Style::default().bg(palette::SURFACE.color()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [brand, nav, status] = Layout::horizontal([
        Constraint::Length(28),
        Constraint::Min(0),
        Constraint::Length(16),
    ])
    .areas(inner);

    let brand_lines = vec![
        Line::styled(
            "🛡 AutoSOC",
            Style::default()
                .fg(palette::ACCENT.color())
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled("AI SECURITY OPERATIONS", dim()),
    ];
    frame.render_widget(Paragraph::new(brand_lines), brand);

    let state = controller.state();
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| Line::from(format!(" {} {} ", t.icon(), t.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.active_tab.index())
        .style(dim())
        .highlight_style(
            Style::default()
                .fg(palette::ACCENT.color())
                .bg(theme::tint(palette::ACCENT).color())
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ");
    frame.render_widget(tabs, nav);

    let dot = if state.pulse_on {
        palette::LOW
    } else {
        palette::LOW.over(palette::SURFACE, 0.35)
    };
    let status_lines = vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(dot.color())),
            Span::styled(
                "PROTECTED",
                Style::default()
                    .fg(palette::LOW.color())
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(state.clock.format("%H:%M:%S").to_string(), dim()),
    ];
    frame.render_widget(
        Paragraph::new(status_lines).alignment(Alignment::Right),
        status,
    );
}

fn draw_footer(frame: &mut Frame, area: Rect, controller: &Controller) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    frame.render_widget(
        Paragraph::new(Line::styled(
            format!("AutoSOC v{VERSION} · AI-Powered Security Operations"),
            dim(),
        )),
        left,
    );

    let store = controller.store();
    let (state, state_color) = if store.is_stale() {
        ("STALE", palette::HIGH)
    } else {
        ("ACTIVE", palette::LOW)
    };
    let events = controller
        .snapshot()
        .map_or_else(|| "-".to_string(), |s| format_count(s.summary.events_today));

    let mut spans = vec![
        Span::styled("Monitoring: ", dim()),
        Span::styled(state, Style::default().fg(state_color.color())),
        Span::styled(" · Events processed today: ", dim()),
        Span::styled(events, Style::default().fg(palette::ACCENT.color())),
    ];
    if let Some(at) = store.updated_at() {
        spans.push(Span::styled(format!(" · Updated {}", at.format("%H:%M:%S")), dim()));
    }
    if !store.warnings().is_empty() {
        spans.push(Span::styled(
            format!(" · ⚠ {}", store.warnings().len()),
            Style::default().fg(palette::MEDIUM.color()),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        right,
    );
}

fn draw_rejection(frame: &mut Frame, area: Rect, reason: &str) {
    let line = Line::from(vec![
        Span::styled(
            " ⚠ Latest update rejected, showing previous data: ",
            Style::default()
                .fg(palette::MEDIUM.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(reason.to_string(), Style::default().fg(palette::MEDIUM.color())),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette::MEDIUM.over(palette::BG, 0.15).color())),
        area,
    );
}

fn draw_waiting(frame: &mut Frame, area: Rect, controller: &Controller) {
    let mut lines = vec![Line::styled(
        format!("Waiting for the first snapshot from {}", controller.source()),
        dim(),
    )];
    if let Some(error) = controller.store().last_error() {
        lines.push(Line::styled(
            format!("Last error: {error}"),
            Style::default().fg(palette::CRITICAL.color()),
        ));
    }
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage(45),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

// ── Dashboard tab ──

fn draw_dashboard(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot, controller: &Controller) {
    let [banner_row, cards_row, charts_row, lists_row] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Min(10),
        Constraint::Min(12),
    ])
    .areas(area);

    let [banner, gauge_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(32)]).areas(banner_row);
    draw_client_banner(frame, banner, snapshot, controller);

    let gauge_block = panel("Risk Score");
    let gauge_inner = gauge_block.inner(gauge_area);
    frame.render_widget(gauge_block, gauge_area);
    frame.render_widget(&RiskGauge::new(snapshot.risk_score, snapshot.risk_level), gauge_inner);

    let card_areas: [Rect; 5] =
        Layout::horizontal([Constraint::Ratio(1, 5); 5]).areas(cards_row);
    for (card, card_area) in summary_cards(&snapshot.summary).iter().zip(card_areas) {
        frame.render_widget(card, card_area);
    }

    let [trend, categories] =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(charts_row);
    draw_trend(frame, trend, snapshot);
    draw_categories(frame, categories, snapshot);

    let [alerts, sources, compliance] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ])
    .areas(lists_row);
    draw_recent_alerts(frame, alerts, snapshot);
    draw_sources(frame, sources, snapshot);
    draw_compliance_badges(frame, compliance, snapshot);
}

fn draw_client_banner(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot, controller: &Controller) {
    let block = Block::bordered()
        .border_style(Style::default().fg(palette::BORDER.color()))
        .style(Style::default().bg(palette::GRID.color()));

    let (name, plan) = snapshot.client.as_ref().map_or_else(
        || (controller.source().to_string(), String::new()),
        |c| (c.name.clone(), format!("{} · ", c.plan)),
    );
    let mut lines = vec![
        Line::styled("ACTIVE CLIENT", dim()),
        Line::styled(
            name,
            Style::default()
                .fg(palette::TEXT.color())
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            format!(
                "{plan}{} endpoints monitored",
                format_count(snapshot.summary.endpoints)
            ),
            dim(),
        ),
    ];
    if let Some(warning) = controller.store().warnings().first() {
        lines.push(Line::styled(
            format!("⚠ {warning}"),
            Style::default().fg(palette::MEDIUM.color()),
        ));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[allow(clippy::cast_precision_loss)]
fn draw_trend(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let events: Vec<(f64, f64)> = snapshot
        .daily_trend
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d.events as f64))
        .collect();
    let threats: Vec<(f64, f64)> = snapshot
        .daily_trend
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d.threats as f64))
        .collect();

    let peak = snapshot
        .daily_trend
        .iter()
        .map(|d| d.events)
        .max()
        .unwrap_or(0)
        .max(1);
    let last_x = snapshot.daily_trend.len().saturating_sub(1).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("events")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette::ACCENT.color()))
            .data(&events),
        Dataset::default()
            .name("threats")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette::CRITICAL.color()))
            .data(&threats),
    ];

    let labels: Vec<Span> = snapshot
        .daily_trend
        .iter()
        .map(|d| Span::styled(d.label.clone(), dim()))
        .collect();

    let chart = Chart::new(datasets)
        .block(panel("7-Day Event Trend"))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette::GRID.color()))
                .bounds([0.0, last_x])
                .labels(labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette::GRID.color()))
                .bounds([0.0, peak as f64 * 1.1])
                .labels(vec![
                    Span::styled("0", dim()),
                    Span::styled(format_count(peak / 2), dim()),
                    Span::styled(format_count(peak), dim()),
                ]),
        );
    frame.render_widget(chart, area);
}

fn draw_categories(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let block = panel("Threat Types");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width);
    let mut share = Vec::new();
    let mut used = 0;
    for (i, category) in snapshot.threat_categories.iter().enumerate() {
        let cells = (usize::try_from(category.percent.min(100)).unwrap_or(0) * width / 100).min(width - used);
        used += cells;
        share.push(Span::styled(
            "█".repeat(cells),
            Style::default().fg(theme::category_color(i).color()),
        ));
    }

    let mut lines = vec![Line::from(share), Line::default()];
    for (i, category) in snapshot
        .threat_categories
        .iter()
        .take(CATEGORY_LEGEND_LEN)
        .enumerate()
    {
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(theme::category_color(i).color())),
            Span::styled(format!("{:<22}", category.name), dim()),
            Span::styled(
                format!("{:>3}%", category.percent),
                Style::default()
                    .fg(palette::TEXT.color())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_recent_alerts(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let block = panel("Recent Alerts").title_top(
        Line::styled(
            format!(" {} HIGH+ ", snapshot.high_plus_count()),
            Style::default()
                .fg(palette::CRITICAL.color())
                .add_modifier(Modifier::BOLD),
        )
        .right_aligned(),
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    draw_alert_rows(frame, inner, &snapshot.recent_alerts, None);
}

fn draw_alert_rows(frame: &mut Frame, area: Rect, alerts: &[Alert], highlighted: Option<usize>) {
    for (i, (alert, slot)) in alerts.iter().zip(stacked(area, 2, alerts.len())).enumerate() {
        frame.render_widget(
            &AlertRow::new(alert).highlighted(highlighted == Some(i)),
            slot,
        );
    }
}

fn draw_sources(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let block = panel("Top Attack Sources");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bars = SourceBar::from_snapshot(snapshot);
    for (bar, slot) in bars.iter().zip(stacked(inner, 2, bars.len())) {
        frame.render_widget(bar, slot);
    }
}

fn draw_compliance_badges(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let block = panel("Compliance");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let badges: Vec<ComplianceBadge> = snapshot
        .compliance
        .iter()
        .map(|(key, status)| ComplianceBadge::new(key, *status))
        .collect();
    for (badge, slot) in badges.iter().zip(stacked(inner, 2, badges.len())) {
        frame.render_widget(badge, Rect { height: 1, ..slot });
    }
}

// ── Alerts tab ──

fn draw_alerts(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot, highlighted: Option<usize>) {
    let [list, detail] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    let block = panel("All Alerts · Last 24 Hours");
    let inner = block.inner(list);
    frame.render_widget(block, list);
    draw_alert_rows(frame, inner, &snapshot.recent_alerts, highlighted);

    let selected = highlighted.and_then(|i| snapshot.recent_alerts.get(i));
    let lines = selected.map_or_else(
        || vec![Line::styled("Select an alert with j/k or the arrow keys", dim())],
        alert_detail,
    );
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel("Alert Detail"))
            .wrap(Wrap { trim: true }),
        detail,
    );
}

fn field(name: &str, value: String, color: Rgb) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:<10}"), dim()),
        Span::styled(value, Style::default().fg(color.color())),
    ])
}

fn alert_detail(alert: &Alert) -> Vec<Line<'static>> {
    let row = AlertRow::new(alert);
    let playbook: &ResponsePlaybook = row.playbook();

    let mut lines = vec![
        Line::styled(
            alert.kind.clone(),
            Style::default()
                .fg(palette::TEXT.color())
                .add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        field("Severity", alert.severity.effective().as_str().to_uppercase(), row.severity_color()),
        field("Status", row.badge_text(), row.tone().fg),
        field("Origin", row.origin_caption(), palette::TEXT),
        field("Seen", alert.relative_time.clone(), palette::TEXT),
        field("Alert ID", alert.id.clone(), palette::TEXT_DIM),
        Line::default(),
        Line::styled(
            format!(
                "RESPONSE PLAYBOOK ({})",
                if playbook.auto_execute { "automatic" } else { "manual review" }
            ),
            dim().add_modifier(Modifier::BOLD),
        ),
    ];
    for (n, action) in playbook.actions.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", n + 1), dim()),
            Span::styled(action.as_str(), Style::default().fg(palette::ACCENT.color())),
        ]));
    }
    let channels: Vec<&str> = playbook.channels.iter().map(|c| c.as_str()).collect();
    lines.push(field(
        "Notify",
        if channels.is_empty() {
            "none".to_string()
        } else {
            channels.join(", ")
        },
        palette::TEXT,
    ));
    lines
}

// ── Compliance tab ──

fn draw_compliance(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let cards = compliance_cards(snapshot);
    if cards.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled("No compliance frameworks reported", dim()))
                .block(panel("Compliance Dashboard")),
            area,
        );
        return;
    }

    let count = u32::try_from(cards.len()).unwrap_or(u32::MAX);
    let areas = Layout::horizontal(vec![Constraint::Ratio(1, count); cards.len()]).split(area);
    for (card, card_area) in cards.iter().zip(areas.iter()) {
        draw_framework_card(frame, *card_area, card);
    }
}

/// One compliance card; bare badges carry no score or checks
#[derive(Debug, Clone, PartialEq, Eq)]
struct FrameworkCard<'a> {
    framework: &'a str,
    status: ComplianceStatus,
    score: Option<u8>,
    checks: &'a [ControlCheck],
}

impl<'a> From<&'a FrameworkDetail> for FrameworkCard<'a> {
    fn from(detail: &'a FrameworkDetail) -> Self {
        Self {
            framework: &detail.framework,
            status: detail.status,
            score: Some(detail.score),
            checks: &detail.checks,
        }
    }
}

/// Detailed assessments, or the bare compliance map when none were sent
fn compliance_cards(snapshot: &DashboardSnapshot) -> Vec<FrameworkCard<'_>> {
    if !snapshot.compliance_details.is_empty() {
        return snapshot.compliance_details.iter().map(FrameworkCard::from).collect();
    }
    snapshot
        .compliance
        .iter()
        .map(|(key, status)| FrameworkCard {
            framework: key,
            status: *status,
            score: None,
            checks: &[],
        })
        .collect()
}

fn draw_framework_card(frame: &mut Frame, area: Rect, card: &FrameworkCard<'_>) {
    let block = Block::bordered()
        .border_style(Style::default().fg(palette::BORDER.color()))
        .style(Style::default().bg(palette::SURFACE.color()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [badge_row, _, score_row, bar_row, _, checks_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    frame.render_widget(&ComplianceBadge::new(card.framework, card.status), badge_row);

    if let Some(score) = card.score {
        let color = theme::compliance_score_color(score >= HEALTHY_COMPLIANCE_SCORE);
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("{score}%"),
                Style::default().fg(color.color()).add_modifier(Modifier::BOLD),
            )),
            score_row,
        );

        let filled = usize::from(bar_row.width) * usize::from(score.min(100)) / 100;
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("━".repeat(filled), Style::default().fg(color.color())),
                Span::styled(
                    "━".repeat(usize::from(bar_row.width) - filled),
                    Style::default().fg(palette::BORDER.color()),
                ),
            ])),
            bar_row,
        );
    }

    let checks: Vec<Line> = card
        .checks
        .iter()
        .map(|check| {
            if check.passing {
                Line::styled(format!("{} ✓", check.name), dim())
            } else {
                Line::styled(
                    format!("{} ⚠", check.name),
                    Style::default().fg(palette::HIGH.color()),
                )
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(checks), checks_area);
}

// ── Reports tab ──

fn draw_reports(frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
    let lines = snapshot.weekly_report.as_ref().map_or_else(
        || {
            vec![Line::styled(
                "No weekly report has been published yet",
                dim(),
            )]
        },
        |report| report_lines(report, snapshot),
    );
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel("Security Reports"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn report_lines(report: &WeeklyReport, snapshot: &DashboardSnapshot) -> Vec<Line<'static>> {
    let verdict = theme::level_color(snapshot.risk_level);
    let mut lines = vec![
        Line::styled(format!("WEEKLY REPORT · {}", report.period.to_uppercase()), dim()),
        Line::styled(
            "Your Security Update",
            Style::default()
                .fg(palette::TEXT.color())
                .add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::styled(
            report.headline.clone(),
            Style::default().fg(verdict.color()).add_modifier(Modifier::BOLD),
        ),
        Line::styled(report.summary.clone(), dim()),
        Line::default(),
    ];
    for section in &report.sections {
        lines.push(Line::styled(
            format!("{} {}", section.icon, section.title),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(format!("   {}", section.body), dim()));
        lines.push(Line::default());
    }
    if !report.next_report.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Next report: ", Style::default().fg(palette::ACCENT.color())),
            Span::styled(report.next_report.clone(), dim()),
        ]));
    }
    lines
}

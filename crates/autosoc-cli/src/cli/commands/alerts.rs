//! `autosoc alerts` - Recent alerts with their response playbooks.

use anyhow::Result;
use autosoc::Alert;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::cli::args::AlertsArgs;
use crate::output::{print_structured, OutputFormat};
use crate::theme::palette;
use crate::widgets::AlertRow;

#[derive(Tabled)]
struct AlertTableRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "Seen")]
    seen: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Playbook")]
    playbook: String,
}

/// Flat record for CSV output
#[derive(Debug, Serialize, PartialEq, Eq)]
struct AlertRecord<'a> {
    id: &'a str,
    time: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    severity: &'static str,
    source_ip: &'a str,
    status: &'static str,
    playbook: String,
}

impl<'a> From<&'a Alert> for AlertRecord<'a> {
    fn from(alert: &'a Alert) -> Self {
        Self {
            id: &alert.id,
            time: &alert.relative_time,
            kind: &alert.kind,
            severity: alert.severity.as_str(),
            source_ip: &alert.source_ip,
            status: alert.status.as_str(),
            playbook: AlertRow::new(alert).playbook().describe(),
        }
    }
}

pub async fn execute(ctx: Context, args: AlertsArgs) -> Result<()> {
    let snapshot = ctx.snapshot().await?;
    let alerts = select(&snapshot.recent_alerts, args.high_plus);

    if print_structured(ctx.output_format, &alerts)? {
        return Ok(());
    }

    match ctx.output_format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for alert in &alerts {
                writer.serialize(AlertRecord::from(*alert))?;
            }
            writer.flush()?;
        }
        _ => print_pretty(&alerts, snapshot.high_plus_count()),
    }

    Ok(())
}

fn select(alerts: &[Alert], high_plus: bool) -> Vec<&Alert> {
    alerts
        .iter()
        .filter(|a| !high_plus || a.severity.is_high_plus())
        .collect()
}

fn print_pretty(alerts: &[&Alert], high_plus: usize) {
    println!(
        "{} {}",
        "Recent Alerts:".bold(),
        palette::CRITICAL.paint(&format!("{high_plus} HIGH+")).bold()
    );
    println!();

    if alerts.is_empty() {
        println!("  No alerts in the last 24 hours.");
        return;
    }

    let rows: Vec<AlertTableRow> = alerts
        .iter()
        .map(|alert| {
            let row = AlertRow::new(alert);
            let severity = alert.severity.effective().as_str().to_uppercase();
            AlertTableRow {
                severity: row.severity_color().paint(&format!("● {severity}")).to_string(),
                kind: alert.kind.clone(),
                origin: row.origin_caption(),
                seen: alert.relative_time.clone(),
                status: row.tone().fg.paint(&row.badge_text()).to_string(),
                playbook: row.playbook().describe(),
            }
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosoc::demo_snapshot;

    #[test]
    fn high_plus_filter_keeps_order() {
        let snapshot = demo_snapshot();
        let ids: Vec<&str> = select(&snapshot.recent_alerts, true)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, ["a1", "a2", "a6"]);
        assert_eq!(select(&snapshot.recent_alerts, false).len(), 6);
    }

    #[test]
    fn csv_record_carries_playbook() {
        let snapshot = demo_snapshot();
        let record = AlertRecord::from(&snapshot.recent_alerts[2]);
        assert_eq!(record.kind, "Phishing Email");
        assert_eq!(record.source_ip, "N/A");
        assert_eq!(record.playbook, "alert_analyst -> create_ticket (manual)");

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&record).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.starts_with("id,time,type,severity,source_ip,status,playbook\n"));
        assert!(out.contains("a3,1 hr ago,Phishing Email,medium,N/A,quarantined"));
    }
}

//! `autosoc overview` - Risk, headline counters and compliance at a glance.

use anyhow::Result;
use autosoc::{framework_display_name, DashboardSnapshot};
use colored::Colorize;

use super::Context;
use crate::output::{format_count, format_percent, print_structured, OutputFormat};
use crate::theme::palette;
use crate::widgets::{summary_cards, BadgeVariant, RiskGauge};

pub async fn execute(ctx: Context) -> Result<()> {
    let snapshot = ctx.snapshot().await?;

    if print_structured(ctx.output_format, &snapshot)? {
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Csv {
        let mut writer = csv::Writer::from_writer(std::io::stdout());
        for (key, value) in summary_rows(&snapshot) {
            writer.write_record([key, value.as_str()])?;
        }
        writer.flush()?;
        return Ok(());
    }

    print_pretty(&snapshot);
    Ok(())
}

/// Flat `metric,value` view of the headline numbers
fn summary_rows(snapshot: &DashboardSnapshot) -> Vec<(&'static str, String)> {
    let s = &snapshot.summary;
    vec![
        ("metric", "value".to_string()),
        ("risk_score", snapshot.risk_score.to_string()),
        ("risk_level", snapshot.risk_level.effective().to_string()),
        ("events_today", s.events_today.to_string()),
        ("threats_detected", s.threats_detected.to_string()),
        ("threats_blocked", s.threats_blocked.to_string()),
        ("endpoints", s.endpoints.to_string()),
        ("uptime_percent", s.uptime_percent.to_string()),
        ("high_plus_alerts", snapshot.high_plus_count().to_string()),
    ]
}

fn print_pretty(snapshot: &DashboardSnapshot) {
    if let Some(client) = &snapshot.client {
        println!("{} {}", "Client:".bold(), client.name.bold());
        if !client.plan.is_empty() {
            println!("        {}", client.plan.dimmed());
        }
        println!();
    }

    let gauge = RiskGauge::new(snapshot.risk_score, snapshot.risk_level);
    println!(
        "{} {} {}  {}",
        "Risk Score:".bold(),
        gauge.color().paint(&format!("{}/100", gauge.score())).bold(),
        gauge.needle(),
        gauge.color().paint(&gauge.caption().to_uppercase())
    );
    println!();

    for card in summary_cards(&snapshot.summary) {
        let sub = card.sub.as_deref().unwrap_or_default();
        println!(
            "  {:<22} {:>10}  {}",
            card.heading(),
            card.color.paint(&card.value).bold(),
            sub.dimmed()
        );
    }
    println!();

    println!(
        "{} {}",
        "HIGH+ alerts:".bold(),
        palette::CRITICAL.paint(&snapshot.high_plus_count().to_string())
    );

    if !snapshot.compliance.is_empty() {
        println!();
        println!("{}", "Compliance:".bold());
        for (key, status) in &snapshot.compliance {
            let variant = BadgeVariant::for_status(*status);
            println!(
                "  {:<12} {}",
                framework_display_name(key),
                variant.color().paint(variant.text())
            );
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "Uptime {} · {} endpoints · generated {}",
            format_percent(snapshot.summary.uptime_percent),
            format_count(snapshot.summary.endpoints),
            snapshot
                .generated_at
                .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        )
        .dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_rows_start_with_header() {
        let rows = summary_rows(&autosoc::demo_snapshot());
        assert_eq!(rows[0], ("metric", "value".to_string()));
        assert!(rows.contains(&("risk_score", "24".to_string())));
        assert!(rows.contains(&("risk_level", "low".to_string())));
        assert!(rows.contains(&("high_plus_alerts", "3".to_string())));
    }
}

//! `autosoc compliance` - Compliance status per framework.

use anyhow::Result;
use autosoc::{framework_display_name, ComplianceStatus, DashboardSnapshot};
use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::output::{print_structured, OutputFormat};
use crate::theme::{self, palette};
use crate::widgets::BadgeVariant;

/// Width of the score bar in characters
const BAR_WIDTH: usize = 20;

/// One framework as printed: status from the map, score and checks if known
#[derive(Debug, Serialize)]
struct FrameworkLine {
    framework: String,
    name: String,
    status: ComplianceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u8>,
    failing_checks: Vec<String>,
}

fn frameworks(snapshot: &DashboardSnapshot) -> Vec<FrameworkLine> {
    snapshot
        .compliance
        .iter()
        .map(|(key, status)| {
            let detail = snapshot.framework_detail(key);
            FrameworkLine {
                framework: key.clone(),
                name: framework_display_name(key),
                status: *status,
                score: detail.map(|d| d.score),
                failing_checks: detail
                    .map(|d| {
                        d.checks
                            .iter()
                            .filter(|c| !c.passing)
                            .map(|c| c.name.clone())
                            .collect()
                    })
                    .unwrap_or_default(),
            }
        })
        .collect()
}

pub async fn execute(ctx: Context) -> Result<()> {
    let snapshot = ctx.snapshot().await?;
    let lines = frameworks(&snapshot);

    if print_structured(ctx.output_format, &lines)? {
        return Ok(());
    }

    if ctx.output_format == OutputFormat::Csv {
        let mut writer = csv::Writer::from_writer(std::io::stdout());
        writer.write_record(["framework", "status", "score", "failing_checks"])?;
        for line in &lines {
            let status = if line.status.is_compliant() { "compliant" } else { "action_needed" };
            let score = line.score.map(|s| s.to_string()).unwrap_or_default();
            let failing = line.failing_checks.join("; ");
            writer.write_record([line.framework.as_str(), status, score.as_str(), failing.as_str()])?;
        }
        writer.flush()?;
        return Ok(());
    }

    print_pretty(&snapshot, &lines);
    Ok(())
}

fn print_pretty(snapshot: &DashboardSnapshot, lines: &[FrameworkLine]) {
    println!("{}", "Compliance Dashboard:".bold());
    println!();

    if lines.is_empty() {
        println!("  No compliance frameworks reported.");
        return;
    }

    for line in lines {
        let variant = BadgeVariant::for_status(line.status);
        println!("  {:<12} {}", line.name.bold(), variant.color().paint(variant.text()));

        if let Some(detail) = snapshot.framework_detail(&line.framework) {
            let color = theme::compliance_score_color(detail.is_healthy());
            let filled = BAR_WIDTH * usize::from(detail.score.min(100)) / 100;
            println!(
                "               {} {}",
                color.paint(&format!("{}%", detail.score)).bold(),
                format!(
                    "{}{}",
                    color.paint(&"━".repeat(filled)),
                    palette::BORDER.paint(&"━".repeat(BAR_WIDTH - filled))
                )
            );
            for check in &detail.checks {
                if check.passing {
                    println!("               {} {}", "✓".green(), check.name.dimmed());
                } else {
                    println!("               {} {}", palette::HIGH.paint("⚠"), check.name);
                }
            }
        }
        println!();
    }
}

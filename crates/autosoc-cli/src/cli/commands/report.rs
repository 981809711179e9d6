//! `autosoc report` - Weekly security report.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::print_structured;
use crate::theme::{self, palette};

pub async fn execute(ctx: Context) -> Result<()> {
    let snapshot = ctx.snapshot().await?;

    if print_structured(ctx.output_format, &snapshot.weekly_report)? {
        return Ok(());
    }

    let Some(report) = &snapshot.weekly_report else {
        println!("No weekly report has been published yet.");
        return Ok(());
    };

    println!("{}", format!("WEEKLY REPORT · {}", report.period.to_uppercase()).dimmed());
    println!("{}", "Your Security Update".bold());
    println!();
    println!(
        "{}",
        theme::level_color(snapshot.risk_level).paint(&report.headline).bold()
    );
    println!("{}", report.summary.dimmed());
    println!();

    for section in &report.sections {
        println!("{} {}", section.icon, section.title.bold());
        println!("   {}", section.body);
        println!();
    }

    if !report.next_report.is_empty() {
        println!(
            "{} {}",
            palette::ACCENT.paint("Next report:"),
            report.next_report.dimmed()
        );
    }

    Ok(())
}

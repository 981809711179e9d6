//! `autosoc health` - Check that the read API is reachable.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::print_structured;

pub async fn execute(ctx: Context) -> Result<()> {
    let client = ctx.client()?;
    let status = client.health().await?;

    if print_structured(ctx.output_format, &status)? {
        return Ok(());
    }

    if status.is_healthy() {
        println!("{} {} is {}", "OK:".green().bold(), client.base_url(), status.status.green());
    } else {
        println!("{} {} reports {}", "Degraded:".yellow().bold(), client.base_url(), status.status.yellow());
    }

    Ok(())
}

//! `autosoc config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::{print_structured, OutputFormat};

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { pairs } => set_config(&pairs),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load_unchecked()?;

    if print_structured(ctx.output_format, &config)? {
        return Ok(());
    }

    println!("{}", "Current Configuration:".bold());
    println!();
    println!("  {} {}", "api_url:".bold(), config.api_url);
    println!("  {} {}", "client_id:".bold(), config.client_id);
    println!("  {} {}", "source:".bold(), config.source);
    println!("  {} {}s", "refresh_secs:".bold(), config.refresh_secs);
    println!("  {} {}ms", "clock_tick_ms:".bold(), config.clock_tick_ms);
    println!("  {} {}ms", "pulse_ms:".bold(), config.pulse_ms);
    println!("  {} {}s", "timeout_secs:".bold(), config.timeout_secs);
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or(OutputFormat::Pretty)
    );
    let bands = config.risk_bands;
    println!(
        "  {} medium >= {}, high >= {}, critical >= {}",
        "risk_bands:".bold(),
        bands.medium,
        bands.high,
        bands.critical
    );

    Ok(())
}

/// Apply `KEY VALUE` pairs in order, then validate the result once.
fn set_config(pairs: &[String]) -> Result<()> {
    if let [.., dangling] = pairs {
        if pairs.len() % 2 != 0 {
            anyhow::bail!("config set takes KEY VALUE pairs; {dangling} has no value");
        }
    }

    let mut config = Config::load_unchecked()?;
    for pair in pairs.chunks(2) {
        config.set(&pair[0], &pair[1])?;
    }
    config.validate()?;
    config.save()?;

    for pair in pairs.chunks(2) {
        println!("{} {} set to {}.", "Success:".green().bold(), pair[0], pair[1].cyan());
    }
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}

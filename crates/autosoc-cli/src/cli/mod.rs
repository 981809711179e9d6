//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging::{self, LogTarget};
use crate::output::OutputFormat;

/// Log file used while the dashboard owns the terminal
const DASHBOARD_LOG: &str = "autosoc.log";

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then let flags and environment override it.
    // `config` reads the file itself and must work on a broken one.
    let mut config = Config::load_unchecked()?;
    apply_overrides(&mut config, &cli);
    if !matches!(cli.command, Some(Commands::Config(_))) {
        config.validate()?;
    }

    let command = cli.command.unwrap_or(Commands::Dashboard);

    let log_target = match command {
        Commands::Dashboard => LogTarget::File(Config::data_dir()?.join(DASHBOARD_LOG)),
        _ => LogTarget::Stderr,
    };
    logging::init(cli.verbose, log_target)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    let ctx = commands::Context {
        config,
        output_format,
        verbose: cli.verbose,
        snapshot_file: cli.snapshot,
    };

    match command {
        Commands::Dashboard => commands::dashboard::execute(ctx).await,
        Commands::Overview => commands::overview::execute(ctx).await,
        Commands::Alerts(args) => commands::alerts::execute(ctx, args).await,
        Commands::Compliance => commands::compliance::execute(ctx).await,
        Commands::Report => commands::report::execute(ctx).await,
        Commands::Health => commands::health::execute(ctx).await,
        Commands::Serve(args) => commands::serve::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}

/// Flag (or its environment variable) beats the file.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.api_url {
        config.api_url.clone_from(url);
    }
    if let Some(id) = &cli.client_id {
        config.client_id.clone_from(id);
    }
    if let Some(source) = cli.source {
        config.source = source;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceKind;

    #[test]
    fn flags_override_file_values() {
        let mut config = Config {
            api_url: "http://file.example/api/v1".into(),
            ..Config::default()
        };
        let cli = Cli::try_parse_from([
            "autosoc",
            "--api-url",
            "http://flag.example/api/v1",
            "--client-id",
            "acme-007",
            "--source",
            "http",
        ])
        .unwrap();

        apply_overrides(&mut config, &cli);
        assert_eq!(config.api_url, "http://flag.example/api/v1");
        assert_eq!(config.client_id, "acme-007");
        assert_eq!(config.source, SourceKind::Http);
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let mut config = Config {
            refresh_secs: 5,
            source: SourceKind::Http,
            ..Config::default()
        };
        let expected = config.clone();
        let cli = Cli::try_parse_from(["autosoc", "overview"]).unwrap();

        // environment may still supply the url or client id
        apply_overrides(&mut config, &cli);
        assert_eq!(config.source, expected.source);
        assert_eq!(config.refresh_secs, 5);
    }
}

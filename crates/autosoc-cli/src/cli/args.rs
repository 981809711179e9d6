//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::SourceKind;
use crate::output::OutputFormat;

/// Security operations dashboard for small businesses
///
/// Shows risk, alerts, compliance and the weekly report of one monitored
/// client. Runs the full-screen dashboard when no command is given.
#[derive(Parser, Debug)]
#[command(name = "autosoc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the read API
    #[arg(long, env = "AUTOSOC_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Tenant identifier sent with every request
    #[arg(long, env = "AUTOSOC_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// Where snapshots come from
    #[arg(long, global = true, value_enum)]
    pub source: Option<SourceKind>,

    /// Read the snapshot from a saved JSON feed instead
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "source")]
    pub snapshot: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full-screen dashboard (default)
    Dashboard,

    /// Risk score, headline counters and compliance at a glance
    Overview,

    /// Recent alerts with their response playbooks
    Alerts(AlertsArgs),

    /// Compliance status per framework
    Compliance,

    /// Weekly security report
    Report,

    /// Check that the read API is reachable
    Health,

    /// Serve the demo snapshot over HTTP
    Serve(ServeArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Alerts command
// ============================================================================

#[derive(Args, Debug)]
pub struct AlertsArgs {
    /// Only show critical and high alerts
    #[arg(long)]
    pub high_plus: bool,
}

// ============================================================================
// Serve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set one or more configuration values
    Set {
        /// KEY VALUE pairs (e.g. refresh_secs 15 risk_bands.high 60)
        #[arg(required = true, num_args = 2.., value_name = "KEY VALUE")]
        pairs: Vec<String>,
    },

    /// Show configuration file path
    Path,
}

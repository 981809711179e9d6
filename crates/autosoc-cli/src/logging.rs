//! Tracing subscriber setup.

use anyhow::{Context as _, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "autosoc=info,autosoc_cli=info,autosoc_client=info,autosoc_core=info";

/// Filter used with `--verbose`
const VERBOSE_FILTER: &str =
    "autosoc=debug,autosoc_cli=debug,autosoc_client=debug,autosoc_core=debug";

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Standard error, for one-shot commands and the server
    Stderr,
    /// Append to a file, while the dashboard owns the terminal
    File(PathBuf),
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }))
}

/// Install the global subscriber.
pub fn init(verbose: bool, target: LogTarget) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(verbose));

    match target {
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install logger: {e}")),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
        }
    }
}

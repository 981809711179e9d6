//! Command implementations.

pub mod alerts;
pub mod compliance;
pub mod config;
pub mod dashboard;
pub mod health;
pub mod overview;
pub mod report;
pub mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use autosoc::{
    validate, DashboardSnapshot, DemoSource, RetryConfig, SnapshotSource, SocClient, StaticSource,
};
use colored::Colorize;
use tracing::debug;

use crate::config::{Config, SourceKind};
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration (file plus overrides)
    pub config: Config,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,

    /// Saved feed to read instead of the configured source
    pub snapshot_file: Option<PathBuf>,
}

impl Context {
    /// HTTP client for the configured read API.
    pub fn client(&self) -> Result<SocClient> {
        SocClient::builder(&self.config.api_url)
            .client_id(&self.config.client_id)
            .timeout(self.config.timeout())
            .retry(RetryConfig::default())
            .build()
            .with_context(|| format!("invalid API settings for {}", self.config.api_url))
    }

    /// Snapshot source selected by flags and configuration.
    pub fn source(&self) -> Result<Arc<dyn SnapshotSource>> {
        if let Some(path) = &self.snapshot_file {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let source = StaticSource::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?;
            return Ok(Arc::new(source));
        }

        match self.config.source {
            SourceKind::Demo => Ok(Arc::new(DemoSource)),
            SourceKind::Http => Ok(Arc::new(self.client()?)),
        }
    }

    /// Fetch one snapshot and check it before anything is printed.
    ///
    /// Warnings go to stderr so structured output stays parseable.
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let source = self.source()?;
        debug!(source = %source.describe(), "fetching snapshot");
        let snapshot = source
            .fetch_snapshot()
            .await
            .with_context(|| format!("fetching snapshot from {}", source.describe()))?;

        let warnings = validate(&snapshot, &self.config.risk_bands)?;
        for warning in &warnings {
            eprintln!("{} {}", "Warning:".yellow().bold(), warning);
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn context() -> Context {
        Context {
            config: Config::default(),
            output_format: OutputFormat::Pretty,
            verbose: false,
            snapshot_file: None,
        }
    }

    #[tokio::test]
    async fn demo_source_by_default() {
        let snapshot = context().snapshot().await.unwrap();
        assert_eq!(snapshot.risk_score, 24);
    }

    #[tokio::test]
    async fn saved_feed_takes_precedence() {
        let mut feed = autosoc::demo_snapshot();
        feed.risk_score = 40;
        feed.risk_level = autosoc::RiskLevel::Medium;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&feed).unwrap().as_bytes())
            .unwrap();

        let ctx = Context {
            snapshot_file: Some(file.path().to_path_buf()),
            ..context()
        };
        assert_eq!(ctx.snapshot().await.unwrap().risk_score, 40);
    }

    #[tokio::test]
    async fn malformed_feed_is_rejected() {
        let mut feed = autosoc::demo_snapshot();
        feed.daily_trend.truncate(3);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&feed).unwrap().as_bytes())
            .unwrap();

        let ctx = Context {
            snapshot_file: Some(file.path().to_path_buf()),
            ..context()
        };
        let err = ctx.snapshot().await.unwrap_err();
        assert!(err.to_string().contains("malformed snapshot"));
    }

    #[test]
    fn http_source_needs_a_valid_url() {
        let mut ctx = context();
        ctx.config.source = SourceKind::Http;
        ctx.config.api_url = "not a url".into();
        assert!(ctx.source().is_err());
    }
}

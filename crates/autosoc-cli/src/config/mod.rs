//! Configuration management.

use anyhow::{Context as _, Result};
use autosoc::{RiskBands, DEFAULT_BASE_URL, DEFAULT_CLIENT_ID};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;

/// Where snapshots come from.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in demo snapshot
    #[default]
    Demo,
    /// Live read API
    Http,
}

impl std::str::FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "demo" => Ok(Self::Demo),
            "http" | "api" => Ok(Self::Http),
            _ => anyhow::bail!("Unknown source: {s}\nValid sources: demo, http"),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Demo => write!(f, "demo"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the read API.
    pub api_url: String,

    /// Tenant identifier sent with every request.
    pub client_id: String,

    /// Snapshot source.
    pub source: SourceKind,

    /// Seconds between snapshot refreshes in the dashboard.
    pub refresh_secs: u64,

    /// Clock update period in milliseconds.
    pub clock_tick_ms: u64,

    /// PROTECTED indicator blink period in milliseconds.
    pub pulse_ms: u64,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// Default output format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,

    /// Score thresholds of the risk levels.
    pub risk_bands: RiskBands,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            source: SourceKind::Demo,
            refresh_secs: 30,
            clock_tick_ms: 1000,
            pulse_ms: 1200,
            timeout_secs: 10,
            output_format: None,
            risk_bands: RiskBands::default(),
        }
    }
}

/// Keys accepted by `config set`, with their help text.
pub const KEYS: &[(&str, &str)] = &[
    ("api_url", "Base URL of the read API"),
    ("client_id", "Tenant identifier"),
    ("source", "Snapshot source (demo/http)"),
    ("refresh_secs", "Dashboard refresh interval in seconds"),
    ("clock_tick_ms", "Clock update period in milliseconds"),
    ("pulse_ms", "PROTECTED indicator blink period in milliseconds"),
    ("timeout_secs", "HTTP request timeout in seconds"),
    ("output_format", "Default output format (pretty/json/csv/yaml)"),
    ("risk_bands.medium", "First score banded as medium"),
    ("risk_bands.high", "First score banded as high"),
    ("risk_bands.critical", "First score banded as critical"),
];

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dirs()?.config_dir().join("config.toml"))
    }

    /// Directory for the dashboard log file.
    pub fn data_dir() -> Result<PathBuf> {
        Ok(Self::dirs()?.data_dir().to_path_buf())
    }

    fn dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("io", "autosoc", "autosoc")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load the default file without checking its values, so `config`
    /// can still show and repair it.
    pub fn load_unchecked() -> Result<Self> {
        Self::load_unchecked_from(&Self::path()?)
    }

    /// Load configuration from a file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::load_unchecked_from(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_unchecked_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Reject settings the dashboard cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.risk_bands.validate()?;
        let zero: Vec<&str> = [
            ("refresh_secs", self.refresh_secs),
            ("clock_tick_ms", self.clock_tick_ms),
            ("pulse_ms", self.pulse_ms),
            ("timeout_secs", self.timeout_secs),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(key, _)| key)
        .collect();
        if !zero.is_empty() {
            anyhow::bail!("{} must be greater than zero", zero.join(", "));
        }
        if self.client_id.trim().is_empty() {
            anyhow::bail!("client_id must not be empty");
        }
        Ok(())
    }

    /// Update one key from its string form.
    ///
    /// Only the value's syntax is checked here. Call [`Config::validate`]
    /// once every change is applied.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => self.api_url = value.to_string(),
            "client_id" => self.client_id = value.to_string(),
            "source" => self.source = value.parse()?,
            "refresh_secs" => self.refresh_secs = value.parse()?,
            "clock_tick_ms" => self.clock_tick_ms = value.parse()?,
            "pulse_ms" => self.pulse_ms = value.parse()?,
            "timeout_secs" => self.timeout_secs = value.parse()?,
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "risk_bands.medium" => self.risk_bands.medium = value.parse()?,
            "risk_bands.high" => self.risk_bands.high = value.parse()?,
            "risk_bands.critical" => self.risk_bands.critical = value.parse()?,
            _ => {
                let available: Vec<String> = KEYS
                    .iter()
                    .map(|(k, help)| format!("  {k:<20} - {help}"))
                    .collect();
                anyhow::bail!(
                    "Unknown config key: {key}\n\nAvailable keys:\n{}",
                    available.join("\n")
                );
            }
        }
        Ok(())
    }

    /// Snapshot refresh period.
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// Clock update period.
    pub const fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_tick_ms)
    }

    /// Pulse toggle period.
    pub const fn pulse_interval(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    /// HTTP request timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

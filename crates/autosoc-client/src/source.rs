//! Where dashboard snapshots come from.
//!
//! Rendering code only sees [`SnapshotSource`]; swapping the demo data for
//! the live API is a configuration change.

use async_trait::async_trait;
use autosoc_core::{demo_snapshot, DashboardSnapshot, Result};

use crate::SocClient;

/// Anything that can produce a full dashboard snapshot
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch one complete snapshot
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot>;

    /// Short human description for status lines and logs
    fn describe(&self) -> String;
}

/// Serves the built-in demo snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

#[async_trait]
impl SnapshotSource for DemoSource {
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot> {
        Ok(demo_snapshot())
    }

    fn describe(&self) -> String {
        "demo data".to_string()
    }
}

#[async_trait]
impl SnapshotSource for SocClient {
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot> {
        self.overview().await
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.base_url(), self.client_id())
    }
}

/// Fixed snapshot, for tests and offline replays of a saved feed
#[derive(Debug, Clone)]
pub struct StaticSource {
    snapshot: DashboardSnapshot,
}

impl StaticSource {
    /// Always return this snapshot
    #[must_use]
    pub const fn new(snapshot: DashboardSnapshot) -> Self {
        Self { snapshot }
    }

    /// Parse a snapshot saved from the read API
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl SnapshotSource for StaticSource {
    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn describe(&self) -> String {
        "static snapshot".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_source_returns_demo_snapshot() {
        let snapshot = DemoSource.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.risk_score, 24);
        assert_eq!(DemoSource.describe(), "demo data");
    }

    #[test]
    fn static_source_parses_saved_feed() {
        let json = serde_json::to_string(&demo_snapshot()).unwrap();
        let source = StaticSource::from_json(&json).unwrap();
        assert_eq!(source.snapshot.recent_alerts.len(), 6);
        assert!(StaticSource::from_json("{").is_err());
    }

    #[tokio::test]
    async fn sources_are_object_safe() {
        let sources: Vec<Box<dyn SnapshotSource>> = vec![
            Box::new(DemoSource),
            Box::new(StaticSource::new(demo_snapshot())),
        ];
        for source in &sources {
            assert!(source.fetch_snapshot().await.is_ok());
        }
    }
}

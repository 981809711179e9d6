//! Last-known-good snapshot with stale and warning bookkeeping.

use std::sync::Arc;

use autosoc::{validate, DashboardSnapshot, RiskBands, SocError, Warning};
use chrono::{DateTime, Local};
use tracing::{debug, warn};

/// What [`SnapshotStore::accept`] did with an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The new snapshot replaced the old one
    Replaced,
    /// The snapshot broke an invariant; the old one stays
    Rejected,
    /// The fetch failed; the old one stays and is marked stale
    Stale,
}

/// Holds the snapshot on screen.
///
/// Updates replace the whole snapshot or nothing.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    bands: RiskBands,
    current: Option<Arc<DashboardSnapshot>>,
    stale: bool,
    last_error: Option<String>,
    rejected: Option<String>,
    warnings: Vec<Warning>,
    updated_at: Option<DateTime<Local>>,
}

impl SnapshotStore {
    pub const fn new(bands: RiskBands) -> Self {
        Self {
            bands,
            current: None,
            stale: false,
            last_error: None,
            rejected: None,
            warnings: Vec::new(),
            updated_at: None,
        }
    }

    /// Take the result of one fetch.
    pub fn accept(&mut self, result: Result<DashboardSnapshot, SocError>) -> StoreOutcome {
        match result {
            Ok(snapshot) => match validate(&snapshot, &self.bands) {
                Ok(warnings) => {
                    for w in &warnings {
                        warn!(warning = %w, "snapshot accepted with warning");
                    }
                    debug!(risk_score = snapshot.risk_score, "snapshot replaced");
                    self.current = Some(Arc::new(snapshot));
                    self.warnings = warnings;
                    self.stale = false;
                    self.last_error = None;
                    self.rejected = None;
                    self.updated_at = Some(Local::now());
                    StoreOutcome::Replaced
                }
                Err(e) => {
                    warn!(error = %e, "snapshot rejected, keeping previous");
                    self.last_error = Some(e.to_string());
                    self.rejected = Some(e.to_string());
                    StoreOutcome::Rejected
                }
            },
            Err(e) => {
                warn!(error = %e, "snapshot fetch failed, showing last known data");
                self.stale = true;
                self.last_error = Some(e.to_string());
                StoreOutcome::Stale
            }
        }
    }

    /// Snapshot on screen, if any has been accepted yet
    pub fn current(&self) -> Option<&DashboardSnapshot> {
        self.current.as_deref()
    }

    /// Shared handle to the snapshot on screen
    pub fn shared(&self) -> Option<Arc<DashboardSnapshot>> {
        self.current.clone()
    }

    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Why the latest update was turned away, until a good one arrives
    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub const fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosoc::demo_snapshot;

    #[test]
    fn first_snapshot_is_accepted() {
        let mut store = SnapshotStore::new(RiskBands::default());
        assert!(store.current().is_none());

        assert_eq!(store.accept(Ok(demo_snapshot())), StoreOutcome::Replaced);
        assert_eq!(store.current().map(|s| s.risk_score), Some(24));
        assert!(!store.is_stale());
        assert!(store.warnings().is_empty());
        assert!(store.updated_at().is_some());
    }

    #[test]
    fn fetch_failure_keeps_last_known_and_marks_stale() {
        let mut store = SnapshotStore::new(RiskBands::default());
        store.accept(Ok(demo_snapshot()));

        let outcome = store.accept(Err(SocError::Timeout(10)));
        assert_eq!(outcome, StoreOutcome::Stale);
        assert!(store.is_stale());
        assert_eq!(store.current().map(|s| s.risk_score), Some(24));
        assert!(store.last_error().is_some());

        store.accept(Ok(demo_snapshot()));
        assert!(!store.is_stale());
        assert!(store.last_error().is_none());
    }

    #[test]
    fn malformed_snapshot_is_rejected_whole() {
        let mut store = SnapshotStore::new(RiskBands::default());
        store.accept(Ok(demo_snapshot()));
        let before = store.shared();

        let mut bad = demo_snapshot();
        bad.risk_score = 70;
        bad.daily_trend.pop();

        assert_eq!(store.accept(Ok(bad)), StoreOutcome::Rejected);
        assert!(Arc::ptr_eq(&before.unwrap(), &store.shared().unwrap()));
        assert_eq!(store.current().map(|s| s.risk_score), Some(24));
        assert!(store.last_error().unwrap().contains("malformed snapshot"));
        assert!(store.rejected().unwrap().contains("expected 7"));
        assert!(!store.is_stale());

        store.accept(Ok(demo_snapshot()));
        assert!(store.rejected().is_none());
    }

    #[test]
    fn fetch_failure_does_not_count_as_rejection() {
        let mut store = SnapshotStore::new(RiskBands::default());
        store.accept(Ok(demo_snapshot()));
        store.accept(Err(SocError::Timeout(10)));
        assert!(store.rejected().is_none());
    }

    #[test]
    fn failure_before_first_snapshot_leaves_store_empty() {
        let mut store = SnapshotStore::new(RiskBands::default());
        store.accept(Err(SocError::Connection("refused".into())));
        assert!(store.current().is_none());
        assert!(store.is_stale());
    }

    #[test]
    fn level_mismatch_is_kept_as_warning() {
        let mut store = SnapshotStore::new(RiskBands::default());
        let mut snapshot = demo_snapshot();
        snapshot.risk_score = 80;

        assert_eq!(store.accept(Ok(snapshot)), StoreOutcome::Replaced);
        assert!(matches!(store.warnings()[0], Warning::LevelMismatch { .. }));
    }
}

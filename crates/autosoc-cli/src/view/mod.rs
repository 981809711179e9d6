//! View controller: UI selection state plus the snapshot store.
//!
//! Everything here is synchronous and terminal-free. The TUI loop feeds it
//! key presses and [`TimerEvent`]s and draws whatever it holds.

mod state;
mod store;
mod timers;

pub use state::{reduce, Action, Tab, ViewState};
pub use store::{SnapshotStore, StoreOutcome};
pub use timers::{TimerConfig, TimerEvent, TimerKind, Timers};

use autosoc::{DashboardSnapshot, RiskBands};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks of the loop around the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Nothing beyond a possible state change
    None,
    /// Fetch a snapshot now
    Refresh,
    /// Leave the dashboard
    Quit,
}

/// Model and selection state of the running dashboard
#[derive(Debug, Clone)]
pub struct Controller {
    state: ViewState,
    store: SnapshotStore,
    source: String,
}

impl Controller {
    pub const fn new(source: String, bands: RiskBands, now: DateTime<Local>) -> Self {
        Self {
            state: ViewState::new(now),
            store: SnapshotStore::new(bands),
            source,
        }
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub const fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.store.current()
    }

    /// Description of the snapshot source
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(self.state.clone(), action);
    }

    fn alert_count(&self) -> usize {
        self.snapshot().map_or(0, |s| s.recent_alerts.len())
    }

    pub fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Clock(now) => self.dispatch(Action::ClockTick(now)),
            TimerEvent::Pulse => self.dispatch(Action::TogglePulse),
            TimerEvent::Snapshot(result) => {
                if self.store.accept(result) == StoreOutcome::Replaced {
                    // keep the highlight inside a possibly shorter list
                    if let Some(i) = self.state.highlighted_alert {
                        let alerts = self.alert_count();
                        if i >= alerts {
                            self.dispatch(Action::HighlightPrev { alerts });
                        }
                    }
                }
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Intent {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Intent::Quit;
        }

        if let KeyCode::Char(c) = key.code {
            if let Some(tab) = Tab::for_key(c) {
                self.dispatch(Action::SelectTab(tab));
                return Intent::None;
            }
        }

        let alerts = self.alert_count();
        let action = match key.code {
            KeyCode::Char('q') => return Intent::Quit,
            KeyCode::Char('r') => return Intent::Refresh,
            KeyCode::Tab | KeyCode::Right => Action::NextTab,
            KeyCode::BackTab | KeyCode::Left => Action::PrevTab,
            KeyCode::Char('j') | KeyCode::Down if self.state.active_tab == Tab::Alerts => {
                Action::HighlightNext { alerts }
            }
            KeyCode::Char('k') | KeyCode::Up if self.state.active_tab == Tab::Alerts => {
                Action::HighlightPrev { alerts }
            }
            KeyCode::Esc => Action::ClearHighlight,
            _ => return Intent::None,
        };
        self.dispatch(action);
        Intent::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosoc::{demo_snapshot, SocError};
    use chrono::TimeZone;

    fn controller() -> Controller {
        let now = Local.with_ymd_and_hms(2026, 2, 24, 9, 0, 0).unwrap();
        let mut c = Controller::new("demo data".into(), RiskBands::default(), now);
        c.on_timer(TimerEvent::Snapshot(Ok(demo_snapshot())));
        c
    }

    fn press(c: &mut Controller, code: KeyCode) -> Intent {
        c.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn number_keys_select_tabs() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('3'));
        assert_eq!(c.state().active_tab, Tab::Compliance);
        press(&mut c, KeyCode::Char('3'));
        assert_eq!(c.state().active_tab, Tab::Compliance);
        press(&mut c, KeyCode::Char('1'));
        assert_eq!(c.state().active_tab, Tab::Dashboard);
        press(&mut c, KeyCode::BackTab);
        assert_eq!(c.state().active_tab, Tab::Reports);
    }

    #[test]
    fn highlight_only_moves_in_alerts_tab() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('j'));
        assert_eq!(c.state().highlighted_alert, None);

        press(&mut c, KeyCode::Char('2'));
        press(&mut c, KeyCode::Char('j'));
        press(&mut c, KeyCode::Down);
        assert_eq!(c.state().highlighted_alert, Some(1));
        press(&mut c, KeyCode::Esc);
        assert_eq!(c.state().highlighted_alert, None);
    }

    #[test]
    fn quit_and_refresh_intents() {
        let mut c = controller();
        assert_eq!(press(&mut c, KeyCode::Char('r')), Intent::Refresh);
        assert_eq!(press(&mut c, KeyCode::Char('q')), Intent::Quit);
        assert_eq!(
            c.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Intent::Quit
        );
        assert_eq!(press(&mut c, KeyCode::Char('x')), Intent::None);
    }

    #[test]
    fn timer_events_update_state() {
        let mut c = controller();
        c.on_timer(TimerEvent::Pulse);
        assert!(!c.state().pulse_on);

        c.on_timer(TimerEvent::Snapshot(Err(SocError::Timeout(10))));
        assert!(c.store().is_stale());
        assert_eq!(c.snapshot().map(|s| s.risk_score), Some(24));
    }

    #[test]
    fn highlight_follows_shrinking_feed() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('2'));
        for _ in 0..6 {
            press(&mut c, KeyCode::Char('j'));
        }
        assert_eq!(c.state().highlighted_alert, Some(5));

        let mut smaller = demo_snapshot();
        smaller.recent_alerts.truncate(2);
        c.on_timer(TimerEvent::Snapshot(Ok(smaller)));
        assert_eq!(c.state().highlighted_alert, Some(1));
    }
}

//! Tab, clock and pulse state with its pure transition function.

use chrono::{DateTime, Local};

/// Dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Alerts,
    Compliance,
    Reports,
}

impl Tab {
    /// Tab bar order
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Alerts, Self::Compliance, Self::Reports];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Alerts => "Alerts",
            Self::Compliance => "Compliance",
            Self::Reports => "Reports",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "⬡",
            Self::Alerts => "◈",
            Self::Compliance => "◎",
            Self::Reports => "≡",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Alerts => 1,
            Self::Compliance => 2,
            Self::Reports => 3,
        }
    }

    /// Tab at a bar position, wrapping around
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Tab bound to a number key (`1`-`4`)
    pub const fn for_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Self::Dashboard),
            '2' => Some(Self::Alerts),
            '3' => Some(Self::Compliance),
            '4' => Some(Self::Reports),
            _ => None,
        }
    }

    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub const fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }
}

/// UI-only state of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_tab: Tab,
    pub clock: DateTime<Local>,
    /// Drives the blinking PROTECTED indicator
    pub pulse_on: bool,
    /// Alert under the keyboard cursor in the alerts tab
    pub highlighted_alert: Option<usize>,
}

impl ViewState {
    pub const fn new(now: DateTime<Local>) -> Self {
        Self {
            active_tab: Tab::Dashboard,
            clock: now,
            pulse_on: true,
            highlighted_alert: None,
        }
    }
}

/// Everything that can change [`ViewState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    NextTab,
    PrevTab,
    ClockTick(DateTime<Local>),
    TogglePulse,
    /// Move the highlight down a list of `alerts` rows
    HighlightNext { alerts: usize },
    /// Move the highlight up a list of `alerts` rows
    HighlightPrev { alerts: usize },
    ClearHighlight,
}

/// Apply one action.
///
/// Changing tabs drops the alert highlight; re-selecting the active tab
/// changes nothing.
#[must_use]
pub fn reduce(state: ViewState, action: Action) -> ViewState {
    match action {
        Action::SelectTab(tab) => switch_tab(state, tab),
        Action::NextTab => {
            let tab = state.active_tab.next();
            switch_tab(state, tab)
        }
        Action::PrevTab => {
            let tab = state.active_tab.prev();
            switch_tab(state, tab)
        }
        Action::ClockTick(now) => ViewState { clock: now, ..state },
        Action::TogglePulse => ViewState {
            pulse_on: !state.pulse_on,
            ..state
        },
        Action::HighlightNext { alerts } => {
            let highlighted_alert = match (alerts, state.highlighted_alert) {
                (0, _) => None,
                (_, None) => Some(0),
                (n, Some(i)) => Some((i + 1).min(n - 1)),
            };
            ViewState {
                highlighted_alert,
                ..state
            }
        }
        Action::HighlightPrev { alerts } => {
            let highlighted_alert = match (alerts, state.highlighted_alert) {
                (0, _) => None,
                (n, None) => Some(n - 1),
                (n, Some(i)) => Some(i.saturating_sub(1).min(n - 1)),
            };
            ViewState {
                highlighted_alert,
                ..state
            }
        }
        Action::ClearHighlight => ViewState {
            highlighted_alert: None,
            ..state
        },
    }
}

fn switch_tab(state: ViewState, tab: Tab) -> ViewState {
    if state.active_tab == tab {
        return state;
    }
    ViewState {
        active_tab: tab,
        highlighted_alert: None,
        ..state
    }
}

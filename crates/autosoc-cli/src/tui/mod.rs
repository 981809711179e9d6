//! Full-screen dashboard.
//!
//! The loop owns the terminal, the [`Controller`] and the [`Timers`]. It
//! redraws after every key press or timer event.

mod render;

pub use render::draw;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use autosoc::{RiskBands, SnapshotSource};
use chrono::Local;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::view::{Controller, Intent, TimerConfig, Timers};

/// Raw mode plus alternate screen, restored on drop
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("failed to enter alternate screen");
        }
        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to disable raw mode");
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!(error = %e, "failed to leave alternate screen");
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Run the dashboard until the user quits.
pub async fn run(
    source: Arc<dyn SnapshotSource>,
    timer_config: TimerConfig,
    bands: RiskBands,
) -> Result<()> {
    let description = source.describe();
    info!(source = %description, "starting dashboard");

    let mut guard = TerminalGuard::enter()?;
    let (tx, mut rx) = mpsc::channel(64);
    let mut timers = Timers::start(timer_config, source, tx);
    let mut controller = Controller::new(description, bands, Local::now());
    let mut keys = EventStream::new();

    loop {
        guard
            .terminal
            .draw(|frame| draw(frame, &controller))
            .context("failed to draw dashboard")?;

        tokio::select! {
            Some(event) = rx.recv() => controller.on_timer(event),
            maybe_event = keys.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match controller.on_key(key) {
                        Intent::Quit => break,
                        Intent::Refresh => timers.request_refresh(),
                        Intent::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("failed to read terminal event"),
                None => break,
            },
        }
    }

    timers.cancel();
    info!("dashboard closed");
    Ok(())
}

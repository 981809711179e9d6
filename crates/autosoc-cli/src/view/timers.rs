//! Recurring work behind the dashboard: clock, pulse and snapshot polling.
//!
//! [`Timers`] owns every background task. [`Timers::cancel_timer`] stops one
//! of them. Dropping the handle, or calling [`Timers::cancel`], aborts them
//! all, including a fetch in flight.

use std::sync::Arc;
use std::time::Duration;

use autosoc::{DashboardSnapshot, SnapshotSource, SocError};
use chrono::{DateTime, Local};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// Message from a timer task to the UI loop
#[derive(Debug)]
pub enum TimerEvent {
    Clock(DateTime<Local>),
    Pulse,
    Snapshot(Result<DashboardSnapshot, SocError>),
}

/// Periods of the three recurring tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub clock: Duration,
    pub pulse: Duration,
    pub refresh: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            clock: Duration::from_millis(1000),
            pulse: Duration::from_millis(1200),
            refresh: Duration::from_secs(30),
        }
    }
}

/// One of the recurring tasks owned by [`Timers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Clock,
    Pulse,
    Refresh,
}

impl TimerKind {
    pub const ALL: [Self; 3] = [Self::Clock, Self::Pulse, Self::Refresh];
}

/// Disposable handle over the clock ticker, pulse ticker and refresh poller
#[derive(Debug)]
pub struct Timers {
    clock: Option<JoinHandle<()>>,
    pulse: Option<JoinHandle<()>>,
    refresh: Option<JoinHandle<()>>,
    refresh_now: Arc<Notify>,
}

impl Timers {
    /// Spawn all tasks. The poller fetches once immediately.
    pub fn start(
        config: TimerConfig,
        source: Arc<dyn SnapshotSource>,
        events: mpsc::Sender<TimerEvent>,
    ) -> Self {
        let refresh_now = Arc::new(Notify::new());
        let clock = tokio::spawn(clock_ticker(config.clock, events.clone()));
        let pulse = tokio::spawn(pulse_ticker(config.pulse, events.clone()));
        let refresh = tokio::spawn(refresh_poller(
            config.refresh,
            source,
            Arc::clone(&refresh_now),
            events,
        ));
        debug!(?config, "timers started");
        Self {
            clock: Some(clock),
            pulse: Some(pulse),
            refresh: Some(refresh),
            refresh_now,
        }
    }

    fn slot(&self, kind: TimerKind) -> &Option<JoinHandle<()>> {
        match kind {
            TimerKind::Clock => &self.clock,
            TimerKind::Pulse => &self.pulse,
            TimerKind::Refresh => &self.refresh,
        }
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<JoinHandle<()>> {
        match kind {
            TimerKind::Clock => &mut self.clock,
            TimerKind::Pulse => &mut self.pulse,
            TimerKind::Refresh => &mut self.refresh,
        }
    }

    /// Fetch now instead of waiting for the next poll
    pub fn request_refresh(&self) {
        self.refresh_now.notify_one();
    }

    pub fn is_running(&self, kind: TimerKind) -> bool {
        self.slot(kind).as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Tasks still owned by this handle
    pub fn active(&self) -> usize {
        TimerKind::ALL
            .into_iter()
            .filter(|&kind| self.is_running(kind))
            .count()
    }

    /// Abort one task and leave the others running. Idempotent.
    pub fn cancel_timer(&mut self, kind: TimerKind) {
        if let Some(handle) = self.slot_mut(kind).take() {
            handle.abort();
            debug!(?kind, "timer cancelled");
        }
    }

    /// Abort every task. Idempotent.
    pub fn cancel(&mut self) {
        for kind in TimerKind::ALL {
            self.cancel_timer(kind);
        }
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn clock_ticker(period: Duration, events: mpsc::Sender<TimerEvent>) {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticks.tick().await;
        if events.send(TimerEvent::Clock(Local::now())).await.is_err() {
            break;
        }
    }
}

async fn pulse_ticker(period: Duration, events: mpsc::Sender<TimerEvent>) {
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticks.tick().await;
        if events.send(TimerEvent::Pulse).await.is_err() {
            break;
        }
    }
}

async fn refresh_poller(
    period: Duration,
    source: Arc<dyn SnapshotSource>,
    refresh_now: Arc<Notify>,
    events: mpsc::Sender<TimerEvent>,
) {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticks.tick() => {}
            () = refresh_now.notified() => ticks.reset(),
        }
        debug!(source = %source.describe(), "fetching snapshot");
        let result = source.fetch_snapshot().await;
        if events.send(TimerEvent::Snapshot(result)).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use autosoc::{demo_snapshot, DemoSource};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config() -> TimerConfig {
        TimerConfig {
            clock: Duration::from_millis(1000),
            pulse: Duration::from_millis(1200),
            refresh: Duration::from_secs(30),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_at_configured_periods() {
        let (tx, mut rx) = mpsc::channel(64);
        let timers = Timers::start(config(), Arc::new(DemoSource), tx);
        let started = Instant::now();

        let mut clocks = 0;
        let mut pulses = 0;
        let mut snapshots = 0;
        while pulses < 2 {
            match rx.recv().await {
                Some(TimerEvent::Clock(_)) => clocks += 1,
                Some(TimerEvent::Pulse) => pulses += 1,
                Some(TimerEvent::Snapshot(result)) => {
                    assert!(result.is_ok());
                    snapshots += 1;
                }
                None => panic!("channel closed while timers were running"),
            }
        }

        // second pulse lands at 2.4s; clock ticked at 0, 1 and 2s
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(2400) && elapsed < Duration::from_millis(3000));
        assert_eq!(clocks, 3);
        assert_eq!(snapshots, 1);
        assert_eq!(timers.active(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_leaves_no_pending_timers() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut timers = Timers::start(config(), Arc::new(DemoSource), tx);
        assert!(rx.recv().await.is_some());

        timers.cancel();
        assert_eq!(timers.active(), 0);
        timers.cancel();

        // every sender lived in an aborted task, so the channel drains and closes
        let drained = tokio::time::timeout(Duration::from_secs(60), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels() {
        let (tx, mut rx) = mpsc::channel(64);
        let timers = Timers::start(config(), Arc::new(DemoSource), tx);
        drop(timers);

        let drained = tokio::time::timeout(Duration::from_secs(60), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn pulse_stops_alone() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut timers = Timers::start(config(), Arc::new(DemoSource), tx);
        timers.cancel_timer(TimerKind::Pulse);
        timers.cancel_timer(TimerKind::Pulse);

        let mut clocks = 0;
        let mut pulses = 0;
        while clocks < 5 {
            match rx.recv().await {
                Some(TimerEvent::Clock(_)) => clocks += 1,
                Some(TimerEvent::Pulse) => pulses += 1,
                Some(TimerEvent::Snapshot(_)) => {}
                None => panic!("channel closed while clock was running"),
            }
        }

        assert_eq!(pulses, 0);
        assert!(!timers.is_running(TimerKind::Pulse));
        assert!(timers.is_running(TimerKind::Clock));
        assert!(timers.is_running(TimerKind::Refresh));
        assert_eq!(timers.active(), 2);
    }

    struct CountingSource(AtomicUsize);

    #[async_trait]
    impl SnapshotSource for CountingSource {
        async fn fetch_snapshot(&self) -> autosoc::Result<DashboardSnapshot> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(demo_snapshot())
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn manual_refresh_fetches_before_the_next_poll() {
        let source = Arc::new(CountingSource(AtomicUsize::new(0)));
        let (tx, mut rx) = mpsc::channel(64);
        let timers = Timers::start(
            TimerConfig {
                clock: Duration::from_secs(3600),
                pulse: Duration::from_secs(3600),
                refresh: Duration::from_secs(3600),
            },
            Arc::clone(&source) as Arc<dyn SnapshotSource>,
            tx,
        );

        let mut snapshots = 0;
        while snapshots < 2 {
            match rx.recv().await {
                Some(TimerEvent::Snapshot(_)) => {
                    snapshots += 1;
                    if snapshots == 1 {
                        timers.request_refresh();
                    }
                }
                Some(_) => {}
                None => panic!("channel closed"),
            }
        }

        assert_eq!(source.0.load(Ordering::SeqCst), 2);
    }
}

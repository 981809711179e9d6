//! `autosoc dashboard` - Full-screen dashboard.

use anyhow::Result;

use super::Context;
use crate::tui;
use crate::view::TimerConfig;

pub async fn execute(ctx: Context) -> Result<()> {
    let source = ctx.source()?;
    let timers = timer_config(&ctx);
    tui::run(source, timers, ctx.config.risk_bands).await
}

fn timer_config(ctx: &Context) -> TimerConfig {
    TimerConfig {
        clock: ctx.config.clock_interval(),
        pulse: ctx.config.pulse_interval(),
        refresh: ctx.config.refresh_interval(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::OutputFormat;
    use std::time::Duration;

    #[test]
    fn periods_come_from_configuration() {
        let ctx = Context {
            config: Config {
                refresh_secs: 5,
                pulse_ms: 600,
                ..Config::default()
            },
            output_format: OutputFormat::Pretty,
            verbose: false,
            snapshot_file: None,
        };
        let timers = timer_config(&ctx);
        assert_eq!(timers.refresh, Duration::from_secs(5));
        assert_eq!(timers.pulse, Duration::from_millis(600));
        assert_eq!(timers.clock, Duration::from_secs(1));
    }
}

//! Live controller input

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use padlink_engine::hid::create_transport_port;
use padlink_engine::{DeviceMultiplexer, Poller, TickSummary};
use tracing::{info, warn};

use crate::commands::config;
use crate::error::CliError;
use crate::output;

/// How long to wait for a tick before checking the poller again.
const TICK_WAIT: Duration = Duration::from_secs(1);

pub fn execute(config_path: Option<&Path>, ticks: Option<u64>, json: bool) -> Result<()> {
    let config = config::load(config_path)?;
    let port =
        create_transport_port().map_err(|e| CliError::TransportUnavailable(e.to_string()))?;

    let mut multiplexer = DeviceMultiplexer::new();
    if multiplexer.discover(port.as_ref(), &config) == 0 {
        return Err(CliError::NoControllers.into());
    }
    if !json {
        let names: Vec<&str> = multiplexer.families().iter().map(|f| f.name()).collect();
        println!("Watching {} (Ctrl+C to stop)", names.join(", "));
    }

    let poller = Poller::spawn(multiplexer, &config)?;
    let mut totals = TickSummary::default();
    let mut seen: u64 = 0;

    loop {
        if ticks.is_some_and(|limit| seen >= limit) {
            break;
        }
        match poller.ticks().recv_timeout(TICK_WAIT) {
            Ok(tick) => {
                seen += 1;
                accumulate(&mut totals, &tick.summary);
                for snapshot in tick.snapshots.iter().filter(|s| s.changed_this_tick()) {
                    output::print_snapshot(tick.tick, snapshot, json);
                }
                if tick.summary.polled == tick.summary.removed && tick.summary.removed > 0 {
                    warn!("All controllers are gone");
                    break;
                }
            }
            Err(e) if e.is_timeout() => {
                warn!("No tick within {:?}", TICK_WAIT);
            }
            Err(_) => {
                warn!("Poller stopped publishing");
                break;
            }
        }
    }

    let multiplexer = poller.stop()?;
    info!(remaining = multiplexer.len(), "Watch finished");
    output::print_watch_summary(seen, &totals, json);
    Ok(())
}

fn accumulate(totals: &mut TickSummary, tick: &TickSummary) {
    totals.polled += tick.polled;
    totals.succeeded += tick.succeeded;
    totals.timed_out += tick.timed_out;
    totals.skipped += tick.skipped;
    totals.removed += tick.removed;
}

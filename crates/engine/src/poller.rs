//! Poller thread
//!
//! Runs a [`DeviceMultiplexer`] on a dedicated thread and publishes every
//! tick on a bounded channel. A consumer that falls behind loses ticks; the
//! poll loop never waits on it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use padlink_errors::{PadlinkError, Result};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::multiplexer::{DeviceMultiplexer, SlotSnapshot, TickSummary};

/// Ticks buffered for a slow consumer before new ones are dropped.
pub const TICK_CHANNEL_CAPACITY: usize = 64;

/// One published multiplexer tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollTick {
    /// 1-based tick number.
    pub tick: u64,
    pub summary: TickSummary,
    pub snapshots: Vec<SlotSnapshot>,
}

pub struct Poller {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<DeviceMultiplexer>>,
    ticks: Receiver<PollTick>,
}

impl Poller {
    /// Move `multiplexer` onto a new thread and start ticking it.
    pub fn spawn(multiplexer: DeviceMultiplexer, config: &EngineConfig) -> Result<Self> {
        let (tick_tx, tick_rx) = channel::bounded(TICK_CHANNEL_CAPACITY);
        let running = Arc::new(AtomicBool::new(true));
        let interval = Duration::from_millis(config.poll_interval_ms);

        let thread_running = Arc::clone(&running);
        let thread = thread::Builder::new()
            .name("padlink-poller".to_string())
            .spawn(move || Self::poll_thread_main(multiplexer, tick_tx, thread_running, interval))
            .map_err(|e| PadlinkError::other(format!("Failed to spawn poller thread: {e}")))?;

        info!(interval_ms = config.poll_interval_ms, "Poller started");
        Ok(Self {
            running,
            thread: Some(thread),
            ticks: tick_rx,
        })
    }

    fn poll_thread_main(
        mut multiplexer: DeviceMultiplexer,
        tick_tx: Sender<PollTick>,
        running: Arc<AtomicBool>,
        interval: Duration,
    ) -> DeviceMultiplexer {
        let mut tick: u64 = 0;
        while running.load(Ordering::Acquire) {
            tick += 1;
            let summary = multiplexer.poll_all();
            let snapshots = multiplexer.reports();

            match tick_tx.try_send(PollTick {
                tick,
                summary,
                snapshots,
            }) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(tick, "Tick channel full, dropping tick");
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!(tick, "Tick receiver gone, stopping poll loop");
                    break;
                }
            }

            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        debug!(ticks = tick, "Poll loop exited");
        multiplexer
    }

    /// Published ticks, oldest first.
    pub fn ticks(&self) -> &Receiver<PollTick> {
        &self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && self.thread.is_some()
    }

    /// Stop the poll loop, join the thread and hand back the multiplexer.
    pub fn stop(mut self) -> Result<DeviceMultiplexer> {
        self.stop_blocking()
    }

    fn stop_blocking(&mut self) -> Result<DeviceMultiplexer> {
        self.running.store(false, Ordering::Release);
        let thread = self
            .thread
            .take()
            .ok_or_else(|| PadlinkError::other("Poller already stopped"))?;

        match thread.join() {
            Ok(multiplexer) => {
                info!("Poller thread stopped cleanly");
                Ok(multiplexer)
            }
            Err(_) => {
                error!("Poller thread panicked");
                Err(PadlinkError::other("Poller thread panicked"))
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if self.thread.is_some() {
            warn!("Poller dropped while running, forcing stop");
            if let Err(e) = self.stop_blocking() {
                error!("Failed to stop poller on drop: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("running", &self.is_running())
            .field("pending_ticks", &self.ticks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::vendor::DualSenseSession;
    use padlink_device_types::{ControllerButtons, ControllerFamily};
    use padlink_hid_common::mock::MockTransport;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn dualsense_input(face_buttons: u8) -> Vec<u8> {
        let mut data = vec![0u8; 64];
        data[0] = 0x01;
        data[1..5].copy_from_slice(&[0x80; 4]);
        data[8] = face_buttons | 0x08;
        data
    }

    fn multiplexer_with_dualsense(
        config: &EngineConfig,
    ) -> std::result::Result<(MockTransport, DeviceMultiplexer), Box<dyn std::error::Error>> {
        let mock = MockTransport::usb();
        let session = DualSenseSession::connect(Box::new(mock.clone()), config)?;
        let mut multiplexer = DeviceMultiplexer::new();
        multiplexer.insert(Box::new(session));
        Ok((mock, multiplexer))
    }

    #[test]
    fn test_first_tick_is_published() -> TestResult {
        let config = EngineConfig::default();
        let (mock, multiplexer) = multiplexer_with_dualsense(&config)?;
        mock.queue_read(dualsense_input(0x20));

        let poller = Poller::spawn(multiplexer, &config)?;
        let first = poller.ticks().recv_timeout(Duration::from_secs(2))?;
        assert_eq!(first.tick, 1);
        assert_eq!(first.summary.polled, 1);
        assert_eq!(first.summary.succeeded, 1);
        assert_eq!(first.snapshots.len(), 1);
        assert_eq!(first.snapshots[0].family, ControllerFamily::DualSense);
        assert!(first.snapshots[0].report.is_pressed(ControllerButtons::A));

        let multiplexer = poller.stop()?;
        assert_eq!(multiplexer.families(), vec![ControllerFamily::DualSense]);
        Ok(())
    }

    #[test]
    fn test_idle_device_keeps_ticking() -> TestResult {
        let config = EngineConfig::default();
        let (_mock, multiplexer) = multiplexer_with_dualsense(&config)?;

        let poller = Poller::spawn(multiplexer, &config)?;
        let first = poller.ticks().recv_timeout(Duration::from_secs(2))?;
        let second = poller.ticks().recv_timeout(Duration::from_secs(2))?;
        assert_eq!(first.summary.timed_out, 1);
        assert!(second.tick > first.tick);

        assert_eq!(poller.stop()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_disconnect_removes_session_on_thread() -> TestResult {
        let config = EngineConfig::default();
        let (mock, multiplexer) = multiplexer_with_dualsense(&config)?;
        mock.disconnect();

        let poller = Poller::spawn(multiplexer, &config)?;
        let first = poller.ticks().recv_timeout(Duration::from_secs(2))?;
        assert_eq!(first.summary.removed, 1);
        assert!(first.snapshots.is_empty());

        assert!(poller.stop()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_unread_ticks_do_not_block_stop() -> TestResult {
        let config = EngineConfig {
            poll_interval_ms: 0,
            ..EngineConfig::default()
        };
        let poller = Poller::spawn(DeviceMultiplexer::new(), &config)?;
        thread::sleep(Duration::from_millis(20));
        assert!(poller.is_running());
        assert!(poller.ticks().len() <= TICK_CHANNEL_CAPACITY);

        let multiplexer = poller.stop()?;
        assert!(multiplexer.is_empty());
        Ok(())
    }

    #[test]
    fn test_drop_stops_thread() -> TestResult {
        let poller = Poller::spawn(DeviceMultiplexer::new(), &EngineConfig::default())?;
        let running = Arc::clone(&poller.running);
        drop(poller);
        assert!(!running.load(Ordering::Acquire));
        Ok(())
    }
}

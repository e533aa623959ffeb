//! Periodic clock display refresh.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Format used for the clock display.
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Shared, latest formatted clock reading.
pub type ClockSink = Arc<RwLock<String>>;

pub fn format_clock<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(CLOCK_FORMAT).to_string()
}

/// Publish the local time into `sink` every `interval` until `cancel` fires.
///
/// The first reading is published immediately. The ticker never touches
/// calendar state.
pub fn spawn_clock(
    runtime: &Handle,
    interval: Duration,
    sink: ClockSink,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let period = interval.max(Duration::from_millis(10));
    runtime.spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Clock ticker stopped");
                    break;
                }
                _ = ticker.tick() => {
                    *sink.write() = format_clock(&Local::now());
                }
            }
        }
    })
}

//! Clock feed: emits the `time` event once per second.
//!
//! The loop runs on the async runtime and is cancelled through the token in
//! `ClockState`; `start` and `stop` are idempotent.

use std::fmt::Display;
use std::pin::pin;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use futures::future::Either;
use parking_lot::Mutex;
use tauri::{AppHandle, Emitter, Manager};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Event name the UI listens on.
pub const TIME_EVENT: &str = "time";

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Cancellation handle of the running loop, if any.
#[derive(Default)]
pub struct ClockState {
    stop_token: Mutex<Option<CancellationToken>>,
}

/// RFC 1123 style timestamp, e.g. `Mon, 02 Jan 2006 15:04:05 +0000`.
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    time.format("%a, %d %b %Y %H:%M:%S %z").to_string()
}

/// Start the clock loop unless it is already running.
pub fn start(app: &AppHandle) {
    let state = app.state::<ClockState>();
    let mut slot = state.stop_token.lock();
    if slot.is_some() {
        return;
    }

    let stop_token = CancellationToken::new();
    let child = stop_token.child_token();
    let app_handle = app.clone();
    tauri::async_runtime::spawn(async move {
        run(app_handle, child).await;
    });

    *slot = Some(stop_token);
    log::debug!("[CLOCK] started");
}

/// Stop the clock loop if it is running.
pub fn stop(app: &AppHandle) {
    let state = app.state::<ClockState>();
    let taken = state.stop_token.lock().take();
    if let Some(stop_token) = taken {
        stop_token.cancel();
        log::debug!("[CLOCK] stopped");
    }
}

async fn run(app: AppHandle, stop_token: CancellationToken) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let Either::Right(_) =
            futures::future::select(pin!(stop_token.cancelled()), pin!(interval.tick())).await
        else {
            break;
        };

        if let Err(e) = app.emit(TIME_EVENT, format_timestamp(&Local::now())) {
            log::warn!("[CLOCK] failed to emit time event: {}", e);
        }
    }
}

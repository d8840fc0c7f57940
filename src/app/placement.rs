//! Geometry and timing for the tray-attached window.
//!
//! Everything here is pure so it can be tested without a display.

use std::time::{Duration, Instant};

/// Gap between the tray icon and the window edge, in physical pixels.
pub const TRAY_WINDOW_OFFSET: i32 = 10;

/// Tray clicks closer together than this are ignored.
pub const TRAY_CLICK_DEBOUNCE: Duration = Duration::from_millis(200);

/// A rectangle in physical screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    fn center_x(&self) -> i32 {
        self.x.saturating_add((self.width / 2) as i32)
    }

    fn center_y(&self) -> i32 {
        self.y.saturating_add((self.height / 2) as i32)
    }
}

/// Top-left position for a `window` of the given size anchored to `tray`.
///
/// The window is centered horizontally on the icon. It opens below the icon
/// when the icon sits in the upper half of `work_area` (macOS menu bar, top
/// panels) and above it otherwise (taskbars). The result is clamped so the
/// window stays inside `work_area` whenever it fits.
pub fn place_near_tray(
    tray: Bounds,
    window: (u32, u32),
    work_area: Bounds,
    offset: i32,
) -> (i32, i32) {
    let (width, height) = (window.0 as i32, window.1 as i32);

    let x = tray.center_x() - width / 2;
    let y = if tray.center_y() < work_area.center_y() {
        tray.bottom() + offset
    } else {
        tray.y - height - offset
    };

    (
        clamp_axis(x, width, work_area.x, work_area.right()),
        clamp_axis(y, height, work_area.y, work_area.bottom()),
    )
}

/// Keep `[pos, pos + len)` inside `[min, max)`, preferring `min` when it can't fit.
fn clamp_axis(pos: i32, len: i32, min: i32, max: i32) -> i32 {
    pos.min(max - len).max(min)
}

/// Accepts at most one event per `window` of time.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Returns true and records `now` if enough time has passed since the
    /// last accepted event.
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last {
            Some(prev) if now.saturating_duration_since(prev) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            },
        }
    }
}

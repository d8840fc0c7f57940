//! Application lifecycle and platform integration.
//!
//! - `tray`: System tray setup and menu handling
//! - `events`: Window event handlers
//! - `clock`: Once-per-second `time` event
//! - `window`: Main window show/hide helpers
//! - `placement`: Tray-anchored window geometry and click debounce

pub mod clock;
pub mod events;
pub mod placement;
pub mod tray;
pub mod window;

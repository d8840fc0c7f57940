pub mod hotkey;
pub mod logging;
pub mod window;

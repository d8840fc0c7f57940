//! Central error types for Traydeck.
//!
//! All errors implement `Serialize` so commands can hand them straight back
//! to the web UI.

use serde::Serialize;
use thiserror::Error;

/// Main error type for Traydeck operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Window management error
    #[error("Window error: {0}")]
    WindowError(String),

    /// Hotkey settings name a modifier or key the platform layer doesn't know
    #[error("Invalid hotkey: {0}")]
    InvalidHotkey(String),

    /// Global shortcut registration failed
    #[error("Shortcut error: {0}")]
    ShortcutError(String),

    /// Settings store failed to load or save
    #[error("Store error: {0}")]
    StoreError(String),

    /// Filesystem operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error bubbled up from the Tauri runtime
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] tauri::Error),

    /// Lock poisoned (mutex/rwlock)
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Tauri requires command errors to be serializable; the UI only sees the message.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<tauri_plugin_store::Error> for AppError {
    fn from(err: tauri_plugin_store::Error) -> Self {
        AppError::StoreError(err.to_string())
    }
}

/// Poisoned `std::sync::Mutex` guards become `AppError::LockPoisoned`.
pub trait LockResultExt<T> {
    fn map_lock_err(self, what: &str) -> AppResult<T>;
}

impl<T> LockResultExt<T> for Result<T, std::sync::PoisonError<T>> {
    fn map_lock_err(self, what: &str) -> AppResult<T> {
        self.map_err(|_| AppError::LockPoisoned {
            context: what.to_owned(),
        })
    }
}

/// Prefix a foreign error with what was being attempted, e.g.
/// `"resolving log dir: <cause>"`.
pub trait ResultExt<T> {
    fn context(self, what: &str) -> AppResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, what: &str) -> AppResult<T> {
        self.map_err(|cause| AppError::Other(format!("{}: {}", what, cause)))
    }
}

/// Turn a missing value into an error carrying `what`.
pub trait OptionExt<T> {
    fn context(self, what: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, what: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::Other(what.to_owned()))
    }
}

/// Type alias for Results using AppError.
pub type AppResult<T> = Result<T, AppError>;

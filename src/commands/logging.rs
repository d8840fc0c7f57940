//! Unified logging for Traydeck.
//!
//! Records go through the `log` facade. `env_logger` decides what is enabled
//! (`RUST_LOG`, default `info`) and prints to the console; every enabled
//! record is also appended to a daily file in the app log directory, with
//! size-based rotation and cleanup.

use chrono::{DateTime, Local, TimeZone};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tauri::{command, AppHandle, Manager};
use tauri_plugin_opener::OpenerExt;

use crate::error::{AppResult, ResultExt};

/// Maximum log file size before rotation (5MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

/// Maximum number of log files to keep
const MAX_LOG_FILES: usize = 5;

const LOG_FILE_PREFIX: &str = "traydeck_";

/// Open log file and the path it was opened at.
struct LogSink {
    path: PathBuf,
    file: File,
}

impl LogSink {
    fn open(path: PathBuf) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }
}

lazy_static::lazy_static! {
    /// Global log file handle
    static ref LOG_FILE: Mutex<Option<LogSink>> = Mutex::new(None);
    /// Log directory path
    static ref LOG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Console logger plus file sink.
struct AppLogger {
    console: env_logger::Logger,
}

impl log::Log for AppLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.console.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.console.matches(record) {
            return;
        }
        self.console.log(record);
        write_line(record.level(), record.target(), &record.args().to_string());
    }

    fn flush(&self) {
        self.console.flush();
        if let Ok(mut log_file) = LOG_FILE.lock() {
            if let Some(ref mut sink) = *log_file {
                let _ = sink.file.flush();
            }
        }
    }
}

/// Install the global logger. Safe to call more than once.
///
/// Until `init_log_file` runs, records only reach the console.
pub fn init_logger() {
    let console =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let max_level = console.filter();

    if log::set_boxed_logger(Box::new(AppLogger { console })).is_ok() {
        log::set_max_level(max_level);
    }
}

/// Open today's log file in the app log directory.
pub fn init_log_file(app: &AppHandle) -> AppResult<()> {
    let log_dir = app
        .path()
        .app_log_dir()
        .context("Failed to get log directory")?;

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let sink = LogSink::open(current_log_path(&log_dir)).context("Failed to open log file")?;

    if let Ok(mut dir) = LOG_DIR.lock() {
        *dir = Some(log_dir.clone());
    }
    if let Ok(mut log_file) = LOG_FILE.lock() {
        *log_file = Some(sink);
    }

    log::info!("Logging to {:?}", log_dir);

    cleanup_old_logs(&log_dir);

    Ok(())
}

/// Name of the log file for a given day.
fn log_file_name(date: &str) -> String {
    format!("{}{}.log", LOG_FILE_PREFIX, date)
}

/// Path of the log file for the day `now` falls on.
fn log_path_for<Tz: TimeZone>(log_dir: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let date = now.format("%Y-%m-%d").to_string();
    log_dir.join(log_file_name(&date))
}

/// Get the path for the current log file (one per day)
fn current_log_path(log_dir: &Path) -> PathBuf {
    log_path_for(log_dir, &Local::now())
}

/// The file to switch to when the day has changed since `opened` was opened.
fn rollover_target<Tz: TimeZone>(opened: &Path, log_dir: &Path, now: &DateTime<Tz>) -> Option<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    let today = log_path_for(log_dir, now);
    (today != opened).then_some(today)
}

/// Clean up old log files, keeping only the most recent MAX_LOG_FILES
fn cleanup_old_logs(log_dir: &Path) {
    if let Ok(entries) = fs::read_dir(log_dir) {
        let mut log_files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "log")
                    .unwrap_or(false)
            })
            .collect();

        // Newest first
        log_files.sort_by(|a, b| {
            let a_time = a.metadata().and_then(|m| m.modified()).ok();
            let b_time = b.metadata().and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for file in log_files.into_iter().skip(MAX_LOG_FILES) {
            let _ = fs::remove_file(file.path());
        }
    }
}

/// Move the sink to a new file when the day changed or the current file
/// outgrew `MAX_LOG_SIZE`. Returns true when a new file was opened.
fn check_rotation(sink: &mut LogSink, log_dir: &Path) -> bool {
    if let Some(today) = rollover_target(&sink.path, log_dir, &Local::now()) {
        return reopen(sink, today);
    }

    let too_big = sink
        .file
        .metadata()
        .map(|m| m.len() > MAX_LOG_SIZE)
        .unwrap_or(false);
    if !too_big {
        return false;
    }

    let timestamp = Local::now().format("%Y-%m-%d_%H%M%S").to_string();
    let _ = fs::rename(&sink.path, log_dir.join(log_file_name(&timestamp)));
    let path = sink.path.clone();
    reopen(sink, path)
}

fn reopen(sink: &mut LogSink, path: PathBuf) -> bool {
    match LogSink::open(path) {
        Ok(next) => {
            *sink = next;
            true
        },
        Err(_) => false,
    }
}

fn format_line(level: log::Level, source: &str, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!("[{}] [{}] [{}] {}\n", timestamp, level, source, message)
}

fn write_line(level: log::Level, source: &str, message: &str) {
    let line = format_line(level, source, message);

    let Some(log_dir) = LOG_DIR.lock().ok().and_then(|dir| dir.clone()) else {
        return;
    };
    let Ok(mut log_file) = LOG_FILE.lock() else {
        return;
    };
    let Some(sink) = log_file.as_mut() else {
        return;
    };

    let rotated = check_rotation(sink, &log_dir);
    let _ = sink.file.write_all(line.as_bytes());
    drop(log_file);

    if rotated {
        cleanup_old_logs(&log_dir);
    }
}

/// File the sink is currently writing to, if file logging is on.
fn active_log_path() -> Option<PathBuf> {
    let log_file = LOG_FILE.lock().ok()?;
    log_file.as_ref().map(|sink| sink.path.clone())
}

/// Map a frontend level name; unknown names log at info.
fn parse_level(level: &str) -> log::Level {
    match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" | "warning" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    }
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Write a log message from the frontend
#[command]
pub fn write_log(level: String, source: String, message: String) {
    log::log!(target: "frontend", parse_level(&level), "[{}] {}", source, message);
}

/// Write multiple log messages from the frontend (batch)
#[command]
pub fn write_logs(logs: Vec<(String, String, String)>) {
    for (level, source, message) in logs {
        write_log(level, source, message);
    }
}

/// Get the log directory path
#[command]
pub fn get_log_dir(app: AppHandle) -> AppResult<String> {
    let log_dir = app
        .path()
        .app_log_dir()
        .context("Failed to get log directory")?;

    Ok(log_dir.to_string_lossy().to_string())
}

/// Open the log directory in the system file manager
#[command]
pub fn open_log_dir(app: AppHandle) -> AppResult<()> {
    let log_dir = get_log_dir(app.clone())?;
    app.opener()
        .open_path(log_dir, None::<&str>)
        .context("Failed to open log directory")
}

/// Get recent logs (last N lines, default 100)
#[command]
pub fn get_recent_logs(app: AppHandle, lines: Option<usize>) -> AppResult<String> {
    let log_dir = app
        .path()
        .app_log_dir()
        .context("Failed to get log directory")?;

    let log_path = active_log_path().unwrap_or_else(|| current_log_path(&log_dir));
    if !log_path.exists() {
        return Ok(String::new());
    }

    let content = fs::read_to_string(&log_path)?;
    Ok(tail_lines(&content, lines.unwrap_or(100)))
}

fn tail_lines(content: &str, max_lines: usize) -> String {
    let recent: Vec<&str> = content.lines().rev().take(max_lines).collect();
    recent.into_iter().rev().collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        assert_eq!(log_file_name("2024-05-01"), "traydeck_2024-05-01.log");
    }

    #[test]
    fn test_log_path_for_uses_calendar_day() {
        let dir = Path::new("/logs");
        let evening = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap();
        assert_eq!(
            log_path_for(dir, &evening),
            dir.join("traydeck_2024-05-01.log")
        );
    }

    #[test]
    fn test_rollover_target_after_midnight() {
        let dir = Path::new("/logs");
        let opened_at = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap();
        let opened = log_path_for(dir, &opened_at);

        let same_day = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap();
        assert_eq!(rollover_target(&opened, dir, &same_day), None);

        let next_day = chrono::Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 1).unwrap();
        assert_eq!(
            rollover_target(&opened, dir, &next_day),
            Some(dir.join("traydeck_2024-05-02.log"))
        );
    }

    #[test]
    fn test_check_rotation_moves_stale_sink_to_today() {
        let dir = std::env::temp_dir().join(format!("traydeck-rollover-test-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let mut sink = LogSink::open(dir.join(log_file_name("2000-01-01"))).unwrap();
        let rotated = check_rotation(&mut sink, &dir);
        let today = current_log_path(&dir);
        let today_exists = today.exists();

        let _ = fs::remove_dir_all(&dir);

        assert!(rotated);
        assert_eq!(sink.path, today);
        assert!(today_exists);
    }

    #[test]
    fn test_check_rotation_keeps_current_small_file() {
        let dir = std::env::temp_dir().join(format!("traydeck-rotation-test-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let mut sink = LogSink::open(current_log_path(&dir)).unwrap();
        let rotated = check_rotation(&mut sink, &dir);

        let _ = fs::remove_dir_all(&dir);

        assert!(!rotated);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), log::Level::Debug);
        assert_eq!(parse_level("warning"), log::Level::Warn);
        assert_eq!(parse_level("error"), log::Level::Error);
        assert_eq!(parse_level("verbose"), log::Level::Info);
    }

    #[test]
    fn test_format_line() {
        let line = format_line(log::Level::Warn, "ui", "hotkey rejected");
        assert!(line.ends_with("[WARN] [ui] hotkey rejected\n"));
        assert!(line.starts_with('['));
    }

    #[test]
    fn test_tail_lines() {
        let content = "one\ntwo\nthree\nfour";
        assert_eq!(tail_lines(content, 2), "three\nfour");
        assert_eq!(tail_lines(content, 10), content);
        assert_eq!(tail_lines("", 5), "");
    }

    #[test]
    fn test_cleanup_keeps_newest_logs() {
        let dir = std::env::temp_dir().join(format!("traydeck-log-test-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let base = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
        for i in 0..(MAX_LOG_FILES + 3) {
            let path = dir.join(log_file_name(&format!("2024-01-{:02}", i + 1)));
            let file = File::create(&path).unwrap();
            file.set_modified(base + std::time::Duration::from_secs(i as u64 * 60))
                .unwrap();
        }
        fs::write(dir.join("notes.txt"), "keep me").unwrap();

        cleanup_old_logs(&dir);

        let mut remaining: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        remaining.sort();

        let _ = fs::remove_dir_all(&dir);

        assert_eq!(remaining.len(), MAX_LOG_FILES + 1);
        assert!(remaining.contains(&"notes.txt".to_string()));
        assert!(!remaining.contains(&log_file_name("2024-01-01")));
        assert!(remaining.contains(&log_file_name("2024-01-08")));
    }
}

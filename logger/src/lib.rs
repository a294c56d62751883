use chrono::Utc;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl Color {
    fn to_ansi_code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Blue => "\x1b[34m",
            Color::Yellow => "\x1b[33m",
            Color::Cyan => "\x1b[36m",
            Color::Magenta => "\x1b[35m",
            Color::White => "\x1b[37m",
        }
    }
}

/// File logger for a playback session, installed as the `log` backend.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: PathBuf,
    console_level: LevelFilter,
    info_color: Color,
}

impl Logger {
    /// Creates a new `Logger` instance.
    ///
    /// # Parameters
    /// - `log_dir`: Directory where the log file is created. It is created if missing.
    /// - `session`: Name included in the log file name, `flight_arcs_<session>.log`.
    ///
    /// # Returns
    /// A new `Logger` instance that mirrors warnings and errors to the console.
    pub fn new(log_dir: &Path, session: &str) -> Result<Self, LoggerError> {
        if log_dir.exists() && !log_dir.is_dir() {
            return Err(LoggerError::InvalidPath(format!(
                "{} is not a directory",
                log_dir.display()
            )));
        }
        std::fs::create_dir_all(log_dir)?;

        let sanitized_session = session.replace([':', '/', ' '], "_");
        let log_file = log_dir.join(format!("flight_arcs_{}.log", sanitized_session));

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true) // Each session starts with an empty file
            .open(&log_file)?;

        Ok(Logger {
            log_file,
            console_level: LevelFilter::Warn,
            info_color: Color::Green,
        })
    }

    /// Sets the most verbose level that is also printed to the console.
    pub fn with_console_level(mut self, console_level: LevelFilter) -> Self {
        self.console_level = console_level;
        self
    }

    /// Console colour of informational lines.
    pub fn with_info_color(mut self, info_color: Color) -> Self {
        self.info_color = info_color;
        self
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Installs this logger as the global `log` backend with `max_level`.
    pub fn init(self, max_level: LevelFilter) -> Result<(), LoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    fn console_color(&self, level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[91m", // Bright Red
            Level::Warn => "\x1b[93m",  // Bright Yellow
            Level::Info => self.info_color.to_ansi_code(),
            Level::Debug => Color::Cyan.to_ansi_code(),
            Level::Trace => Color::White.to_ansi_code(),
        }
    }

    fn format_line(level: Level, target: &str, message: &str) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        format!("[{}] [{}] {}: {}\n", level, timestamp, target, message)
    }

    // Generic method for writing log lines
    fn write_line(&self, level: Level, target: &str, message: &str) -> Result<(), LoggerError> {
        let log_message = Self::format_line(level, target, message);

        // If logging to console, apply colors
        if level <= self.console_level {
            let colored_message = format!("{}{}\x1b[0m", self.console_color(level), log_message);
            let mut stdout = io::stdout().lock();
            stdout.write_all(colored_message.as_bytes())?;
            stdout.flush()?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.log_file)?;
        file.write_all(log_message.as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        if let Err(e) = self.write_line(record.level(), record.target(), &message) {
            eprintln!("Failed to write log line: {}", e);
        }
    }

    fn flush(&self) {}
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid Path: {0}")]
    InvalidPath(String),
    #[error("A global logger is already installed: {0}")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

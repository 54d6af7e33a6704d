use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::get_create_realia_dir;

/// Log levels representing increasing verbosity.
///
/// Setting a level enables that level and all less verbose levels below it:
/// Silent (0), Error (1), Warn (2), Info (3), Debug (4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Silent = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl Level {
    pub fn from_str(s: &str) -> Option<Level> {
        match s.trim().to_lowercase().as_str() {
            "silent" | "0" => Some(Level::Silent),
            "error" | "1" => Some(Level::Error),
            "warn" | "2" => Some(Level::Warn),
            "info" | "3" => Some(Level::Info),
            "debug" | "4" => Some(Level::Debug),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
    enable_print_log: bool,
    level: Mutex<Level>,
    started: Instant,
}

impl Logger {
    fn new() -> Logger {
        // REALIA_DISABLE_LOG=true turns off the log file, e.g. for tests.
        let disable_file = std::env::var("REALIA_DISABLE_LOG")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let log_file = if disable_file {
            None
        } else {
            get_create_realia_dir().ok().map(|p| p.join("realia.log"))
        };

        let enable_print_log = std::env::var("REALIA_PRINT_LOG")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let level = std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|v| Level::from_str(&v))
            .unwrap_or(Level::Info);

        Logger {
            log_file,
            enable_print_log,
            level: Mutex::new(level),
            started: Instant::now(),
        }
    }

    /// Install a tracing subscriber for console output. Respects RUST_LOG,
    /// defaults to info.
    pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        Ok(())
    }

    fn write_to_file(&self, message: &str) -> Result<(), Box<dyn std::error::Error>> {
        let path = match &self.log_file {
            Some(p) => p,
            None => return Ok(()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3fZ");
        let log_line = format!("[{}] {}\n", timestamp, message);

        file.write_all(log_line.as_bytes())?;

        Ok(())
    }

    fn enabled(&self, required: Level) -> bool {
        match self.level.lock() {
            Ok(level) => *level >= required,
            Err(_) => false,
        }
    }

    fn emit(&self, label: &str, msg: &str) {
        if self.enable_print_log {
            let colored_label = match label {
                "ERROR" => label.red().bold(),
                "WARN" => label.yellow(),
                "DEBUG" => label.dimmed(),
                "PROFILE" => label.cyan(),
                _ => label.green(),
            };
            println!("{}: {}", colored_label, msg);
        }

        if let Err(e) = self.write_to_file(&format!("{}: {}", label, msg)) {
            eprintln!("Failed to write to log file: {}", e);
        }
    }

    pub fn error(&self, msg: &str) {
        if !self.enabled(Level::Error) {
            return;
        }
        tracing::error!("{}", msg);
        self.emit("ERROR", msg);
    }

    pub fn warn(&self, msg: &str) {
        if !self.enabled(Level::Warn) {
            return;
        }
        tracing::warn!("{}", msg);
        self.emit("WARN", msg);
    }

    pub fn info(&self, msg: &str) {
        if !self.enabled(Level::Info) {
            return;
        }
        tracing::info!("{}", msg);
        self.emit("INFO", msg);
    }

    pub fn debug(&self, msg: &str) {
        if !self.enabled(Level::Debug) {
            return;
        }
        tracing::debug!("{}", msg);
        self.emit("DEBUG", msg);
    }

    /// Log a message with the elapsed time since logger creation, for
    /// coarse startup and indexing profiling.
    pub fn profile(&self, msg: &str) {
        if !self.enabled(Level::Debug) {
            return;
        }
        let elapsed = self.started.elapsed().as_micros();
        let line = format!("{} ({} µs)", msg, elapsed);
        tracing::debug!("{}", line);
        self.emit("PROFILE", &line);
    }

    pub fn get_level(&self) -> Level {
        match self.level.lock() {
            Ok(level) => *level,
            Err(_) => Level::Info,
        }
    }

    pub fn set_level(&self, level: Level) {
        if let Ok(mut l) = self.level.lock() {
            *l = level;
        }
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

fn with_logger<F: FnOnce(&Logger)>(f: F) {
    let logger = LOGGER.get_or_init(Logger::new);
    f(logger)
}

pub fn error(msg: &str) {
    with_logger(|logger| logger.error(msg));
}

pub fn warn(msg: &str) {
    with_logger(|logger| logger.warn(msg));
}

pub fn info(msg: &str) {
    with_logger(|logger| logger.info(msg));
}

pub fn debug(msg: &str) {
    with_logger(|logger| logger.debug(msg));
}

pub fn profile(msg: &str) {
    with_logger(|logger| logger.profile(msg));
}

pub fn get_log_level() -> Level {
    let logger = LOGGER.get_or_init(Logger::new);
    logger.get_level()
}

pub fn set_log_level(level: Level) {
    with_logger(|logger| logger.set_level(level));
}

pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    Logger::init_tracing()
}

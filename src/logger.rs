//! Default shimrun logger.
//!
//! Launch-path logging stays at debug level so that a default invocation
//! writes nothing to the stderr it shares with the shim.

use std::env;
use std::io::{stderr, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::{
    fs::{File, OpenOptions},
    io,
};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<ShimrunLogger> = OnceCell::new();
static LOG_FILE: OnceCell<Option<File>> = OnceCell::new();

/// If in debug mode, default level is debug to get maximum logging
#[cfg(debug_assertions)]
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// If not in debug mode, default level is warn to get important logs
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Initialize the logger, must be called before accessing the logger.
/// The level comes from `SHIMRUN_LOG_LEVEL` if set, else `--debug`,
/// else the build-dependent default.
pub fn init(debug: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level_filter = if let Ok(log_level_str) = env::var("SHIMRUN_LOG_LEVEL") {
        LevelFilter::from_str(&log_level_str).unwrap_or(DEFAULT_LOG_LEVEL)
    } else if debug {
        LevelFilter::Debug
    } else {
        DEFAULT_LOG_LEVEL
    };

    let log_file = match log_file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?,
        ),
        None => None,
    };
    LOG_FILE.get_or_init(|| log_file);

    let logger = LOGGER.get_or_init(|| ShimrunLogger::new(level_filter.to_level()));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level_filter);
    }

    Ok(())
}

struct ShimrunLogger {
    /// Indicates level up to which logs are to be printed
    level: Option<log::Level>,
}

impl ShimrunLogger {
    fn new(level: Option<log::Level>) -> Self {
        Self { level }
    }
}

impl Log for ShimrunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if let Some(level) = self.level {
            metadata.level() <= level
        } else {
            false
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_msg = match (record.file(), record.line()) {
                (Some(file), Some(line)) => format!(
                    "[{} {}:{}] {} {}",
                    record.level(),
                    file,
                    line,
                    chrono::Local::now().to_rfc3339(),
                    record.args()
                ),
                (_, _) => format!(
                    "[{}] {} {}",
                    record.level(),
                    chrono::Local::now().to_rfc3339(),
                    record.args()
                ),
            };

            // if a log file is set, write to it, else write to stderr
            if let Some(Some(mut log_file)) = LOG_FILE.get().map(|f| f.as_ref()) {
                let _ = writeln!(log_file, "{}", log_msg);
            } else {
                let _ = writeln!(stderr(), "{}", log_msg);
            }
        }
    }

    fn flush(&self) {
        if let Some(Some(mut log_file)) = LOG_FILE.get().map(|f| f.as_ref()) {
            let _ = log_file.flush();
        } else {
            let _ = io::Write::flush(&mut stderr());
        }
    }
}

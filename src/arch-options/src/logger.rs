// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The logger.
//!
//! A static [`LOGGER`] backing the `log` facade: writes to stdout until
//! [`Logger::update`] points it at a file, with optional level and origin
//! decoration and a module filter.

use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use std::thread;

use log::{Log, Metadata, Record};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::LocalTime;

/// Default level filter.
pub const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

/// The logger.
pub static LOGGER: Logger = Logger(Mutex::new(LoggerConfiguration {
    target: None,
    filter: LogFilter { module: None },
    format: LogFormat {
        show_level: false,
        show_log_origin: false,
    },
}));

/// Error type for [`Logger::init`].
pub type LoggerInitError = log::SetLoggerError;

/// Error type for [`Logger::update`].
#[derive(Debug, thiserror::Error)]
#[error("Failed to open target file: {0}")]
pub struct LoggerUpdateError(pub std::io::Error);

impl Logger {
    /// Registers the logger with the `log` facade.
    pub fn init(&'static self) -> Result<(), LoggerInitError> {
        log::set_logger(self)?;
        log::set_max_level(DEFAULT_LEVEL);
        Ok(())
    }

    /// Applies the given configuration to the logger.
    pub fn update(&self, config: LoggerConfig) -> Result<(), LoggerUpdateError> {
        let mut guard = self.0.lock().unwrap();
        log::set_max_level(
            config
                .level
                .map(log::LevelFilter::from)
                .unwrap_or(DEFAULT_LEVEL),
        );

        if let Some(log_path) = config.log_path {
            let file = std::fs::OpenOptions::new()
                .custom_flags(libc::O_NONBLOCK)
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(LoggerUpdateError)?;
            guard.target = Some(file);
        }

        if let Some(show_level) = config.show_level {
            guard.format.show_level = show_level;
        }

        if let Some(show_log_origin) = config.show_log_origin {
            guard.format.show_log_origin = show_log_origin;
        }

        if let Some(module) = config.module {
            guard.filter.module = Some(module);
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct LogFilter {
    pub module: Option<String>,
}
#[derive(Debug)]
pub struct LogFormat {
    pub show_level: bool,
    pub show_log_origin: bool,
}
#[derive(Debug)]
pub struct LoggerConfiguration {
    pub target: Option<std::fs::File>,
    pub filter: LogFilter,
    pub format: LogFormat,
}
#[derive(Debug)]
pub struct Logger(pub Mutex<LoggerConfiguration>);

impl Log for Logger {
    // Level filtering is already done by log::max_level.
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut guard = self.0.lock().unwrap();

        let enabled = match (&guard.filter.module, record.module_path()) {
            (Some(filter), Some(source)) => source.starts_with(filter),
            (Some(_), None) => false,
            (None, _) => true,
        };
        if !enabled {
            return;
        }

        let thread = thread::current().name().unwrap_or("-").to_string();
        let level = match guard.format.show_level {
            true => format!(":{}", record.level()),
            false => String::new(),
        };
        let origin = match guard.format.show_log_origin {
            true => {
                let file = record.file().unwrap_or("?");
                let line = match record.line() {
                    Some(x) => x.to_string(),
                    None => String::from("?"),
                };
                format!(":{file}:{line}")
            }
            false => String::new(),
        };

        let message = format!(
            "{} [{thread}{level}{origin}] {}\n",
            LocalTime::now(),
            record.args()
        );

        // A failed write has nowhere better to go; drop the line.
        let _ = match &mut guard.target {
            Some(file) => file.write_all(message.as_bytes()),
            None => std::io::stdout().write_all(message.as_bytes()),
        };
    }

    fn flush(&self) {}
}

/// Strongly typed structure used to describe the logger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// File used as output for logs.
    pub log_path: Option<PathBuf>,
    /// The level of the Logger.
    pub level: Option<LevelFilter>,
    /// Whether to show the log level in the log.
    pub show_level: Option<bool>,
    /// Whether to show the log origin in the log.
    pub show_log_origin: Option<bool>,
    /// The module to filter logs by.
    pub module: Option<String>,
}

/// Level filter with case-insensitive parsing; `warning` is accepted as an
/// alias of `warn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LevelFilter {
    /// [`log::LevelFilter::Off`]
    Off,
    /// [`log::LevelFilter::Trace`]
    Trace,
    /// [`log::LevelFilter::Debug`]
    Debug,
    /// [`log::LevelFilter::Info`]
    Info,
    /// [`log::LevelFilter::Warn`]
    Warn,
    /// [`log::LevelFilter::Error`]
    Error,
}

impl From<LevelFilter> for log::LevelFilter {
    fn from(filter: LevelFilter) -> log::LevelFilter {
        match filter {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Trace => log::LevelFilter::Trace,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Error => log::LevelFilter::Error,
        }
    }
}

impl<'de> Deserialize<'de> for LevelFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        let key = String::deserialize(deserializer)?;
        LevelFilter::from_str(&key).map_err(|_| D::Error::custom("Invalid LevelFilter"))
    }
}

/// Error type for [`<LevelFilter as FromStr>::from_str`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Failed to parse string to level filter: {0}")]
pub struct LevelFilterFromStrError(String);

impl FromStr for LevelFilter {
    type Err = LevelFilterFromStrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LevelFilterFromStrError(String::from(s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    #[test]
    fn levelfilter_from_levelfilter() {
        let pairs = [
            (LevelFilter::Off, log::LevelFilter::Off),
            (LevelFilter::Trace, log::LevelFilter::Trace),
            (LevelFilter::Debug, log::LevelFilter::Debug),
            (LevelFilter::Info, log::LevelFilter::Info),
            (LevelFilter::Warn, log::LevelFilter::Warn),
            (LevelFilter::Error, log::LevelFilter::Error),
        ];
        for (ours, theirs) in pairs {
            assert_eq!(log::LevelFilter::from(ours), theirs);
        }
    }

    #[test]
    fn levelfilter_from_str_any_case() {
        use itertools::Itertools;

        for (name, expected) in [
            ("off", LevelFilter::Off),
            ("trace", LevelFilter::Trace),
            ("debug", LevelFilter::Debug),
            ("info", LevelFilter::Info),
            ("warn", LevelFilter::Warn),
            ("warning", LevelFilter::Warn),
            ("error", LevelFilter::Error),
        ] {
            // Every upper/lower-case spelling of the name must parse, both
            // via FromStr and via serde.
            for casing in name.chars().map(|_| 0..=1).multi_cartesian_product() {
                let variant: String = name
                    .chars()
                    .zip_eq(casing)
                    .map(|(c, up)| match up {
                        0 => c.to_ascii_lowercase(),
                        _ => c.to_ascii_uppercase(),
                    })
                    .collect();
                assert_eq!(LevelFilter::from_str(&variant), Ok(expected), "{variant}");
                let json = format!("\"{variant}\"");
                assert_eq!(
                    serde_json::from_str::<LevelFilter>(&json).unwrap(),
                    expected
                );
            }
        }
        assert_eq!(
            LevelFilter::from_str("loud"),
            Err(LevelFilterFromStrError(String::from("loud")))
        );
        assert!(serde_json::from_str::<LevelFilter>("\"loud\"").is_err());
    }

    #[test]
    fn logger_writes_to_target() {
        let file = vmm_sys_util::tempfile::TempFile::new().unwrap();
        let target = file.as_file().try_clone().unwrap();

        let logger = Logger(Mutex::new(LoggerConfiguration {
            target: Some(target),
            filter: LogFilter { module: None },
            format: LogFormat {
                show_level: true,
                show_log_origin: true,
            },
        }));

        let metadata = Metadata::builder().level(Level::Error).build();
        let record = Record::builder()
            .args(format_args!("boom"))
            .metadata(metadata)
            .file(Some("dir/app.rs"))
            .line(Some(200))
            .module_path(Some("module::server"))
            .build();
        logger.log(&record);
        logger.flush();

        let contents = std::fs::read_to_string(file.as_path()).unwrap();
        let (_time, rest) = contents.split_once(' ').unwrap();
        let thread = thread::current().name().unwrap_or("-").to_string();
        assert_eq!(rest, format!("[{thread}:ERROR:dir/app.rs:200] boom\n"));
    }

    #[test]
    fn module_filter_drops_foreign_records() {
        let file = vmm_sys_util::tempfile::TempFile::new().unwrap();
        let target = file.as_file().try_clone().unwrap();

        let logger = Logger(Mutex::new(LoggerConfiguration {
            target: Some(target),
            filter: LogFilter {
                module: Some(String::from("arch_options")),
            },
            format: LogFormat {
                show_level: false,
                show_log_origin: false,
            },
        }));

        let metadata = Metadata::builder().level(Level::Warn).build();
        let record = Record::builder()
            .args(format_args!("elsewhere"))
            .metadata(metadata)
            .module_path(Some("other::module"))
            .build();
        logger.log(&record);

        assert_eq!(std::fs::read_to_string(file.as_path()).unwrap(), "");
    }
}

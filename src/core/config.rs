//! Logger configuration
//!
//! `LoggerConfig` mirrors the `App` logging settings of the blog service. It
//! only derives `Deserialize`; reading the settings file is left to the
//! service's own configuration layer.

use super::error::{LoggerError, Result};
use super::fields::Fields;
use super::log_level::LogLevel;
use super::logger::Logger;
use crate::writers::{FileWriter, LineFlags};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Directory holding the log file
    pub log_save_path: PathBuf,
    /// File name without extension
    pub log_file_name: String,
    /// Extension including the dot, e.g. `.log`
    pub log_file_ext: String,
    /// Line prefix written by the file writer
    pub prefix: String,
    pub flags: LineFlags,
    /// Level stamped on records written through `output` directly
    pub level: LogLevel,
    /// When set, the built logger records this caller frame
    ///
    /// Counted from the code calling [`LoggerConfig::build_logger`]: `0` is
    /// that function, `1` its caller. A `WithCaller(n)` depth taken from the
    /// Go service's settings counts `WithCaller` itself as `0`, so it maps to
    /// `n - 1` here (`WithCaller(2)` is `Some(1)`).
    pub caller_skip: Option<usize>,
    /// Fields attached to every record
    pub fields: Fields,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_save_path: PathBuf::from("storage/logs"),
            log_file_name: "app".to_string(),
            log_file_ext: ".log".to_string(),
            prefix: String::new(),
            flags: LineFlags::none(),
            level: LogLevel::default(),
            caller_skip: None,
            fields: Fields::new(),
        }
    }
}

impl LoggerConfig {
    /// Full path of the log file
    pub fn log_file_path(&self) -> PathBuf {
        self.log_save_path
            .join(format!("{}{}", self.log_file_name, self.log_file_ext))
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_file_name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "log_file_name is empty"));
        }
        if self.log_file_name.contains(['/', '\\']) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("log_file_name '{}' contains a path separator", self.log_file_name),
            ));
        }
        if !self.log_file_ext.is_empty() && !self.log_file_ext.starts_with('.') {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("log_file_ext '{}' must start with '.'", self.log_file_ext),
            ));
        }
        Ok(())
    }

    /// Open the configured log file and build a root logger over it
    ///
    /// The save directory is created when missing. `caller_skip` counts from
    /// the code calling this method.
    #[inline(never)]
    pub fn build_logger(&self) -> Result<Logger> {
        self.validate()?;

        fs::create_dir_all(&self.log_save_path).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                format!("cannot create '{}'", self.log_save_path.display()),
                e,
            )
        })?;
        let writer = FileWriter::open(self.log_file_path(), self.prefix.clone(), self.flags)?;

        let mut builder = Logger::builder()
            .writer(writer)
            .level(self.level)
            .fields(self.fields.clone());
        if let Some(skip) = self.caller_skip {
            builder = builder.caller_skip(skip);
        }
        Ok(builder.build())
    }
}

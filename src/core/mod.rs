//! Core logger types and traits

pub mod caller;
pub mod config;
pub mod error;
pub mod fields;
pub mod log_level;
pub mod logger;
pub mod record;
pub mod writer;

#[cfg(feature = "backtrace")]
pub use caller::BacktraceResolver;
pub use caller::{CallerFrame, FixedResolver, NoopResolver, StackResolver, MAX_CALLER_DEPTH};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use record::{Record, RESERVED_KEYS};
pub use writer::LogWriter;

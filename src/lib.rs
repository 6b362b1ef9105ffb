//! # Blog Logger
//!
//! Structured JSON logger for the blog service.
//!
//! A [`Logger`] is an immutable snapshot. Chain `with_*` calls to derive
//! loggers carrying a level, fields, call-site information or a context
//! handle, then call a level method to emit one JSON record to the shared
//! writer:
//!
//! ```
//! use blog_logger::prelude::*;
//! use blog_logger::infof;
//!
//! let sink = MemoryWriter::new();
//! let base = Logger::new(sink.clone());
//!
//! let request = base.with_fields(Fields::new().with_field("req", "a"));
//! infof!(request, "user {} logged in", 42);
//!
//! let line = sink.last().unwrap();
//! assert!(line.contains(r#""message":"user 42 logged in""#));
//! assert!(line.contains(r#""req":"a""#));
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod writers;

pub mod prelude {
    pub use crate::core::{
        CallerFrame, FieldValue, Fields, FixedResolver, LogLevel, LogWriter, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, NoopResolver, Result, StackResolver,
        MAX_CALLER_DEPTH,
    };
    #[cfg(feature = "backtrace")]
    pub use crate::core::BacktraceResolver;
    pub use crate::writers::{FileWriter, LineFlags, LineWriter, MemoryWriter};
}

#[cfg(feature = "backtrace")]
pub use crate::core::BacktraceResolver;
pub use crate::core::{
    CallerFrame, FieldValue, Fields, FixedResolver, LogLevel, LogWriter, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, NoopResolver, Record, Result, StackResolver, MAX_CALLER_DEPTH,
    RESERVED_KEYS,
};
pub use crate::writers::{FileWriter, LineFlags, LineWriter, MemoryWriter};

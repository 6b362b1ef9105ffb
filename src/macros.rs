//! Logging macros.
//!
//! Two families per level: the plain form (`info!`) concatenates the
//! `Display` of each argument, the `f` form (`infof!`) formats like
//! `format!`.
//!
//! Concatenation never inserts separators, even between two numbers:
//! `info!(logger, 1, 2)` logs `"12"`. Put the spaces in the arguments or use
//! the `f` form when operands need separating.
//!
//! # Examples
//!
//! ```
//! use blog_logger::prelude::*;
//! use blog_logger::{info, infof};
//!
//! let sink = MemoryWriter::new();
//! let logger = Logger::new(sink.clone());
//!
//! info!(logger, "article ", 42, " saved");
//! infof!(logger, "user {} logged in", "alice");
//!
//! assert_eq!(sink.len(), 2);
//! ```

/// Concatenate the `Display` output of every argument, without separators
#[doc(hidden)]
#[macro_export]
macro_rules! __concat_display {
    ($($arg:expr),+ $(,)?) => {{
        use ::std::fmt::Write as _;
        let mut message = ::std::string::String::new();
        $( let _ = ::std::write!(message, "{}", $arg); )+
        message
    }};
}

/// Log a formatted message at a runtime-chosen level.
///
/// # Examples
///
/// ```
/// # use blog_logger::prelude::*;
/// # let logger = Logger::new(MemoryWriter::new());
/// use blog_logger::log;
/// log!(logger, LogLevel::Warn, "slow query: {}ms", 1200);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message built by concatenation.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.debug($crate::__concat_display!($($arg),+))
    };
}

/// Log a formatted debug-level message.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message built by concatenation.
///
/// # Examples
///
/// ```
/// # use blog_logger::prelude::*;
/// # let logger = Logger::new(MemoryWriter::new());
/// use blog_logger::info;
/// info!(logger, "Server started");
/// info!(logger, "listening on :", 8080);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.info($crate::__concat_display!($($arg),+))
    };
}

/// Log a formatted info-level message.
///
/// # Examples
///
/// ```
/// # use blog_logger::prelude::*;
/// # let logger = Logger::new(MemoryWriter::new());
/// use blog_logger::infof;
/// infof!(logger, "user {} logged in", 42);
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Log a warn-level message built by concatenation.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.warn($crate::__concat_display!($($arg),+))
    };
}

/// Log a formatted warn-level message.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message built by concatenation.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.error($crate::__concat_display!($($arg),+))
    };
}

/// Log a formatted error-level message.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Log a fatal-level message built by concatenation.
///
/// Only labels the record; the process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.fatal($crate::__concat_display!($($arg),+))
    };
}

/// Log a formatted fatal-level message.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

/// Log a panic-level message built by concatenation.
///
/// Named so it does not shadow `std::panic!`; it never unwinds.
#[macro_export]
macro_rules! panic_log {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $logger.panic($crate::__concat_display!($($arg),+))
    };
}

/// Log a formatted panic-level message.
#[macro_export]
macro_rules! panicf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(::std::format_args!($($arg)+))
    };
}

/// Build a [`Fields`](crate::Fields) set.
///
/// # Examples
///
/// ```
/// use blog_logger::fields;
///
/// let fields = fields! { "article_id" => 7, "title" => "hello" };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $( fields.insert($key, $value); )+
        fields
    }};
}

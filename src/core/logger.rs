//! Main logger implementation
//!
//! A [`Logger`] is an immutable snapshot: writer, level, fields, callers and an
//! optional context handle. Every `with_*` call returns a new snapshot and
//! leaves the receiver untouched, so a base logger can be shared freely and
//! specialised per request.

use super::{
    caller::{default_resolver, StackResolver, MAX_CALLER_DEPTH},
    error::Result,
    fields::Fields,
    log_level::LogLevel,
    record::{self, Record},
    writer::LogWriter,
};
use chrono::Local;
use std::any::Any;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    writer: Arc<dyn LogWriter>,
    resolver: Arc<dyn StackResolver>,
    context: Option<Arc<dyn Any + Send + Sync>>,
    level: LogLevel,
    /// Shared between snapshots until one of them adds fields
    fields: Option<Arc<Fields>>,
    callers: Arc<[String]>,
}

impl Logger {
    /// Create a root logger writing to `writer`
    #[must_use]
    pub fn new<W: LogWriter + 'static>(writer: W) -> Self {
        Self::from_shared(Arc::new(writer))
    }

    /// Create a root logger over a writer the caller keeps a handle to
    #[must_use]
    pub fn from_shared(writer: Arc<dyn LogWriter>) -> Self {
        Self {
            writer,
            resolver: default_resolver(),
            context: None,
            level: LogLevel::default(),
            fields: None,
            callers: Arc::from(Vec::<String>::new()),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Fields carried by this snapshot, if any were ever added
    pub fn fields(&self) -> Option<&Fields> {
        self.fields.as_deref()
    }

    pub fn callers(&self) -> &[String] {
        &self.callers
    }

    /// The attached context, if it is a `C`
    pub fn context<C: Any>(&self) -> Option<&C> {
        self.context.as_deref().and_then(|ctx| ctx.downcast_ref::<C>())
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    pub fn writer(&self) -> &Arc<dyn LogWriter> {
        &self.writer
    }

    #[must_use]
    pub fn with_level(&self, level: LogLevel) -> Self {
        let mut next = self.clone();
        next.level = level;
        next
    }

    /// Union `extra` into a copy of this snapshot's fields
    ///
    /// On key collision the value from `extra` wins.
    #[must_use]
    pub fn with_fields(&self, extra: Fields) -> Self {
        let mut next = self.clone();
        let fields = next.fields.get_or_insert_with(|| Arc::new(Fields::new()));
        Arc::make_mut(fields).merge(&extra);
        next
    }

    /// Attach an opaque context value
    ///
    /// The logger stores it for downstream consumers and never reads it.
    #[must_use]
    pub fn with_context<C: Any + Send + Sync>(&self, ctx: C) -> Self {
        let mut next = self.clone();
        next.context = Some(Arc::new(ctx));
        next
    }

    /// Record the single frame `skip` levels above the caller
    ///
    /// `skip == 0` names the function calling `with_caller`. When no frame
    /// can be resolved the previous callers are kept. Go's `WithCaller(n)`
    /// counts itself as depth 0, so its `n` is `skip + 1`.
    #[must_use]
    #[inline(never)]
    pub fn with_caller(&self, skip: usize) -> Self {
        let mut next = self.clone();
        if let Some(frame) = self.resolver.resolve_one(skip) {
            next.callers = vec![frame.to_string()].into();
        }
        next
    }

    /// Record the calling stack, innermost frame first, at most 25 frames
    #[must_use]
    #[inline(never)]
    pub fn with_callers_frames(&self) -> Self {
        let mut next = self.clone();
        next.callers = self
            .resolver
            .resolve_many(MAX_CALLER_DEPTH)
            .into_iter()
            .take(MAX_CALLER_DEPTH)
            .map(|frame| frame.to_string())
            .collect::<Vec<_>>()
            .into();
        next
    }

    /// Build the record this snapshot would emit for `message`
    pub fn json_format(&self, message: &str) -> Record {
        record::format_record(
            self.level,
            message,
            &self.callers,
            self.fields.as_deref(),
            Local::now(),
        )
    }

    /// Encode `message` at the current level and write it to the sink
    ///
    /// Never fails: an encoding or write error drops the record. The writer
    /// receives the location of the logging call.
    #[track_caller]
    pub fn output(&self, message: &str) {
        let line = record::encode(&self.json_format(message));
        let _ = self.writer.write_line_at(&line, Location::caller());
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        self.with_level(level).output(&message.to_string());
    }

    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.with_level(level).output(&fmt::format(args));
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    /// Emit at `fatal`; the process keeps running
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, message);
    }

    #[inline]
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Fatal, args);
    }

    /// Emit at `panic`; does not unwind
    #[inline]
    #[track_caller]
    pub fn panic(&self, message: impl fmt::Display) {
        self.log(LogLevel::Panic, message);
    }

    #[inline]
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Panic, args);
    }

    /// Flush the shared writer
    pub fn flush(&self) -> Result<()> {
        self.writer.flush()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("writer", &self.writer.name())
            .field("level", &self.level)
            .field("fields", &self.fields)
            .field("callers", &self.callers)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Builder for constructing a root Logger with a fluent API
///
/// # Example
/// ```
/// use blog_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .writer(MemoryWriter::new())
///     .level(LogLevel::Info)
///     .fields(Fields::new().with_field("service", "blog"))
///     .build();
/// assert_eq!(logger.level(), LogLevel::Info);
/// ```
pub struct LoggerBuilder {
    writer: Option<Arc<dyn LogWriter>>,
    resolver: Option<Arc<dyn StackResolver>>,
    level: LogLevel,
    fields: Fields,
    caller_skip: Option<usize>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            writer: None,
            resolver: None,
            level: LogLevel::default(),
            fields: Fields::new(),
            caller_skip: None,
        }
    }

    /// Set the writer; defaults to stdout without a header
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: LogWriter + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(Arc::new(writer));
        self
    }

    /// Set a writer shared with other owners
    #[must_use = "builder methods return a new value"]
    pub fn shared_writer(mut self, writer: Arc<dyn LogWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Replace the stack resolver
    #[must_use = "builder methods return a new value"]
    pub fn resolver<R: StackResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Fields every record of the built logger carries
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields.merge(&fields);
        self
    }

    /// Capture the frame `skip` levels above the code calling `build`
    ///
    /// Same counting as [`Logger::with_caller`].
    #[must_use = "builder methods return a new value"]
    pub fn caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip = Some(skip);
        self
    }

    /// Build the Logger
    #[inline(never)]
    pub fn build(self) -> Logger {
        let writer = self
            .writer
            .unwrap_or_else(|| Arc::new(crate::writers::LineWriter::stdout()));

        let mut logger = Logger::from_shared(writer).with_level(self.level);
        if let Some(resolver) = self.resolver {
            logger.resolver = resolver;
        }
        if !self.fields.is_empty() {
            logger = logger.with_fields(self.fields);
        }
        if let Some(skip) = self.caller_skip {
            logger = logger.with_caller(skip);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

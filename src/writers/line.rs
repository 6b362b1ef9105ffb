//! Line-framing writer over any `io::Write`
//!
//! Every record becomes one line: an optional prefix, an optional date/time
//! header, an optional `file:line: ` of the logging call, the payload, and a
//! newline.

use crate::core::{LogWriter, Result};
use chrono::{DateTime, FixedOffset, Local, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::panic::Location;

/// Header options for [`LineWriter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineFlags {
    /// `2024/01/23 `
    pub date: bool,
    /// `01:23:23 `
    pub time: bool,
    /// `01:23:23.123123 `, implies `time`
    pub microseconds: bool,
    /// Use UTC rather than the local time zone
    pub utc: bool,
    /// Put the prefix right before the payload instead of at line start
    pub msg_prefix: bool,
    /// `logger.rs:23: `, file name of the logging call; wins over `long_file`
    pub short_file: bool,
    /// `src/handlers/logger.rs:23: `, full path of the logging call
    pub long_file: bool,
}

impl LineFlags {
    /// No header at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Date and time header
    pub fn standard() -> Self {
        Self {
            date: true,
            time: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_microseconds(mut self) -> Self {
        self.microseconds = true;
        self
    }

    #[must_use]
    pub fn with_utc(mut self) -> Self {
        self.utc = true;
        self
    }

    #[must_use]
    pub fn with_msg_prefix(mut self) -> Self {
        self.msg_prefix = true;
        self
    }

    #[must_use]
    pub fn with_short_file(mut self) -> Self {
        self.short_file = true;
        self
    }

    #[must_use]
    pub fn with_long_file(mut self) -> Self {
        self.long_file = true;
        self
    }
}

/// Frame `payload` into a complete output line
///
/// A file flag without a known location writes `???:0: `.
pub(crate) fn frame_line(
    prefix: &str,
    flags: LineFlags,
    payload: &str,
    now: DateTime<FixedOffset>,
    location: Option<&Location<'_>>,
) -> String {
    let mut out = String::with_capacity(prefix.len() + payload.len() + 28);

    if !flags.msg_prefix {
        out.push_str(prefix);
    }
    if flags.date {
        let _ = write!(out, "{} ", now.format("%Y/%m/%d"));
    }
    if flags.microseconds {
        let _ = write!(out, "{} ", now.format("%H:%M:%S%.6f"));
    } else if flags.time {
        let _ = write!(out, "{} ", now.format("%H:%M:%S"));
    }
    if flags.short_file || flags.long_file {
        let (mut file, line) = location.map_or(("???", 0), |loc| (loc.file(), loc.line()));
        if flags.short_file {
            file = file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file);
        }
        let _ = write!(out, "{}:{}: ", file, line);
    }
    if flags.msg_prefix {
        out.push_str(prefix);
    }

    out.push_str(payload);
    if !payload.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Writer that frames each record as a line and writes it to `W`
pub struct LineWriter<W: Write + Send> {
    inner: Mutex<W>,
    prefix: String,
    flags: LineFlags,
}

impl<W: Write + Send> LineWriter<W> {
    pub fn new(inner: W, prefix: impl Into<String>, flags: LineFlags) -> Self {
        Self {
            inner: Mutex::new(inner),
            prefix: prefix.into(),
            flags,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> LineFlags {
        self.flags
    }

    fn now(&self) -> DateTime<FixedOffset> {
        if self.flags.utc {
            Utc::now().into()
        } else {
            Local::now().into()
        }
    }

    /// Consume the writer and return the wrapped output
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl LineWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), "", LineFlags::none())
    }
}

impl LineWriter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr(), "", LineFlags::none())
    }
}

impl<W: Write + Send> LineWriter<W> {
    fn write_framed(&self, line: &str, location: Option<&Location<'_>>) -> Result<()> {
        let framed = frame_line(&self.prefix, self.flags, line, self.now(), location);
        self.inner.lock().write_all(framed.as_bytes())?;
        Ok(())
    }
}

impl<W: Write + Send> LogWriter for LineWriter<W> {
    fn write_line(&self, line: &str) -> Result<()> {
        self.write_framed(line, None)
    }

    fn write_line_at(&self, line: &str, location: &'static Location<'static>) -> Result<()> {
        self.write_framed(line, Some(location))
    }

    fn flush(&self) -> Result<()> {
        self.inner.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "line"
    }
}

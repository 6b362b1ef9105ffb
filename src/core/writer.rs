//! Sink trait for encoded log records

use super::error::Result;
use std::panic::Location;

/// Destination for encoded records
///
/// A writer is shared by every logger snapshot derived from the same root and
/// may be called from several threads at once; implementations serialize
/// their own writes. Each call carries one complete record without a line
/// terminator, the writer adds its own framing.
pub trait LogWriter: Send + Sync {
    fn write_line(&self, line: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;

    /// Write a record along with the source location of the logging call
    ///
    /// Writers that do not report locations ignore it.
    fn write_line_at(&self, line: &str, location: &'static Location<'static>) -> Result<()> {
        let _ = location;
        self.write_line(line)
    }
}

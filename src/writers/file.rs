//! File writer implementation

use super::line::{LineFlags, LineWriter};
use crate::core::{LogWriter, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Appends framed records to a file
pub struct FileWriter {
    path: PathBuf,
    inner: LineWriter<BufWriter<File>>,
}

impl FileWriter {
    /// Open `path` for appending, creating it when missing
    pub fn open(path: impl Into<PathBuf>, prefix: impl Into<String>, flags: LineFlags) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            inner: LineWriter::new(BufWriter::new(file), prefix, flags),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogWriter for FileWriter {
    fn write_line(&self, line: &str) -> Result<()> {
        self.inner.write_line(line)
    }

    fn write_line_at(&self, line: &str, location: &'static Location<'static>) -> Result<()> {
        self.inner.write_line_at(line, location)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileWriter {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.inner.flush();
    }
}

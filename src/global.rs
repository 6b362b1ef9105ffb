//! Process-wide default logger
//!
//! Components should receive a [`Logger`] when they are constructed. For code
//! that cannot, a single default can be installed once during startup and
//! read afterwards; there is no teardown.

use crate::core::{Logger, LoggerError, Result};
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger
///
/// Fails with [`LoggerError::AlreadyInitialized`] on every call after the
/// first.
pub fn init(logger: Logger) -> Result<()> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The installed logger, if `init` has run
pub fn logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

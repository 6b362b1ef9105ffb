//! Writer implementations

pub mod file;
pub mod line;
pub mod memory;

pub use file::FileWriter;
pub use line::{LineFlags, LineWriter};
pub use memory::MemoryWriter;

pub use crate::core::LogWriter;

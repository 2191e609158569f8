//! In-memory adapters for tests and embedding.

mod logger;

pub use logger::{LogEntry, LogLevel, RecordingLogger};

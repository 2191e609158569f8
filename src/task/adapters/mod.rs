//! Adapter implementations of the task ports.

pub mod memory;
pub mod tracing_logger;

pub use tracing_logger::TracingLogger;

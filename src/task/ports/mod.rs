//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces the task domain calls into.

pub mod logger;

pub use logger::DiagnosticLogger;

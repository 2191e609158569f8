//! Tasktree: hierarchical work items with audited lifecycles.
//!
//! This crate models tasks with a status state machine, optional assignment,
//! free-form tags, parent/subtask composition and an append-only history
//! written by every mutation.
//!
//! # Architecture
//!
//! Tasktree follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for collaborators such as logging
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task entity, hierarchy, history and board service
//! - [`calendar`]: Calendar-date formatting and validation
//! - [`config`]: Board configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod calendar;
pub mod config;
pub mod task;
pub mod telemetry;

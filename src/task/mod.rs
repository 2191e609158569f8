//! Hierarchical task management.
//!
//! Tasks carry a status state machine, an optional assignee, free-form tags
//! and an append-only audit history. A task may only be finished once all of
//! its direct subtasks are finished. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Unit tests for the task module.
//!
//! Tests are organised by domain concept, covering happy paths, error cases,
//! and edge cases for all public APIs.

mod state_transition_tests;
mod support;

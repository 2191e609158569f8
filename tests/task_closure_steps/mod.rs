//! Step definitions for task closure BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;

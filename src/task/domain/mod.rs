//! Domain model for hierarchical tasks.
//!
//! The task domain models identity generation, the status state machine with
//! its subtask closure invariant, assignment, tags and the append-only audit
//! history, while keeping clocks and log sinks outside the domain boundary.

mod error;
mod hierarchy;
mod history;
mod ids;
mod status;
mod tags;
mod task;
mod user;

pub use error::{HierarchyError, ParseTaskStatusError, StateTransitionError, TaskDomainError};
pub use hierarchy::TaskHierarchy;
pub use history::{HistoryLog, HistoryRecord, TaskAction};
pub use ids::{IdentityGenerator, TaskId};
pub use status::TaskStatus;
pub use tags::TagSet;
pub use task::{NewTask, Task};
pub use user::{EmailAddress, User, is_valid_email};

//! Error types for task domain validation, hierarchy linkage and status
//! transitions.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by task domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A status transition was rejected by the closure invariant.
    #[error(transparent)]
    StateTransition(#[from] StateTransitionError),

    /// A parent/subtask link is inconsistent.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// The user display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The e-mail address does not match `local@domain`.
    #[error("invalid e-mail address '{0}'")]
    InvalidEmail(String),

    /// A tag label is empty after trimming.
    #[error("tag labels must not be empty")]
    EmptyTag,

    /// The identifier space has been used up.
    #[error("task identifier space exhausted")]
    IdentityExhausted,
}

/// Attempt to finish a task while some of its subtasks are still open.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "cannot finish task {task_id} while subtasks remain open ({open_subtasks} unfinished, current status {from})"
)]
pub struct StateTransitionError {
    /// Task whose transition was rejected.
    pub task_id: TaskId,
    /// Status the task kept.
    pub from: TaskStatus,
    /// Number of direct subtasks that are not finished.
    pub open_subtasks: usize,
}

/// Inconsistent parent/subtask linkage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HierarchyError {
    /// The referenced task does not belong to the hierarchy.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The child was created for a different parent.
    #[error("task {child} cannot be attached to {expected}: its parent is {}", display_parent(.actual.as_ref()))]
    ParentMismatch {
        /// Child being attached.
        child: TaskId,
        /// Task the caller tried to attach the child to.
        expected: TaskId,
        /// Parent recorded on the child.
        actual: Option<TaskId>,
    },

    /// The child is already listed among the parent's subtasks.
    #[error("task {child} is already a subtask of {parent}")]
    AlreadyAttached {
        /// Owning task.
        parent: TaskId,
        /// Listed child.
        child: TaskId,
    },
}

fn display_parent(parent: Option<&TaskId>) -> String {
    parent.map_or_else(|| "unset".to_owned(), |id| id.to_string())
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

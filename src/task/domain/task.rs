//! Task entity and its guarded status transitions.

use super::{
    HistoryLog, StateTransitionError, TagSet, TaskAction, TaskId, TaskStatus, User,
};
use crate::task::ports::DiagnosticLogger;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

const UNASSIGNED: &str = "Sin asignar";

/// Parameter object describing a task to create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Free-text description.
    pub description: String,
    /// Parent task, when creating a subtask.
    pub parent: Option<TaskId>,
    /// Labels fixed at creation.
    pub tags: TagSet,
}

impl NewTask {
    /// Describes a root task without tags.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            parent: None,
            tags: TagSet::new(),
        }
    }

    /// Sets the parent task.
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }
}

/// A unit of work with status, optional assignee, tags, subtasks and history.
///
/// Tasks are only created by [`super::TaskHierarchy`], which assigns the
/// identifier and keeps parent and subtask links consistent. Every mutation
/// appends to the task history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    created_at: DateTime<Utc>,
    description: String,
    status: TaskStatus,
    parent: Option<TaskId>,
    assignee: Option<User>,
    tags: TagSet,
    subtasks: Vec<TaskId>,
    history: HistoryLog,
}

impl Task {
    pub(crate) fn create(
        id: TaskId,
        created_at: DateTime<Utc>,
        draft: NewTask,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            created_at,
            description: draft.description,
            status: TaskStatus::Open,
            parent: draft.parent,
            assignee: None,
            tags: draft.tags,
            subtasks: Vec::new(),
            history: HistoryLog::started(clock),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the parent task, if this is a subtask.
    #[must_use]
    pub const fn parent(&self) -> Option<TaskId> {
        self.parent
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref()
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Returns the attached subtasks in insertion order.
    #[must_use]
    pub fn subtasks(&self) -> &[TaskId] {
        &self.subtasks
    }

    /// Returns the history log.
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Moves the task to `target`.
    ///
    /// Finishing requires `open_subtasks == 0`. A rejected transition leaves
    /// both status and history untouched.
    pub(crate) fn change_status(
        &mut self,
        target: TaskStatus,
        open_subtasks: usize,
        clock: &impl Clock,
        logger: &impl DiagnosticLogger,
    ) -> Result<(), StateTransitionError> {
        logger.info(&format!(
            "changing status of task {}: {} → {target}",
            self.id, self.status
        ));

        if target.is_finished() && open_subtasks > 0 {
            let error = StateTransitionError {
                task_id: self.id,
                from: self.status,
                open_subtasks,
            };
            logger.error(&error.to_string());
            return Err(error);
        }

        self.history.record(
            TaskAction::StateChange,
            format!("{} → {target}", self.status),
            clock,
        );
        self.status = target;
        logger.debug(&format!("task {} is now {target}", self.id));
        Ok(())
    }

    /// Sets or clears the assignee.
    pub(crate) fn assign_user(&mut self, user: Option<User>, clock: &impl Clock) {
        let assignee = user.as_ref().map_or(UNASSIGNED, User::name);
        let detail = format!("Asignado a: {assignee}");
        self.history.record(TaskAction::Assignment, detail, clock);
        self.assignee = user;
    }

    /// Replaces the description.
    pub(crate) fn replace_description(&mut self, description: String, clock: &impl Clock) {
        self.history
            .record(TaskAction::DescriptionChange, description.as_str(), clock);
        self.description = description;
    }

    /// Appends a child identifier. Linkage checks belong to the hierarchy.
    pub(crate) fn attach_subtask(&mut self, child: TaskId) {
        self.subtasks.push(child);
    }
}

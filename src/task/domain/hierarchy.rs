//! Parent/subtask composition of tasks.

use super::{
    HierarchyError, IdentityGenerator, NewTask, Task, TaskDomainError, TaskId, TaskStatus, User,
};
use crate::task::ports::DiagnosticLogger;
use mockable::Clock;
use std::collections::HashMap;

/// Arena owning every task of one board.
///
/// Parent and subtask links are identifiers into the arena. A parent must
/// exist before its children and is fixed at creation, so the graph stays a
/// forest.
#[derive(Debug, Clone)]
pub struct TaskHierarchy {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
    ids: &'static IdentityGenerator,
}

impl Default for TaskHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskHierarchy {
    /// Creates an empty hierarchy backed by the process-wide identity
    /// generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(IdentityGenerator::process())
    }

    /// Creates an empty hierarchy backed by a specific generator.
    #[must_use]
    pub fn with_generator(ids: &'static IdentityGenerator) -> Self {
        Self {
            tasks: HashMap::new(),
            order: Vec::new(),
            ids,
        }
    }

    /// Creates a task, stamping identity, creation time and the initial
    /// history record.
    ///
    /// A parent given in `draft` is recorded on the child only; call
    /// [`Self::add_subtask`] to list the child on the parent, or use
    /// [`Self::create_subtask`] to do both.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownTask`] when the parent does not exist
    /// and [`TaskDomainError::IdentityExhausted`] when no identifier is left.
    pub fn create_task(
        &mut self,
        draft: NewTask,
        clock: &impl Clock,
        logger: &impl DiagnosticLogger,
    ) -> Result<TaskId, TaskDomainError> {
        if let Some(parent) = draft.parent {
            self.require(parent)
                .inspect_err(|error| logger.error(&error.to_string()))?;
        }

        let created_at = clock.utc();
        let id = self
            .ids
            .next_id(created_at)
            .inspect_err(|error| logger.error(&error.to_string()))?;
        let task = Task::create(id, created_at, draft, clock);
        logger.debug(&format!("created task {id}"));
        self.tasks.insert(id, task);
        self.order.push(id);
        Ok(id)
    }

    /// Creates a task under `parent` and lists it as a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownTask`] when the parent does not exist.
    pub fn create_subtask(
        &mut self,
        parent: TaskId,
        draft: NewTask,
        clock: &impl Clock,
        logger: &impl DiagnosticLogger,
    ) -> Result<TaskId, TaskDomainError> {
        let child = self.create_task(draft.with_parent(parent), clock, logger)?;
        self.add_subtask(parent, child, logger)?;
        Ok(child)
    }

    /// Lists `child` among the subtasks of `parent`.
    ///
    /// The child must have been created with `parent` as its parent. No
    /// history record is written on either task.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError`] when either task is unknown, the child
    /// belongs to another parent, or it is already listed.
    pub fn add_subtask(
        &mut self,
        parent: TaskId,
        child: TaskId,
        logger: &impl DiagnosticLogger,
    ) -> Result<(), TaskDomainError> {
        let recorded_parent = self
            .require(child)
            .inspect_err(|error| logger.error(&error.to_string()))?
            .parent();
        let owner = self
            .require(parent)
            .inspect_err(|error| logger.error(&error.to_string()))?;

        if recorded_parent != Some(parent) {
            let error = HierarchyError::ParentMismatch {
                child,
                expected: parent,
                actual: recorded_parent,
            };
            logger.error(&error.to_string());
            return Err(error.into());
        }
        if owner.subtasks().contains(&child) {
            let error = HierarchyError::AlreadyAttached { parent, child };
            logger.error(&error.to_string());
            return Err(error.into());
        }

        self.require_mut(parent)?.attach_subtask(child);
        logger.debug(&format!("attached subtask {child} to task {parent}"));
        Ok(())
    }

    /// Changes the status of a task, enforcing that a task is only finished
    /// once all of its direct subtasks are finished.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StateTransition`] when finishing is blocked
    /// by open subtasks and [`HierarchyError::UnknownTask`] for an unknown id.
    pub fn change_status(
        &mut self,
        id: TaskId,
        target: TaskStatus,
        clock: &impl Clock,
        logger: &impl DiagnosticLogger,
    ) -> Result<(), TaskDomainError> {
        let open_subtasks = self
            .open_subtask_count(id)
            .inspect_err(|error| logger.error(&error.to_string()))?;
        self.require_mut(id)?
            .change_status(target, open_subtasks, clock, logger)?;
        Ok(())
    }

    /// Sets or clears the assignee of a task.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownTask`] for an unknown id.
    pub fn assign_user(
        &mut self,
        id: TaskId,
        user: Option<User>,
        clock: &impl Clock,
        logger: &impl DiagnosticLogger,
    ) -> Result<(), TaskDomainError> {
        self.require_mut(id)
            .inspect_err(|error| logger.error(&error.to_string()))?
            .assign_user(user, clock);
        logger.debug(&format!("updated assignee of task {id}"));
        Ok(())
    }

    /// Replaces the description of a task.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownTask`] for an unknown id.
    pub fn replace_description(
        &mut self,
        id: TaskId,
        description: impl Into<String>,
        clock: &impl Clock,
        logger: &impl DiagnosticLogger,
    ) -> Result<(), TaskDomainError> {
        self.require_mut(id)
            .inspect_err(|error| logger.error(&error.to_string()))?
            .replace_description(description.into(), clock);
        logger.debug(&format!("updated description of task {id}"));
        Ok(())
    }

    /// Returns `true` when every direct subtask is finished. A task without
    /// subtasks can always close.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownTask`] for an unknown id.
    pub fn can_close(&self, id: TaskId) -> Result<bool, TaskDomainError> {
        Ok(self.open_subtask_count(id)? == 0)
    }

    /// Returns the task with the given id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Returns `true` when the id belongs to this hierarchy.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Returns the direct subtasks of a task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownTask`] for an unknown id.
    pub fn subtasks_of(&self, id: TaskId) -> Result<Vec<&Task>, TaskDomainError> {
        let task = self.require(id)?;
        Ok(task
            .subtasks()
            .iter()
            .filter_map(|child| self.tasks.get(child))
            .collect())
    }

    /// Returns the parent of a task, if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownTask`] for an unknown id.
    pub fn parent_of(&self, id: TaskId) -> Result<Option<&Task>, TaskDomainError> {
        let task = self.require(id)?;
        Ok(task.parent().and_then(|parent| self.tasks.get(&parent)))
    }

    /// Returns tasks without a parent, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = &Task> {
        self.iter().filter(|task| task.parent().is_none())
    }

    /// Iterates over every task in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the hierarchy holds no task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn open_subtask_count(&self, id: TaskId) -> Result<usize, TaskDomainError> {
        let task = self.require(id)?;
        Ok(task
            .subtasks()
            .iter()
            .filter(|child| {
                self.tasks
                    .get(*child)
                    .is_none_or(|subtask| !subtask.status().is_finished())
            })
            .count())
    }

    fn require(&self, id: TaskId) -> Result<&Task, HierarchyError> {
        self.tasks.get(&id).ok_or(HierarchyError::UnknownTask(id))
    }

    fn require_mut(&mut self, id: TaskId) -> Result<&mut Task, HierarchyError> {
        self.tasks.get_mut(&id).ok_or(HierarchyError::UnknownTask(id))
    }
}

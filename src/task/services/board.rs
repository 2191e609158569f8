//! Thread-safe orchestration of a task hierarchy.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::calendar::current_date;
use crate::config::{ConfigError, TaskBoardConfig};
use crate::task::{
    domain::{
        HierarchyError, HistoryRecord, NewTask, ParseTaskStatusError, TagSet, Task,
        TaskDomainError, TaskHierarchy, TaskId, TaskStatus, User,
    },
    ports::DiagnosticLogger,
};
use mockable::Clock;
use thiserror::Error;

use super::detail::{RenderError, TaskDetailRenderer, render_history};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    description: String,
    parent: Option<TaskId>,
    tags: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request for a root task without tags.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            parent: None,
            tags: Vec::new(),
        }
    }

    /// Sets the parent task. The child still has to be attached with
    /// [`TaskBoard::add_subtask`].
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the tag labels.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    fn into_draft(self) -> Result<NewTask, TaskDomainError> {
        let tags = TagSet::from_labels(&self.tags)?;
        let mut draft = NewTask::new(self.description).with_tags(tags);
        draft.parent = self.parent;
        Ok(draft)
    }
}

/// Request payload for a status change expressed as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTaskRequest {
    task_id: TaskId,
    target_status: String,
}

impl TransitionTaskRequest {
    /// Creates a transition request.
    #[must_use]
    pub fn new(task_id: TaskId, target_status: impl Into<String>) -> Self {
        Self {
            task_id,
            target_status: target_status.into(),
        }
    }
}

/// Service-level errors for task board operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskBoardError {
    /// Domain validation or invariant failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not recognised.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// The summary template failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The board configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The shared state was poisoned by a panicking writer.
    #[error("task board state is unavailable: {0}")]
    Unavailable(String),
}

impl From<HierarchyError> for TaskBoardError {
    fn from(error: HierarchyError) -> Self {
        Self::Domain(error.into())
    }
}

/// Result type for task board operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Shared task board.
///
/// Every mutation holds the write lock for its whole duration, so at most one
/// mutation is in flight per board. Reads return cloned snapshots.
pub struct TaskBoard<C, L>
where
    C: Clock + Send + Sync,
    L: DiagnosticLogger,
{
    hierarchy: Arc<RwLock<TaskHierarchy>>,
    clock: Arc<C>,
    logger: Arc<L>,
    config: TaskBoardConfig,
    renderer: TaskDetailRenderer,
}

impl<C, L> Clone for TaskBoard<C, L>
where
    C: Clock + Send + Sync,
    L: DiagnosticLogger,
{
    fn clone(&self) -> Self {
        Self {
            hierarchy: Arc::clone(&self.hierarchy),
            clock: Arc::clone(&self.clock),
            logger: Arc::clone(&self.logger),
            config: self.config.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<C, L> TaskBoard<C, L>
where
    C: Clock + Send + Sync,
    L: DiagnosticLogger,
{
    /// Creates an empty board with the default configuration.
    #[must_use]
    pub fn new(clock: Arc<C>, logger: Arc<L>) -> Self {
        Self::assemble(clock, logger, TaskBoardConfig::default())
    }

    /// Creates an empty board with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Config`] when the configuration is invalid.
    pub fn with_config(
        clock: Arc<C>,
        logger: Arc<L>,
        config: TaskBoardConfig,
    ) -> TaskBoardResult<Self> {
        config.validate()?;
        Ok(Self::assemble(clock, logger, config))
    }

    fn assemble(clock: Arc<C>, logger: Arc<L>, config: TaskBoardConfig) -> Self {
        let renderer = TaskDetailRenderer::new(config.detail_template.clone());
        Self {
            hierarchy: Arc::new(RwLock::new(TaskHierarchy::new())),
            clock,
            logger,
            config,
            renderer,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskBoardConfig {
        &self.config
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] when a tag is blank or the parent
    /// is unknown.
    pub fn create_task(&self, request: CreateTaskRequest) -> TaskBoardResult<Task> {
        let draft = request.into_draft()?;
        let mut hierarchy = self.write()?;
        let id = hierarchy.create_task(draft, &*self.clock, &*self.logger)?;
        snapshot(&hierarchy, id)
    }

    /// Creates a task under `parent` and attaches it in one step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] when a tag is blank or the parent
    /// is unknown.
    pub fn create_subtask(
        &self,
        parent: TaskId,
        request: CreateTaskRequest,
    ) -> TaskBoardResult<Task> {
        let draft = request.into_draft()?;
        let mut hierarchy = self.write()?;
        let id = hierarchy.create_subtask(parent, draft, &*self.clock, &*self.logger)?;
        snapshot(&hierarchy, id)
    }

    /// Attaches an existing child to its parent and returns the parent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] wrapping a
    /// [`HierarchyError`] when the linkage is inconsistent.
    pub fn add_subtask(&self, parent: TaskId, child: TaskId) -> TaskBoardResult<Task> {
        let mut hierarchy = self.write()?;
        hierarchy.add_subtask(parent, child, &*self.logger)?;
        snapshot(&hierarchy, parent)
    }

    /// Changes the status of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] wrapping a
    /// [`crate::task::domain::StateTransitionError`] when subtasks are still
    /// open.
    pub fn change_status(&self, id: TaskId, target: TaskStatus) -> TaskBoardResult<Task> {
        let mut hierarchy = self.write()?;
        hierarchy.change_status(id, target, &*self.clock, &*self.logger)?;
        snapshot(&hierarchy, id)
    }

    /// Changes the status of a task from a textual status name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::InvalidStatus`] for unknown status text and
    /// the [`Self::change_status`] errors otherwise.
    pub fn transition_task(&self, request: TransitionTaskRequest) -> TaskBoardResult<Task> {
        let target = TaskStatus::try_from(request.target_status.as_str())?;
        self.change_status(request.task_id, target)
    }

    /// Sets or clears the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an unknown task.
    pub fn assign_user(&self, id: TaskId, user: Option<User>) -> TaskBoardResult<Task> {
        let mut hierarchy = self.write()?;
        hierarchy.assign_user(id, user, &*self.clock, &*self.logger)?;
        snapshot(&hierarchy, id)
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an unknown task.
    pub fn replace_description(
        &self,
        id: TaskId,
        description: impl Into<String>,
    ) -> TaskBoardResult<Task> {
        let mut hierarchy = self.write()?;
        hierarchy.replace_description(id, description, &*self.clock, &*self.logger)?;
        snapshot(&hierarchy, id)
    }

    /// Returns a snapshot of a task, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Unavailable`] when the state is poisoned.
    pub fn find(&self, id: TaskId) -> TaskBoardResult<Option<Task>> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Returns snapshots of every task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Unavailable`] when the state is poisoned.
    pub fn tasks(&self) -> TaskBoardResult<Vec<Task>> {
        Ok(self.read()?.iter().cloned().collect())
    }

    /// Returns snapshots of the direct subtasks in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an unknown task.
    pub fn subtasks(&self, id: TaskId) -> TaskBoardResult<Vec<Task>> {
        let hierarchy = self.read()?;
        Ok(hierarchy
            .subtasks_of(id)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// Returns `true` when the task could be finished right now.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an unknown task.
    pub fn can_close(&self, id: TaskId) -> TaskBoardResult<bool> {
        Ok(self.read()?.can_close(id)?)
    }

    /// Returns an owned copy of the task history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an unknown task.
    pub fn history(&self, id: TaskId) -> TaskBoardResult<Vec<HistoryRecord>> {
        let hierarchy = self.read()?;
        Ok(require(&hierarchy, id)?.history().snapshot())
    }

    /// Renders the task summary with the configured template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Render`] when the template fails.
    pub fn render_detail(&self, id: TaskId) -> TaskBoardResult<String> {
        let hierarchy = self.read()?;
        Ok(self.renderer.render(require(&hierarchy, id)?)?)
    }

    /// Renders the task history with the configured date format.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Domain`] for an unknown task.
    pub fn render_history(&self, id: TaskId) -> TaskBoardResult<Vec<String>> {
        let hierarchy = self.read()?;
        render_history(require(&hierarchy, id)?, &self.config.date_format)
            .map_err(|err| ConfigError::from(err).into())
    }

    /// Returns today's date in the configured format.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Config`] when the date format is invalid.
    pub fn current_date(&self) -> TaskBoardResult<String> {
        current_date(&*self.clock, &self.config.date_format)
            .map_err(|err| ConfigError::from(err).into())
    }

    fn read(&self) -> TaskBoardResult<RwLockReadGuard<'_, TaskHierarchy>> {
        self.hierarchy
            .read()
            .map_err(|err| TaskBoardError::Unavailable(err.to_string()))
    }

    fn write(&self) -> TaskBoardResult<RwLockWriteGuard<'_, TaskHierarchy>> {
        self.hierarchy
            .write()
            .map_err(|err| TaskBoardError::Unavailable(err.to_string()))
    }
}

fn require(hierarchy: &TaskHierarchy, id: TaskId) -> Result<&Task, HierarchyError> {
    hierarchy.get(id).ok_or(HierarchyError::UnknownTask(id))
}

fn snapshot(hierarchy: &TaskHierarchy, id: TaskId) -> TaskBoardResult<Task> {
    Ok(require(hierarchy, id)?.clone())
}

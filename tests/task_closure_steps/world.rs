//! Shared world state for task closure BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasktree::task::{
    adapters::memory::RecordingLogger,
    domain::Task,
    services::{TaskBoard, TaskBoardError},
};

/// Board type used by the BDD world.
pub type TestTaskBoard = TaskBoard<DefaultClock, RecordingLogger>;

/// Scenario world for task closure behaviour tests.
pub struct TaskClosureWorld {
    pub board: TestTaskBoard,
    pub task: Option<Task>,
    pub subtask: Option<Task>,
    pub last_transition_result: Option<Result<Task, TaskBoardError>>,
}

impl TaskClosureWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: TaskBoard::new(Arc::new(DefaultClock), Arc::new(RecordingLogger::new())),
            task: None,
            subtask: None,
            last_transition_result: None,
        }
    }

    /// Returns the main task of the scenario.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Returns the subtask of the scenario.
    pub fn subtask(&self) -> Result<&Task, eyre::Report> {
        self.subtask
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing subtask in scenario world"))
    }
}

impl Default for TaskClosureWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskClosureWorld {
    TaskClosureWorld::default()
}

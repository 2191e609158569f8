//! Application services for task orchestration and presentation.

mod board;
mod detail;

pub use board::{
    CreateTaskRequest, TaskBoard, TaskBoardError, TaskBoardResult, TransitionTaskRequest,
};
pub use detail::{DEFAULT_DETAIL_TEMPLATE, RenderError, TaskDetailRenderer, render_history};

//! Human-readable projections of tasks.

use crate::calendar::{InvalidDateFormat, format_date};
use crate::task::domain::{Task, TaskId};
use minijinja::{Environment, context};
use thiserror::Error;

/// Default summary template.
///
/// Renders `Task #<id>[ (subtask of #<parent>)]: <description> <glyph>`
/// followed by the assignee, the tag list and, on a second line, the subtask
/// identifiers.
pub const DEFAULT_DETAIL_TEMPLATE: &str = "Task #{{ id }}\
{% if parent %} (subtask of #{{ parent }}){% endif %}: {{ description }} {{ glyph }}\
{% if assignee %} 👤{{ assignee }}{% endif %}\
{% if tags %} 🏷️[{{ tags|join(\", \") }}]{% endif %}\
{% if subtasks %}\n  └ Subtasks: {{ subtasks|join(\", \") }}{% endif %}";

/// Error raised while rendering a task summary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render task {task_id}: {reason}")]
pub struct RenderError {
    /// Task being rendered.
    pub task_id: TaskId,
    /// Template engine message.
    pub reason: String,
}

/// Renders task summaries from a `minijinja` template.
///
/// The template sees `id`, `parent`, `description`, `status`, `glyph`,
/// `assignee`, `tags` and `subtasks` (identifiers prefixed with `#`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailRenderer {
    template: String,
}

impl Default for TaskDetailRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_DETAIL_TEMPLATE)
    }
}

impl TaskDetailRenderer {
    /// Creates a renderer for the given template source.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Renders the summary of one task.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the template fails to compile or render.
    pub fn render(&self, task: &Task) -> Result<String, RenderError> {
        let subtasks: Vec<String> = task
            .subtasks()
            .iter()
            .map(|child| format!("#{child}"))
            .collect();
        let tags: Vec<&str> = task.tags().iter().collect();
        let ctx = context! {
            id => task.id().to_string(),
            parent => task.parent().map(|parent| parent.to_string()),
            description => task.description(),
            status => task.status().as_str(),
            glyph => task.status().glyph(),
            assignee => task.assignee().map(|user| user.name()),
            tags => tags,
            subtasks => subtasks,
        };

        Environment::new()
            .render_str(&self.template, ctx)
            .map_err(|err| RenderError {
                task_id: task.id(),
                reason: err.to_string(),
            })
    }
}

/// Renders one `<date> <action>: <detail>` line per history record.
///
/// # Errors
///
/// Returns [`InvalidDateFormat`] when `date_format` is invalid.
pub fn render_history(task: &Task, date_format: &str) -> Result<Vec<String>, InvalidDateFormat> {
    task.history()
        .records()
        .iter()
        .map(|record| {
            let date = format_date(record.timestamp(), date_format)?;
            Ok(format!("{date} {}: {}", record.action(), record.detail()))
        })
        .collect()
}

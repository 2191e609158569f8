//! Append-only audit history attached to each task.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation captured by a history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskAction {
    /// The task was created.
    #[serde(rename = "Creation")]
    Creation,
    /// The task status changed.
    #[serde(rename = "CambioEstado")]
    StateChange,
    /// The assignee changed or was cleared.
    #[serde(rename = "Asignación")]
    Assignment,
    /// The description was replaced.
    #[serde(rename = "CambioDescripción")]
    DescriptionChange,
}

impl TaskAction {
    /// Returns the audit label recorded for the action.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Creation => "Creation",
            Self::StateChange => "CambioEstado",
            Self::Assignment => "Asignación",
            Self::DescriptionChange => "CambioDescripción",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One immutable, timestamped history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    timestamp: DateTime<Utc>,
    action: TaskAction,
    detail: String,
}

impl HistoryRecord {
    /// Returns when the action happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> TaskAction {
        self.action
    }

    /// Returns the free-text detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Ordered history of one task.
///
/// Records can only be appended from inside the crate; callers get either a
/// read-only slice or an owned snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    /// Starts a log whose first record is the task creation.
    pub(crate) fn started(clock: &impl Clock) -> Self {
        let mut log = Self {
            records: Vec::new(),
        };
        log.record(TaskAction::Creation, "task created", clock);
        log
    }

    /// Appends a record stamped with the current clock time.
    pub(crate) fn record(
        &mut self,
        action: TaskAction,
        detail: impl Into<String>,
        clock: &impl Clock,
    ) {
        self.records.push(HistoryRecord {
            timestamp: clock.utc(),
            action,
            detail: detail.into(),
        });
    }

    /// Returns an owned copy of every record, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<HistoryRecord> {
        self.records.clone()
    }

    /// Returns the records as a read-only slice, oldest first.
    #[must_use]
    pub const fn records(&self) -> &[HistoryRecord] {
        self.records.as_slice()
    }

    /// Returns the number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no record exists. A started log is never empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the most recent record.
    #[must_use]
    pub const fn last(&self) -> Option<&HistoryRecord> {
        self.records.as_slice().last()
    }
}

//! Task identifiers and the generator that issues them.

use super::TaskDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a task.
///
/// The value is derived from the creation timestamp in milliseconds since the
/// Unix epoch, bumped past the last issued value when two tasks share a
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static PROCESS_GENERATOR: IdentityGenerator = IdentityGenerator::new();

/// Issues strictly increasing task identifiers from creation timestamps.
///
/// Each identifier is `max(timestamp_millis, last_issued + 1)`, so two tasks
/// created within the same millisecond, or while the clock steps backwards,
/// still receive distinct identifiers.
#[derive(Debug, Default)]
pub struct IdentityGenerator {
    last_issued: AtomicU64,
}

impl IdentityGenerator {
    /// Creates a generator that has not issued any identifier yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_issued: AtomicU64::new(0),
        }
    }

    /// Returns the generator shared by every hierarchy in the process.
    #[must_use]
    pub fn process() -> &'static Self {
        &PROCESS_GENERATOR
    }

    /// Issues the identifier for a task created at `created_at`.
    ///
    /// Timestamps before the Unix epoch count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IdentityExhausted`] once `u64::MAX` has
    /// been issued.
    pub fn next_id(&self, created_at: DateTime<Utc>) -> Result<TaskId, TaskDomainError> {
        let candidate = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        let previous = self
            .last_issued
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                last.checked_add(1).map(|bumped| bumped.max(candidate))
            })
            .map_err(|_| TaskDomainError::IdentityExhausted)?;

        // fetch_update returns the previous value; recompute what was stored.
        let issued = previous
            .checked_add(1)
            .map(|bumped| bumped.max(candidate))
            .ok_or(TaskDomainError::IdentityExhausted)?;
        Ok(TaskId(issued))
    }
}

//! Free-text labels attached to a task at creation.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of trimmed, non-empty tag labels.
///
/// Order is irrelevant; iteration is alphabetical and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Builds a tag set from raw labels.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTag`] if any label is blank.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, TaskDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| {
                let trimmed = label.as_ref().trim();
                if trimmed.is_empty() {
                    Err(TaskDomainError::EmptyTag)
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Returns `true` when the label is present.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label.trim())
    }

    /// Returns the number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over labels in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

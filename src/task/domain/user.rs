//! Users that tasks can be assigned to.

use super::TaskDomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@(.+)$";

/// Returns `true` when `value` looks like `local@domain`.
///
/// The local part is restricted to ASCII letters, digits and `+_.-`; the
/// domain part only has to be non-empty.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// Validated e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses an e-mail address.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEmail`] when the value does not
    /// match `local@domain`.
    pub fn parse(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if !is_valid_email(trimmed) {
            return Err(TaskDomainError::InvalidEmail(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person a task can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    name: String,
    email: Option<EmailAddress>,
}

impl User {
    /// Creates a user with the given display name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUserName`] when the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyUserName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            email: None,
        })
    }

    /// Attaches a validated e-mail address.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEmail`] when the address is malformed.
    pub fn with_email(mut self, email: impl Into<String>) -> Result<Self, TaskDomainError> {
        self.email = Some(EmailAddress::parse(email)?);
        Ok(self)
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the e-mail address, if any.
    #[must_use]
    pub const fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

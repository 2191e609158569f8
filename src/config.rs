//! Configuration for task boards.

use crate::calendar::{DEFAULT_DATE_FORMAT, InvalidDateFormat, validate_format};
use crate::task::services::DEFAULT_DETAIL_TEMPLATE;
use minijinja::Environment;
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The date pattern is invalid.
    #[error(transparent)]
    DateFormat(#[from] InvalidDateFormat),

    /// The detail template does not compile.
    #[error("invalid detail template: {0}")]
    Template(String),

    /// The log filter directive is invalid.
    #[error("invalid log filter '{filter}': {reason}")]
    LogFilter {
        /// Rejected directive.
        filter: String,
        /// Parser message.
        reason: String,
    },
}

/// Presentation and diagnostics settings for a [`crate::task::services::TaskBoard`].
///
/// # Examples
///
/// ```
/// use tasktree::config::TaskBoardConfig;
///
/// let config = TaskBoardConfig::default();
/// assert_eq!(config.date_format, "%d-%m-%Y");
///
/// let iso = TaskBoardConfig::iso_dates();
/// assert_eq!(iso.date_format, "%Y-%m-%d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskBoardConfig {
    /// strftime pattern for calendar dates.
    pub date_format: String,
    /// `minijinja` template for task summaries.
    pub detail_template: String,
    /// `tracing` filter directive used by [`crate::telemetry::init_tracing`].
    pub log_filter: String,
}

impl Default for TaskBoardConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            detail_template: DEFAULT_DETAIL_TEMPLATE.to_owned(),
            log_filter: "info".to_owned(),
        }
    }
}

impl TaskBoardConfig {
    /// Creates a configuration that renders ISO-8601 dates.
    #[must_use]
    pub fn iso_dates() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_owned(),
            ..Default::default()
        }
    }

    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any
    /// [`Self::validate`] error.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(document).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the date pattern.
    #[must_use]
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Sets the detail template.
    #[must_use]
    pub fn with_detail_template(mut self, detail_template: impl Into<String>) -> Self {
        self.detail_template = detail_template.into();
        self
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, log_filter: impl Into<String>) -> Self {
        self.log_filter = log_filter.into();
        self
    }

    /// Checks every setting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_format(&self.date_format)?;

        let environment = Environment::new();
        environment
            .template_from_str(&self.detail_template)
            .map_err(|err| ConfigError::Template(err.to_string()))?;

        EnvFilter::try_new(&self.log_filter).map_err(|err| ConfigError::LogFilter {
            filter: self.log_filter.clone(),
            reason: err.to_string(),
        })?;
        Ok(())
    }
}

//! Diagnostic logger backed by the `tracing` ecosystem.

use crate::task::ports::DiagnosticLogger;

/// Forwards diagnostics to `tracing` under the `tasktree` target.
///
/// Output and filtering are decided by whichever subscriber is installed;
/// see [`crate::telemetry::init_tracing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "tasktree", "{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "tasktree", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "tasktree", "{message}");
    }
}

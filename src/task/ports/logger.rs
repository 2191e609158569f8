//! Diagnostic logging port used by task operations.

use std::sync::Arc;

/// Fire-and-forget diagnostic sink.
///
/// Implementations must not panic and must not report failures back to the
/// caller: a broken log sink never changes the outcome of a task operation.
pub trait DiagnosticLogger: Send + Sync {
    /// Records an informational message.
    fn info(&self, message: &str);

    /// Records a debugging message.
    fn debug(&self, message: &str);

    /// Records an error message.
    fn error(&self, message: &str);
}

impl<L> DiagnosticLogger for Arc<L>
where
    L: DiagnosticLogger + ?Sized,
{
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn debug(&self, message: &str) {
        (**self).debug(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

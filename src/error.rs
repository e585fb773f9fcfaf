//! Error types used by the solovisor runtime and task bodies.
//!
//! This module defines two error enums:
//!
//! - [`TaskError`] - failures reported by a task body; the worker turns them
//!   into a `crashed` status.
//! - [`RuntimeError`] - failures of host-facing waits such as
//!   [`Supervisor::shutdown`](crate::Supervisor::shutdown).
//!
//! `start`, `stop` and `status` never return an error: redundant calls are
//! no-ops that report a descriptive [`Status`](crate::Status) instead.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logs/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the solovisor runtime.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The worker did not settle within the grace period after a stop request.
    ///
    /// The worker keeps running; cancellation stays cooperative.
    #[error("worker did not stop within {grace:?}")]
    GraceExceeded {
        /// The grace duration that elapsed.
        grace: Duration,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use solovisor::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5) };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace } => format!("grace exceeded after {grace:?}"),
        }
    }
}

/// # Errors returned by a task body.
///
/// A task body reports success with `Ok(())`. `Canceled` is treated as a
/// graceful exit (the run settles to `stopped`); `Fail` settles the run to
/// `crashed` with the error text as detail.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task body failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task body observed cancellation and gave up its work.
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    ///
    /// # Example
    /// ```
    /// use solovisor::TaskError;
    ///
    /// let err = TaskError::fail("boom");
    /// assert_eq!(err.to_string(), "execution failed: boom");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Canceled => "context cancelled".to_string(),
        }
    }

    /// True if the error should settle the run as `crashed`.
    pub fn is_crash(&self) -> bool {
        !matches!(self, TaskError::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_display_carries_description() {
        let err = TaskError::fail("boom");
        assert!(err.to_string().contains("boom"));
        assert_eq!(err.as_label(), "task_failed");
        assert_eq!(err.as_message(), "error: boom");
        assert!(err.is_crash());
    }

    #[test]
    fn canceled_is_not_a_crash() {
        assert!(!TaskError::Canceled.is_crash());
        assert_eq!(TaskError::Canceled.as_label(), "task_canceled");
    }

    #[test]
    fn grace_exceeded_message() {
        let err = RuntimeError::GraceExceeded {
            grace: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "worker did not stop within 250ms");
        assert_eq!(err.as_message(), "grace exceeded after 250ms");
    }
}

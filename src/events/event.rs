//! # Runtime events emitted by the supervisor and its worker.
//!
//! Every status transition publishes exactly one [`Event`]. The [`EventKind`]
//! enum classifies them into two groups:
//! - **Transitions**: the run moved through the state machine
//!   (starting, running, stop requested, stopped, crashed)
//! - **Ignored calls**: a redundant `start`/`stop` was answered with a no-op
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Transitions are published while the supervisor lock is held, so within one
//! supervisor `seq` order equals the order in which statuses were observable.
//!
//! ## Example
//! ```rust
//! use solovisor::{Event, EventKind, State, Status};
//!
//! let ev = Event::new(EventKind::WorkerCrashed)
//!     .with_task("bot")
//!     .with_run(3)
//!     .with_status(Status::new(State::Crashed, "execution failed: boom"));
//!
//! assert_eq!(ev.kind, EventKind::WorkerCrashed);
//! assert_eq!(ev.task.as_deref(), Some("bot"));
//! assert_eq!(ev.detail(), Some("execution failed: boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::core::{State, Status};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Transitions ===
    /// `start` launched a new run.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `run`: run number (1-based)
    /// - `status`: `starting`
    WorkerStarting,

    /// Worker entered the task body.
    ///
    /// Sets:
    /// - `task`, `run`
    /// - `status`: `running`
    WorkerRunning,

    /// `stop` cancelled the run's token.
    ///
    /// Sets:
    /// - `task`, `run`
    /// - `status`: `stopping`
    StopRequested,

    /// Task body returned normally (or after observing cancellation).
    ///
    /// Sets:
    /// - `task`, `run`
    /// - `status`: `stopped`
    WorkerStopped,

    /// Task body failed, panicked, or the worker was dropped by the runtime.
    ///
    /// Sets:
    /// - `task`, `run`
    /// - `status`: `crashed`, detail carries the cause
    WorkerCrashed,

    // === Ignored calls ===
    /// `start` found a live worker and did nothing.
    ///
    /// Sets:
    /// - `task`, `run` (the live run)
    /// - `status`: `running` / `already running`
    StartIgnored,

    /// `stop` found no live worker and did nothing.
    ///
    /// Sets:
    /// - `task`
    /// - `status`: `stopped` / `already stopped`
    StopIgnored,
}

impl EventKind {
    /// Short stable label (kebab-case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::WorkerStarting => "starting",
            EventKind::WorkerRunning => "running",
            EventKind::StopRequested => "stop-requested",
            EventKind::WorkerStopped => "stopped",
            EventKind::WorkerCrashed => "crashed",
            EventKind::StartIgnored => "start-ignored",
            EventKind::StopIgnored => "stop-ignored",
        }
    }
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the task body.
    pub task: Option<Arc<str>>,
    /// Run number the event belongs to (starting from 1).
    pub run: Option<u64>,
    /// Supervisor status right after the event.
    pub status: Option<Status>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            run: None,
            status: None,
        }
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a run number.
    #[inline]
    pub fn with_run(mut self, run: u64) -> Self {
        self.run = Some(run);
        self
    }

    /// Attaches the status produced by the transition.
    #[inline]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// State carried by the attached status, if any.
    #[inline]
    pub fn state(&self) -> Option<State> {
        self.status.as_ref().map(Status::state)
    }

    /// Detail carried by the attached status, if any.
    #[inline]
    pub fn detail(&self) -> Option<&str> {
        self.status.as_ref().map(Status::detail)
    }

    /// True for events that end a run (`WorkerStopped` / `WorkerCrashed`).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::WorkerStopped | EventKind::WorkerCrashed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::WorkerStarting);
        let b = Event::new(EventKind::WorkerRunning);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn terminal_kinds() {
        assert!(Event::new(EventKind::WorkerStopped).is_terminal());
        assert!(Event::new(EventKind::WorkerCrashed).is_terminal());
        assert!(!Event::new(EventKind::StopRequested).is_terminal());
        assert!(!Event::new(EventKind::StartIgnored).is_terminal());
    }

    #[test]
    fn status_accessors() {
        let ev = Event::new(EventKind::StopRequested)
            .with_status(Status::new(State::Stopping, "stop requested"));
        assert_eq!(ev.state(), Some(State::Stopping));
        assert_eq!(ev.detail(), Some("stop requested"));
        assert_eq!(Event::new(EventKind::StopIgnored).state(), None);
    }
}

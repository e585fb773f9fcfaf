//! # Supervisor status snapshot.
//!
//! [`Status`] is an immutable value replaced wholesale on every transition.
//! It is built only from a [`State`], so `running` can never disagree with it:
//!
//! ```text
//! running == true   ⇔  state ∈ { starting, running, stopping }
//! running == false  ⇔  state ∈ { idle, stopped, crashed }
//! ```
//!
//! ## State machine
//! ```text
//! idle ──start──► starting ──(worker begins)──► running
//! running ──stop──► stopping ──(worker observes cancel, returns)──► stopped
//! running ──(task body returns)──► stopped
//! running/stopping ──(task body fails)──► crashed
//! stopped/crashed ──start──► starting
//! ```

use std::fmt;

/// Detail of the initial status.
pub(crate) const NOT_STARTED: &str = "not started";
/// Detail set by a launching `start`.
pub(crate) const LAUNCHING: &str = "launching";
/// Detail set by the worker once it enters the task body.
pub(crate) const STARTED: &str = "started";
/// Detail of a redundant `start`.
pub(crate) const ALREADY_RUNNING: &str = "already running";
/// Detail set by a stop that signalled cancellation.
pub(crate) const STOP_REQUESTED: &str = "stop requested";
/// Detail of a redundant `stop`.
pub(crate) const ALREADY_STOPPED: &str = "already stopped";
/// Detail set when the task body returned normally.
pub(crate) const FINISHED: &str = "finished";
/// Detail set when the runtime dropped the worker before it could settle.
pub(crate) const WORKER_ABORTED: &str = "worker aborted";

/// Lifecycle state of the supervised task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Never started.
    Idle,
    /// `start` launched a worker that has not entered the task body yet.
    Starting,
    /// Task body is executing.
    Running,
    /// Cancellation requested; waiting for the task body to return.
    Stopping,
    /// Last run finished (normally or after cancellation).
    Stopped,
    /// Last run failed; the detail carries the cause.
    Crashed,
}

impl State {
    /// Returns the lowercase state name (`"idle"`, `"starting"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Idle => "idle",
            State::Starting => "starting",
            State::Running => "running",
            State::Stopping => "stopping",
            State::Stopped => "stopped",
            State::Crashed => "crashed",
        }
    }

    /// True while a worker is starting, running or stopping.
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, State::Starting | State::Running | State::Stopping)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally observable snapshot of the supervisor.
///
/// ## Example
/// ```rust
/// use solovisor::{State, Status};
///
/// let st = Status::new(State::Crashed, "execution failed: boom");
/// assert!(!st.running());
/// assert_eq!(st.to_string(), "crashed: execution failed: boom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    running: bool,
    state: State,
    detail: String,
}

impl Status {
    /// Builds a status; `running` is derived from `state`.
    pub fn new(state: State, detail: impl Into<String>) -> Self {
        Self {
            running: state.is_active(),
            state,
            detail: detail.into(),
        }
    }

    /// Status of a supervisor that was never started.
    pub fn idle() -> Self {
        Self::new(State::Idle, NOT_STARTED)
    }

    /// True while a worker is starting, running or stopping.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Human-readable detail; for `crashed` it holds the failure cause.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::idle()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.state, self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [State; 6] = [
        State::Idle,
        State::Starting,
        State::Running,
        State::Stopping,
        State::Stopped,
        State::Crashed,
    ];

    #[test]
    fn running_follows_state() {
        for state in ALL {
            let st = Status::new(state, "x");
            assert_eq!(
                st.running(),
                matches!(state, State::Starting | State::Running | State::Stopping),
                "state {state}"
            );
        }
    }

    #[test]
    fn initial_status_is_idle() {
        let st = Status::default();
        assert_eq!(st.state(), State::Idle);
        assert!(!st.running());
        assert_eq!(st.detail(), NOT_STARTED);
    }

    #[test]
    fn state_names() {
        let names: Vec<&str> = ALL.iter().map(State::as_str).collect();
        assert_eq!(
            names,
            ["idle", "starting", "running", "stopping", "stopped", "crashed"]
        );
    }
}

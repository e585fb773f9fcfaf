//! # Supervisor: lifecycle controller for one background task.
//!
//! The [`Supervisor`] owns the status record, at most one live worker, and the
//! cancellation token of the current run. Hosts (an HTTP handler, a CLI, a
//! hotkey handler) drive it with three synchronous calls:
//!
//! - [`start`](Supervisor::start) launches a worker unless one is live;
//! - [`stop`](Supervisor::stop) cancels the live run's token and returns;
//! - [`status`](Supervisor::status) returns a consistent snapshot.
//!
//! None of them waits for the worker. They hold one short-lived lock, so any
//! number of callers may race them: at most one worker is ever live, and every
//! caller observes transitions in the same order.
//!
//! ## Architecture
//! ```text
//! start() ──► lock ─┬─ live worker?  ──► status = running / "already running"
//!                   └─ otherwise     ──► fresh CancellationToken
//!                                        status = starting / "launching"
//!                                        runtime.spawn(worker::run) ──► slot
//!
//! stop()  ──► lock ─┬─ no live worker ──► status = stopped / "already stopped"
//!                   └─ otherwise      ──► status = stopping / "stop requested"
//!                                         token.cancel()
//!
//! worker  ──► lock: starting → running
//!             task.run(child token)
//!             lock: slot = None, status = stopped | crashed
//! ```
//!
//! Every transition also publishes one [`Event`](crate::Event) on the bus.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use solovisor::{State, Supervisor, TaskError, TaskFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let ticker = TaskFn::arc("ticker", |ctx: CancellationToken| async move {
//!         while !ctx.is_cancelled() {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!         }
//!         Ok::<(), TaskError>(())
//!     });
//!
//!     let sup = Supervisor::builder(ticker).build();
//!
//!     assert_eq!(sup.start().state(), State::Starting);
//!     assert_eq!(sup.stop().state(), State::Stopping);
//!     assert_eq!(sup.wait_settled().await.state(), State::Stopped);
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::builder::SupervisorBuilder;
use crate::core::config::SupervisorConfig;
use crate::core::shared::{Shared, Worker};
use crate::core::status::{self, State, Status};
use crate::core::worker;
use crate::error::RuntimeError;
use crate::events::{Event, EventKind};
use crate::tasks::TaskRef;

/// Upper bound between liveness re-checks in [`Supervisor::wait_settled`].
const RECHECK: Duration = Duration::from_millis(50);

/// Controls the lifecycle of a single supervised task body.
///
/// Share it as `Arc<Supervisor>`; all methods take `&self`.
pub struct Supervisor {
    cfg: SupervisorConfig,
    task: TaskRef,
    runtime: Handle,
    shared: Arc<Shared>,
}

impl Supervisor {
    /// Starts building a supervisor around the given task body.
    pub fn builder(task: TaskRef) -> SupervisorBuilder {
        SupervisorBuilder::new(task)
    }

    pub(crate) fn new_internal(
        cfg: SupervisorConfig,
        task: TaskRef,
        runtime: Handle,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            cfg,
            task,
            runtime,
            shared,
        }
    }

    /// Returns the current status. Never blocks on the worker.
    ///
    /// A worker dropped by its runtime without settling is reported as
    /// `crashed` / `"worker aborted"`.
    pub fn status(&self) -> Status {
        self.shared.snapshot()
    }

    /// Shorthand for `status().running()`.
    pub fn is_running(&self) -> bool {
        self.status().running()
    }

    /// Launches a worker unless one is already live.
    ///
    /// - Live worker: no-op, returns `running` / `"already running"`.
    /// - Otherwise: creates a fresh cancellation token, spawns the worker and
    ///   returns `starting` / `"launching"` without waiting for it.
    pub fn start(&self) -> Status {
        let mut inner = self.shared.lock();

        if let Some(run) = self.shared.live_run(&mut inner) {
            debug!(task = %self.shared.task_name, run, "start ignored: worker is live");
            return self.shared.apply(
                &mut inner,
                EventKind::StartIgnored,
                Some(run),
                Status::new(State::Running, status::ALREADY_RUNNING),
            );
        }

        inner.runs += 1;
        let run = inner.runs;
        let token = CancellationToken::new();

        let status = self.shared.apply(
            &mut inner,
            EventKind::WorkerStarting,
            Some(run),
            Status::new(State::Starting, status::LAUNCHING),
        );

        let join = self.runtime.spawn(worker::run(
            Arc::clone(&self.shared),
            Arc::clone(&self.task),
            run,
            token.clone(),
        ));
        inner.worker = Some(Worker { run, token, join });

        debug!(task = %self.shared.task_name, run, "worker launched");
        status
    }

    /// Requests cooperative cancellation of the live worker.
    ///
    /// - No live worker: no-op, returns `stopped` / `"already stopped"` and
    ///   leaves every cancellation token untouched.
    /// - Otherwise: returns `stopping` / `"stop requested"` right after
    ///   cancelling the run's token. The worker settles to `stopped` or
    ///   `crashed` once the task body returns.
    pub fn stop(&self) -> Status {
        let mut inner = self.shared.lock();

        let Some(run) = self.shared.live_run(&mut inner) else {
            return self.shared.apply(
                &mut inner,
                EventKind::StopIgnored,
                None,
                Status::new(State::Stopped, status::ALREADY_STOPPED),
            );
        };

        let status = self.shared.apply(
            &mut inner,
            EventKind::StopRequested,
            Some(run),
            Status::new(State::Stopping, status::STOP_REQUESTED),
        );
        if let Some(w) = &inner.worker {
            w.token.cancel();
        }

        debug!(task = %self.shared.task_name, run, "stop requested");
        status
    }

    /// Number of workers launched so far.
    pub fn run_count(&self) -> u64 {
        self.shared.lock().runs
    }

    /// Returns the name of the supervised task body.
    pub fn task_name(&self) -> &str {
        &self.shared.task_name
    }

    /// Returns the configuration this supervisor was built with.
    pub fn config(&self) -> &SupervisorConfig {
        &self.cfg
    }

    /// Subscribes to the raw event stream.
    ///
    /// Only events published after this call are observed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.shared.bus.subscribe()
    }

    /// Resolves once no worker is starting, running or stopping.
    ///
    /// Returns immediately when the supervisor is already quiescent. Other
    /// callers are never blocked by a pending `wait_settled`.
    pub async fn wait_settled(&self) -> Status {
        // Subscribe before reading so a transition between the two is not missed.
        let mut rx = self.shared.bus.subscribe();
        loop {
            let status = self.status();
            if !status.running() {
                return status;
            }
            // A worker dropped before its first poll publishes nothing, so re-check periodically.
            match time::timeout(RECHECK, rx.recv()).await {
                Ok(Ok(_)) | Ok(Err(broadcast::error::RecvError::Lagged(_))) | Err(_) => continue,
                Ok(Err(broadcast::error::RecvError::Closed)) => return self.status(),
            }
        }
    }

    /// Requests a stop, then waits up to `grace` for the worker to settle.
    ///
    /// `grace == 0` returns right after the stop request. On expiry the worker
    /// keeps running and [`RuntimeError::GraceExceeded`] is returned.
    pub async fn shutdown(&self, grace: Duration) -> Result<Status, RuntimeError> {
        let status = self.stop();
        if !status.running() || grace.is_zero() {
            return Ok(status);
        }

        match time::timeout(grace, self.wait_settled()).await {
            Ok(status) => Ok(status),
            Err(_elapsed) => Err(RuntimeError::GraceExceeded { grace }),
        }
    }

    /// [`shutdown`](Self::shutdown) with [`SupervisorConfig::grace`].
    pub async fn shutdown_default(&self) -> Result<Status, RuntimeError> {
        self.shutdown(self.cfg.grace).await
    }
}

impl Drop for Supervisor {
    /// Cancels the live run so its task body can wind down; does not wait for it.
    fn drop(&mut self) {
        if let Some(w) = &self.shared.lock().worker {
            w.token.cancel();
        }
    }
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("task", &self.shared.task_name)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::tasks::TaskFn;

    fn until_cancelled() -> TaskRef {
        TaskFn::arc("loop", |ctx: CancellationToken| async move {
            ctx.cancelled().await;
            Ok::<(), TaskError>(())
        })
    }

    #[tokio::test]
    async fn fresh_supervisor_is_idle() {
        let sup = Supervisor::builder(until_cancelled()).build();
        let st = sup.status();
        assert_eq!(st.state(), State::Idle);
        assert_eq!(st.detail(), "not started");
        assert_eq!(sup.run_count(), 0);
        assert_eq!(sup.task_name(), "loop");
    }

    #[tokio::test]
    async fn start_returns_starting_immediately() {
        let sup = Supervisor::builder(until_cancelled()).build();
        let st = sup.start();
        assert_eq!(st, Status::new(State::Starting, "launching"));
        assert!(sup.is_running());
        sup.stop();
        sup.wait_settled().await;
    }

    #[tokio::test]
    async fn shutdown_with_zero_grace_does_not_wait() {
        let sup = Supervisor::builder(until_cancelled()).build();
        sup.start();
        let st = sup.shutdown(Duration::ZERO).await.unwrap();
        assert_eq!(st.state(), State::Stopping);
        assert_eq!(sup.wait_settled().await.state(), State::Stopped);
    }

    #[tokio::test]
    async fn events_follow_transitions() {
        let sup = Supervisor::builder(until_cancelled()).build();
        let mut rx = sup.subscribe();

        sup.start();
        sup.start();
        sup.stop();
        sup.wait_settled().await;
        sup.stop();

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            assert_eq!(ev.task.as_deref(), Some("loop"));
            kinds.push(ev.kind);
        }
        // The worker may or may not have entered the body before the redundant start.
        kinds.retain(|k| *k != EventKind::WorkerRunning);
        assert_eq!(
            kinds,
            vec![
                EventKind::WorkerStarting,
                EventKind::StartIgnored,
                EventKind::StopRequested,
                EventKind::WorkerStopped,
                EventKind::StopIgnored,
            ]
        );
    }
}

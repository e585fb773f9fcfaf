//! # Worker: one run of the task body.
//!
//! Launched by [`Supervisor::start`](crate::Supervisor::start) on the supervisor's
//! runtime. Every transition goes through [`Shared`] under the supervisor lock.
//!
//! ## Flow
//! ```text
//! enter_running(run)                 starting → running ("started")
//!   └─► task.run(child token)        (catch_unwind)
//!         ├─ Ok / Err(Canceled)  ──► settle: stopped ("finished")
//!         ├─ Err(Fail)           ──► settle: crashed (error text)
//!         └─ panic               ──► settle: crashed ("panicked: ...")
//!
//! future dropped before settle   ──► SettleGuard: crashed ("worker aborted")
//! ```
//!
//! ## Rules
//! - The task body is invoked **exactly once** per run.
//! - The body gets a **child token**: cancelling it does not touch the run's token.
//! - A run only ever settles its own slot (matched by run number).

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::core::shared::Shared;
use crate::core::status::{self, State, Status};
use crate::tasks::TaskRef;

/// Runs the task body once and settles the run's final status.
pub(crate) async fn run(
    shared: Arc<Shared>,
    task: TaskRef,
    run: u64,
    token: CancellationToken,
) {
    let mut guard = SettleGuard {
        shared: Arc::clone(&shared),
        run,
        armed: true,
    };

    shared.enter_running(run);

    let outcome = AssertUnwindSafe(task.run(token.child_token()))
        .catch_unwind()
        .await;

    let status = match outcome {
        Ok(Err(e)) if e.is_crash() => Status::new(State::Crashed, e.to_string()),
        Ok(_) => Status::new(State::Stopped, status::FINISHED),
        Err(payload) => Status::new(
            State::Crashed,
            format!("panicked: {}", panic_message(payload.as_ref())),
        ),
    };

    guard.armed = false;
    shared.settle(run, status);
}

/// Settles the run as crashed if the worker future is dropped mid-run.
struct SettleGuard {
    shared: Arc<Shared>,
    run: u64,
    armed: bool,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if self.armed {
            warn!(run = self.run, "worker dropped before the task body returned");
            self.shared
                .settle(self.run, Status::new(State::Crashed, status::WORKER_ABORTED));
        }
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads() {
        let s: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(s.as_ref()), "boom");

        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(owned.as_ref()), "bang");

        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}

//! # solovisor
//!
//! **Solovisor** is a lifecycle controller for exactly one long-running
//! background task. Other parts of a program (a control-plane thread, an HTTP
//! handler, a hotkey) can start it, cooperatively stop it and query its
//! status at any time, concurrently, without ever waiting on the task itself.
//!
//! The task body is opaque: any [`Task`] that accepts a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) and returns once
//! it is done or cancelled.
//!
//! ## Architecture
//! ```text
//!   start() / stop() / status()          (any thread, any number of callers)
//!            │
//!            ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Supervisor                                                   │
//! │  - Mutex { Status, worker slot, run counter }                 │
//! │  - CancellationToken per run                                  │
//! │  - Bus (broadcast of every transition)                        │
//! └──────┬──────────────────────────────────────────────┬─────────┘
//!        ▼ runtime.spawn (at most one live)             ▼
//! ┌──────────────┐                            ┌────────────────────┐
//! │    worker    │── task.run(child token) ──►│ SubscriberSet      │
//! │ (one run)    │                            │ (LogWriter, ...)   │
//! └──────────────┘                            └────────────────────┘
//! ```
//!
//! ## Lifecycle
//! ```text
//! idle ──start──► starting ──(worker begins)──► running
//! running ──stop──► stopping ──(task body returns)──► stopped
//! running ──(task body returns)──► stopped
//! running/stopping ──(task body fails)──► crashed
//! stopped/crashed ──start──► starting   (no terminal state)
//! ```
//!
//! ## Features
//! | Area              | Description                                                | Key types / traits                  |
//! |-------------------|------------------------------------------------------------|-------------------------------------|
//! | **Supervision**   | Start / stop / status of one task body.                    | [`Supervisor`], [`Status`]          |
//! | **Tasks**         | Define task bodies as trait impls or closures.             | [`Task`], [`TaskFn`], [`TaskRef`]   |
//! | **Events**        | Every transition broadcast with a global sequence number.  | [`Event`], [`EventKind`]            |
//! | **Subscriber API**| Hook into transitions (logging, metrics, alerting).        | [`Subscribe`], [`SubscriberSet`]    |
//! | **Errors**        | Task-body failures and host-facing wait errors.            | [`TaskError`], [`RuntimeError`]     |
//! | **Configuration** | Bus capacity and default shutdown grace.                   | [`SupervisorConfig`]                |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], rendering events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use solovisor::{State, Supervisor, TaskError, TaskFn, TaskRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bot: TaskRef = TaskFn::arc("bot", |ctx: CancellationToken| async move {
//!         while !ctx.is_cancelled() {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!         }
//!         Ok::<(), TaskError>(())
//!     });
//!
//!     let sup = Supervisor::builder(bot).build();
//!     sup.start();
//!     assert!(sup.status().running());
//!
//!     let settled = sup.shutdown(Duration::from_secs(2)).await?;
//!     assert_eq!(settled.state(), State::Stopped);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use core::{State, Status, Supervisor, SupervisorBuilder, SupervisorConfig};
pub use error::{RuntimeError, TaskError};
pub use events::{Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{Task, TaskFn, TaskRef};

// Optional: built-in subscriber writing events as `tracing` records.
// Enabled by default; opt out with `default-features = false`.
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;

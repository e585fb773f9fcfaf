//! Runtime events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor::start`/`stop` and the worker (`core::worker`).
//! - **Consumers**: the subscriber listener spawned by the builder (fans out to
//!   `SubscriberSet`), `Supervisor::subscribe()` and `Supervisor::wait_settled()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};

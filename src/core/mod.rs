//! Runtime core: the lifecycle controller.
//!
//! The public API from this module is [`Supervisor`] (with its builder and
//! config) and the [`Status`] value it reports.
//!
//! Internal modules:
//! - [`supervisor`]: `start` / `stop` / `status` and host-facing waits;
//! - [`worker`]: one run of the task body and its final transition;
//! - [`shared`]: lock-protected state shared by the supervisor and its worker;
//! - [`builder`]: wiring of bus, subscribers and runtime handle.

mod builder;
mod config;
mod shared;
mod status;
mod supervisor;
mod worker;

pub use builder::SupervisorBuilder;
pub use config::SupervisorConfig;
pub use status::{State, Status};
pub use supervisor::Supervisor;

pub(crate) use worker::panic_message;

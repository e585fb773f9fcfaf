//! # Task body abstractions.
//!
//! - [`Task`] - trait for implementing async, cooperatively cancelable task bodies
//! - [`TaskFn`] - closure-backed implementation
//! - [`TaskRef`] - shared reference to a task body (`Arc<dyn Task>`)

mod task;
mod task_fn;

pub use task::{Task, TaskRef};
pub use task_fn::TaskFn;

//! # Supervisor configuration.
//!
//! Provides [`SupervisorConfig`] the handful of knobs a host may tune.
//! None of them change the lifecycle contract; they only size the event bus
//! and bound host-facing waits.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1
//! - `grace = 0s` → `shutdown_default()` requests a stop and returns without waiting

use std::time::Duration;

/// Configuration for a [`Supervisor`](crate::Supervisor).
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `grace`: How long [`Supervisor::shutdown_default`](crate::Supervisor::shutdown_default)
///   waits for the worker to settle after a stop request
#[derive(Clone, Debug)]
pub struct SupervisorConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` events observe
    /// `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Default grace period for [`Supervisor::shutdown_default`](crate::Supervisor::shutdown_default).
    ///
    /// Expiry never aborts the worker; cancellation stays cooperative.
    pub grace: Duration,
}

impl SupervisorConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SupervisorConfig {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `grace = 5s`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            grace: Duration::from_secs(5),
        }
    }
}

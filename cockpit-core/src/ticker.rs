//! Ticker trait definition

use std::time::Duration;

/// A simulation component advanced by a fixed-period timer
///
/// Each component:
/// - Owns its state exclusively
/// - Resets or freezes its state on `start`/`stop`
/// - Advances by exactly one step per `tick` while running
///
/// The host decides when ticks happen, so tests can drive components
/// deterministically without real timers.
pub trait Ticker: Send {
    /// Short name used in logs (e.g. "engine", "radio")
    fn name(&self) -> &str;

    /// How often the host should call `tick`
    fn period(&self) -> Duration;

    /// Enter the running state
    ///
    /// Called when the race starts. Reinitializes per-session state.
    fn start(&mut self);

    /// Leave the running state
    ///
    /// Called when the race stops. Further ticks are no-ops.
    fn stop(&mut self);

    /// Advance one step
    ///
    /// Must be a no-op when the component is not running.
    fn tick(&mut self);

    /// Get whether the component is currently running
    fn is_running(&self) -> bool;
}


//! Presentation hook for consumers of per-tick state.

use super::world::Simulation;

/// Callbacks invoked by [`Simulation::run_ticks`]. Observers get read-only
/// access and cannot feed anything back into the simulation.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called after every completed tick
    fn on_tick_end(&mut self, _sim: &Simulation) {}

    /// Called once after the last tick of a run
    fn on_run_end(&mut self, _sim: &Simulation) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

//! Hooks for watching the simulation from the outside.

use crate::sim::{DropletId, LoopState};

/// Observer for simulation lifecycle events.
///
/// Every method has a no-op default, so implementors only override what they
/// care about. The browser binding uses this to log to the console.
pub trait SimObserver {
    /// The store was (re)seeded with `count` droplets.
    fn on_seed(&mut self, _count: usize) {}

    /// Two droplets were consumed and `created` took their place.
    fn on_merge(&mut self, _consumed: (DropletId, DropletId), _created: DropletId) {}

    /// A stir gathered `gathered` droplets toward the centre.
    fn on_stir(&mut self, _gathered: usize) {}

    fn on_state_change(&mut self, _from: LoopState, _to: LoopState) {}

    fn on_hint_change(&mut self, _visible: bool) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpObserver;

impl SimObserver for NoOpObserver {}

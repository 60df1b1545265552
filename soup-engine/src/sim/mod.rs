// sim/ - Oil droplet simulation
//
// The droplet store, the per-tick physics, click merging and the loop that
// ties them to the host's frame callback.

mod droplet;
mod merge;
mod physics;
mod shape;

pub use droplet::{Droplet, DropletId, DropletStore, Stir};
pub use merge::{Merge, combine, merge_at};
pub use physics::{StepReport, step};
pub use shape::generate as generate_shape;

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::SimConfig;
use crate::error::Result;
use crate::observer::{NoOpObserver, SimObserver};
use crate::render::{Renderer, Surface};
use crate::world::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Input from the host, applied at the start of the next tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    PointerMove { x: f32, y: f32 },
    PointerLeave,
    Click { x: f32, y: f32 },
    Stir,
}

/// Frame-driven driver for one droplet session.
///
/// `Idle -> Running` on `start`, back to `Idle` on `stop`. Every start builds
/// a fresh store; nothing carries over between sessions. Host input is queued
/// and drained once per tick, before physics runs.
pub struct SimulationLoop<O: SimObserver = NoOpObserver> {
    state: LoopState,
    config: SimConfig,
    store: DropletStore,
    renderer: Renderer,
    queue: VecDeque<Command>,
    pointer: Option<(f32, f32)>,
    playing: bool,
    hint: bool,
    frames: u64,
    rng: SmallRng,
    observer: O,
}

impl SimulationLoop<NoOpObserver> {
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_observer(config, seed, NoOpObserver)
    }
}

impl<O: SimObserver> SimulationLoop<O> {
    pub fn with_observer(config: SimConfig, seed: u64, observer: O) -> Self {
        Self {
            state: LoopState::Idle,
            renderer: Renderer::new(&config),
            config,
            store: DropletStore::new(),
            queue: VecDeque::new(),
            pointer: None,
            playing: false,
            hint: false,
            frames: 0,
            rng: SmallRng::seed_from_u64(seed),
            observer,
        }
    }

    // ---- Lifecycle ----

    /// Begin a fresh session seeded for `viewport`. Restarts if already running.
    pub fn start(&mut self, viewport: Viewport) {
        self.store = DropletStore::new();
        let count = self.store.seed(viewport, &self.config, &mut self.rng);
        self.observer.on_seed(count);

        self.queue.clear();
        self.pointer = None;
        self.frames = 0;
        self.set_hint(false);
        self.transition(LoopState::Running);
    }

    /// Tear the session down. Later input and frames are ignored until `start`.
    pub fn stop(&mut self) {
        if self.state == LoopState::Idle {
            return;
        }
        self.store = DropletStore::new();
        self.queue.clear();
        self.pointer = None;
        self.set_hint(false);
        self.transition(LoopState::Idle);
    }

    /// New wall bounds. Reseeds only when the store is empty.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.state == LoopState::Idle {
            return;
        }
        self.store.set_viewport(viewport);
        if self.store.is_empty() {
            let count = self.store.seed(viewport, &self.config, &mut self.rng);
            self.observer.on_seed(count);
        }
    }

    /// Pointer repulsion and clicks only act while playing.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        if !playing {
            self.pointer = None;
        }
    }

    // ---- Input ----

    /// Queue host input for the next tick. Dropped while idle.
    ///
    /// A stir hides the hint at once; the next tick re-evaluates it.
    pub fn push(&mut self, command: Command) {
        if self.state == LoopState::Idle {
            return;
        }
        if command == Command::Stir {
            self.set_hint(false);
        }
        self.queue.push_back(command);
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::PointerMove { x, y } => {
                if self.playing {
                    self.pointer = Some((x, y));
                }
            }
            Command::PointerLeave => self.pointer = None,
            Command::Click { x, y } => {
                if !self.playing {
                    return;
                }
                if let Some(m) = merge_at(&mut self.store, x, y, &self.config, &mut self.rng) {
                    self.observer.on_merge(m.consumed, m.created);
                }
            }
            Command::Stir => {
                let center = self.store.viewport().center();
                match self.store.scatter_or_gather(center, &self.config, &mut self.rng) {
                    Stir::Reseeded(count) => self.observer.on_seed(count),
                    Stir::Gathered(count) => self.observer.on_stir(count),
                }
                self.set_hint(false);
            }
        }
    }

    // ---- Ticking ----

    /// Drain queued input and advance physics one tick. `None` while idle.
    pub fn tick(&mut self) -> Option<StepReport> {
        if self.state == LoopState::Idle {
            return None;
        }
        while let Some(command) = self.queue.pop_front() {
            self.apply(command);
        }

        let pointer = if self.playing { self.pointer } else { None };
        let report = step(&mut self.store, pointer, &self.config, &mut self.rng);
        self.set_hint(report.show_hint());
        self.frames += 1;
        Some(report)
    }

    /// One display frame: a full tick, then drawing.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<Option<StepReport>> {
        let Some(report) = self.tick() else {
            return Ok(None);
        };
        self.renderer.draw(&mut self.store, surface)?;
        Ok(Some(report))
    }

    fn set_hint(&mut self, visible: bool) {
        if self.hint != visible {
            self.hint = visible;
            self.observer.on_hint_change(visible);
        }
    }

    fn transition(&mut self, to: LoopState) {
        let from = self.state;
        self.state = to;
        self.observer.on_state_change(from, to);
    }

    // ---- Accessors ----

    /// Whether the shell should offer the stir affordance.
    pub fn hint_visible(&self) -> bool {
        self.hint
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn store(&self) -> &DropletStore {
        &self.store
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

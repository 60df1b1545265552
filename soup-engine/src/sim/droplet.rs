// droplet.rs - Oil droplets and the store that owns them
//
// The store is the only owner of droplet records. Droplets enter through
// seeding or a merge; nothing else creates or removes them.

use std::f32::consts::TAU;
use std::fmt;

use rand::Rng;

use super::shape;
use crate::config::SimConfig;
use crate::world::Viewport;

/// Stable identity of a droplet. Never reused within a store's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DropletId(u64);

impl DropletId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DropletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Droplet {
    id: DropletId,

    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,

    /// Rendered radius, eased toward `target_radius` each frame.
    pub radius: f32,
    pub target_radius: f32,

    pub color_offset: f32,
    shape_offsets: Vec<f32>,

    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Droplet {
    /// A round, motionless droplet already at its full radius.
    ///
    /// The id is assigned when the droplet enters a store.
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        let radius = radius.max(0.0);
        Self {
            id: DropletId(0),
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius,
            target_radius: radius,
            color_offset: 0.0,
            shape_offsets: Vec::new(),
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn with_shape(mut self, offsets: Vec<f32>) -> Self {
        self.shape_offsets = offsets;
        self
    }

    /// Start from `radius` and grow (or shrink) toward `target`.
    pub fn easing(mut self, radius: f32, target: f32) -> Self {
        self.radius = radius.max(0.0);
        self.target_radius = target.max(0.0);
        self
    }

    /// Fresh droplet at a random spot, starting at radius 0 so it grows in.
    fn seeded<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, config: &SimConfig) -> Self {
        let speed = config.initial_speed;
        let spin = config.rotation_speed;
        Self {
            id: DropletId(0),
            x: rng.gen_range(0.0..viewport.width),
            y: rng.gen_range(0.0..viewport.height),
            vx: sym_range(rng, speed),
            vy: sym_range(rng, speed),
            radius: 0.0,
            target_radius: rng.gen_range(config.seed_radius_min..=config.seed_radius_max),
            color_offset: if config.color_offset_max > 0.0 {
                rng.gen_range(0.0..config.color_offset_max)
            } else {
                0.0
            },
            shape_offsets: shape::generate(rng, config),
            rotation: rng.gen_range(0.0..TAU),
            rotation_speed: sym_range(rng, spin),
        }
    }

    pub fn id(&self) -> DropletId {
        self.id
    }

    /// Outline multipliers; empty means a perfect circle.
    pub fn shape_offsets(&self) -> &[f32] {
        &self.shape_offsets
    }

    pub fn is_round(&self) -> bool {
        self.shape_offsets.is_empty()
    }

    /// Area-derived mass used for collision response.
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius * self.radius
    }

    #[inline]
    pub fn distance_sq_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Uniform in `[-half, half]`; zero when the range is degenerate.
pub(crate) fn sym_range<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 { rng.gen_range(-half..=half) } else { 0.0 }
}

/// Result of a stir.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stir {
    /// One droplet or fewer remained, so the scene was seeded afresh.
    Reseeded(usize),
    /// Every droplet received an impulse toward the centre.
    Gathered(usize),
}

#[derive(Debug, Default)]
pub struct DropletStore {
    droplets: Vec<Droplet>,
    viewport: Viewport,
    next_id: u64,
}

impl DropletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from prepared droplets. Each receives a fresh id.
    pub fn with_droplets(viewport: Viewport, droplets: impl IntoIterator<Item = Droplet>) -> Self {
        let mut store = Self { viewport, ..Self::default() };
        for d in droplets {
            store.push(d);
        }
        store
    }

    fn push(&mut self, mut droplet: Droplet) -> DropletId {
        self.next_id += 1;
        let id = DropletId(self.next_id);
        droplet.id = id;
        self.droplets.push(droplet);
        id
    }

    /// Clear the store and seed one droplet per `seed_density` units of area.
    ///
    /// Ids keep counting up across reseeds.
    pub fn seed<R: Rng + ?Sized>(&mut self, viewport: Viewport, config: &SimConfig, rng: &mut R) -> usize {
        self.viewport = viewport;
        self.droplets.clear();

        let count = viewport.seed_count(config.seed_density);
        self.droplets.reserve(count);
        for _ in 0..count {
            let d = Droplet::seeded(rng, viewport, config);
            self.push(d);
        }
        count
    }

    /// Reseed when one droplet or fewer remain, otherwise push every droplet
    /// toward `center`.
    pub fn scatter_or_gather<R: Rng + ?Sized>(
        &mut self,
        center: (f32, f32),
        config: &SimConfig,
        rng: &mut R,
    ) -> Stir {
        if self.droplets.len() <= 1 {
            let count = self.seed(self.viewport, config, rng);
            return Stir::Reseeded(count);
        }

        let (cx, cy) = center;
        for d in self.droplets.iter_mut() {
            let dx = cx - d.x;
            let dy = cy - d.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > 0.0 {
                let speed = config.gather_impulse + rng.gen_range(0.0..=config.gather_jitter);
                d.vx += dx / dist * speed;
                d.vy += dy / dist * speed;
            }
        }
        Stir::Gathered(self.droplets.len())
    }

    /// Remove `a` and `b` and insert `new` in one step.
    ///
    /// No-op unless both ids are present and distinct. Returns the id
    /// assigned to the inserted droplet.
    pub fn replace(&mut self, a: DropletId, b: DropletId, new: Droplet) -> Option<DropletId> {
        if a == b || !self.contains(a) || !self.contains(b) {
            return None;
        }
        self.droplets.retain(|d| d.id != a && d.id != b);
        Some(self.push(new))
    }

    pub fn contains(&self, id: DropletId) -> bool {
        self.droplets.iter().any(|d| d.id == id)
    }

    pub fn get(&self, id: DropletId) -> Option<&Droplet> {
        self.droplets.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DropletId) -> Option<&mut Droplet> {
        self.droplets.iter_mut().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.droplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.droplets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Droplet> {
        self.droplets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Droplet> {
        self.droplets.iter_mut()
    }

    pub fn as_slice(&self) -> &[Droplet] {
        &self.droplets
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Droplet] {
        &mut self.droplets
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

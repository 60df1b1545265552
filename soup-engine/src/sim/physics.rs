// physics.rs - One simulation tick
//
// Per droplet: drift, pointer repulsion, damping, integration, walls.
// Then a soft pairwise overlap response, weighted by area-derived mass.

use rand::Rng;

use super::droplet::{Droplet, DropletStore, sym_range};
use crate::config::SimConfig;
use crate::world::{Viewport, clamp_axis};

/// What a tick observed about the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Some droplet outgrew `giant_fraction` of the shorter viewport side.
    pub has_giant: bool,
    /// Number of pairs within merging reach of each other.
    pub close_pairs: usize,
    /// Number of overlapping pairs that received a correction.
    pub resolved_pairs: usize,
}

impl StepReport {
    /// Nothing is worth clicking: either one droplet dominates or none are close.
    pub fn show_hint(&self) -> bool {
        self.has_giant || self.close_pairs == 0
    }
}

/// Advance every droplet by one tick.
///
/// `pointer` is the repelling pointer position, or `None` when repulsion is
/// inactive (not playing, or the pointer left the surface).
pub fn step<R: Rng + ?Sized>(
    store: &mut DropletStore,
    pointer: Option<(f32, f32)>,
    config: &SimConfig,
    rng: &mut R,
) -> StepReport {
    let viewport = store.viewport();
    let droplets = store.as_mut_slice();

    for d in droplets.iter_mut() {
        // Brownian drift
        d.vx += sym_range(rng, config.drift);
        d.vy += sym_range(rng, config.drift);

        if let Some(p) = pointer {
            repel(d, p, config);
        }

        d.vx *= config.damping;
        d.vy *= config.damping;
        if let Some(cap) = config.max_speed {
            limit_speed(d, cap);
        }

        d.x += d.vx;
        d.y += d.vy;

        contain(d, viewport, config.wall_restitution);
    }

    let mut report = StepReport::default();
    let n = droplets.len();
    for i in 0..n {
        let (head, tail) = droplets.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            match collide(a, b, config) {
                Contact::Apart => {}
                Contact::Close => report.close_pairs += 1,
                Contact::Resolved => {
                    report.close_pairs += 1;
                    report.resolved_pairs += 1;
                }
            }
        }
    }

    // Corrections may have pushed droplets through a wall.
    let giant = viewport.min_side() * config.giant_fraction;
    for d in droplets.iter_mut() {
        contain(d, viewport, config.wall_restitution);
        if d.radius > giant {
            report.has_giant = true;
        }
    }

    report
}

/// Push away from the pointer, strongest at its centre and fading to zero at
/// `repulsion_radius + radius`.
fn repel(d: &mut Droplet, (px, py): (f32, f32), config: &SimConfig) {
    let dx = d.x - px;
    let dy = d.y - py;
    let dist_sq = dx * dx + dy * dy;
    let reach = config.repulsion_radius + d.radius;
    if dist_sq >= reach * reach {
        return;
    }
    let dist = dist_sq.sqrt();
    if dist > 0.0 {
        let force = (1.0 - dist / reach) * config.repulsion_force;
        d.vx += dx / dist * force;
        d.vy += dy / dist * force;
    }
}

fn limit_speed(d: &mut Droplet, cap: f32) {
    let speed_sq = d.vx * d.vx + d.vy * d.vy;
    if speed_sq > cap * cap {
        let scale = cap / speed_sq.sqrt();
        d.vx *= scale;
        d.vy *= scale;
    }
}

#[inline]
fn contain(d: &mut Droplet, viewport: Viewport, restitution: f32) {
    clamp_axis(&mut d.x, &mut d.vx, d.radius, viewport.width, restitution);
    clamp_axis(&mut d.y, &mut d.vy, d.radius, viewport.height, restitution);
}

enum Contact {
    Apart,
    Close,
    Resolved,
}

fn collide(a: &mut Droplet, b: &mut Droplet, config: &SimConfig) -> Contact {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dist_sq = dx * dx + dy * dy;
    let min_dist = a.radius + b.radius;

    let reach = min_dist + config.proximity_margin;
    if dist_sq >= reach * reach {
        return Contact::Apart;
    }
    if dist_sq >= min_dist * min_dist {
        return Contact::Close;
    }

    let dist = dist_sq.sqrt();
    let total_mass = a.mass() + b.mass();
    // Coincident centres have no normal; drift separates them next tick.
    if dist == 0.0 || total_mass <= 0.0 {
        return Contact::Close;
    }

    let overlap = min_dist - dist;
    let push = overlap * config.collision_response;
    let nx = dx / dist;
    let ny = dy / dist;

    // The heavier droplet takes the smaller share.
    let share_a = b.mass() / total_mass;
    let share_b = a.mass() / total_mass;

    a.vx -= nx * push * share_a;
    a.vy -= ny * push * share_a;
    b.vx += nx * push * share_b;
    b.vy += ny * push * share_b;

    a.x -= nx * push * share_a;
    a.y -= ny * push * share_a;
    b.x += nx * push * share_b;
    b.y += ny * push * share_b;

    Contact::Resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repulsion_fades_with_distance() {
        let config = SimConfig::default();
        let mut near = Droplet::new(110.0, 100.0, 10.0);
        let mut far = Droplet::new(170.0, 100.0, 10.0);
        repel(&mut near, (100.0, 100.0), &config);
        repel(&mut far, (100.0, 100.0), &config);
        assert!(near.vx > far.vx, "near {} far {}", near.vx, far.vx);
        assert!(far.vx > 0.0);
        assert_eq!(near.vy, 0.0);

        let mut outside = Droplet::new(200.0, 100.0, 10.0);
        repel(&mut outside, (100.0, 100.0), &config);
        assert_eq!(outside.vx, 0.0);
    }

    #[test]
    fn speed_cap_preserves_direction() {
        let mut d = Droplet::new(0.0, 0.0, 1.0).with_velocity(30.0, 40.0);
        limit_speed(&mut d, 5.0);
        assert!((d.vx - 3.0).abs() < 1e-5);
        assert!((d.vy - 4.0).abs() < 1e-5);
    }

    #[test]
    fn coincident_centres_are_skipped() {
        let config = SimConfig::default();
        let mut a = Droplet::new(50.0, 50.0, 10.0);
        let mut b = Droplet::new(50.0, 50.0, 10.0);
        assert!(matches!(collide(&mut a, &mut b, &config), Contact::Close));
        assert_eq!((a.x, a.y, a.vx), (50.0, 50.0, 0.0));
        assert!(b.vx.is_finite() && b.vy.is_finite());
    }
}

// merge.rs - Click-to-merge
//
// A click merges the two droplets nearest to it, provided both lie within
// the click tolerance and they actually touch (within the merge factor).

use rand::Rng;

use super::droplet::{Droplet, DropletId, DropletStore, sym_range};
use super::shape;
use crate::config::SimConfig;

/// A successful merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merge {
    pub consumed: (DropletId, DropletId),
    pub created: DropletId,
}

/// Merge the pair nearest to the click at `(x, y)`, if any qualifies.
pub fn merge_at<R: Rng + ?Sized>(
    store: &mut DropletStore,
    x: f32,
    y: f32,
    config: &SimConfig,
    rng: &mut R,
) -> Option<Merge> {
    let (first, second) = nearest_pair(store, x, y, config.merge_tolerance)?;
    let d1 = &store.as_slice()[first];
    let d2 = &store.as_slice()[second];

    let dx = d1.x - d2.x;
    let dy = d1.y - d2.y;
    let reach = (d1.radius + d2.radius) * config.merge_distance_factor;
    if dx * dx + dy * dy >= reach * reach {
        return None;
    }

    let consumed = (d1.id(), d2.id());
    let combined = combine(d1, d2, config, rng);
    let created = store.replace(consumed.0, consumed.1, combined)?;
    Some(Merge { consumed, created })
}

/// Indices of the two droplets nearest the click among those within
/// `radius + tolerance` of it. Ties keep store order.
fn nearest_pair(store: &DropletStore, x: f32, y: f32, tolerance: f32) -> Option<(usize, usize)> {
    let mut nearby: Vec<(usize, f32)> = store
        .iter()
        .enumerate()
        .filter_map(|(i, d)| {
            let dist_sq = d.distance_sq_to(x, y);
            let band = d.radius + tolerance;
            (dist_sq < band * band).then_some((i, dist_sq))
        })
        .collect();

    if nearby.len() < 2 {
        return None;
    }
    nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
    Some((nearby[0].0, nearby[1].0))
}

/// One droplet with the combined area of `d1` and `d2`.
///
/// It starts at `d1`'s radius and eases to the combined one, sits at the
/// radius-weighted centroid and moves with the mean velocity.
pub fn combine<R: Rng + ?Sized>(d1: &Droplet, d2: &Droplet, config: &SimConfig, rng: &mut R) -> Droplet {
    let target = (d1.radius * d1.radius + d2.radius * d2.radius).sqrt();

    let weight = d1.radius + d2.radius;
    let (cx, cy) = if weight > 0.0 {
        (
            (d1.x * d1.radius + d2.x * d2.radius) / weight,
            (d1.y * d1.radius + d2.y * d2.radius) / weight,
        )
    } else {
        ((d1.x + d2.x) * 0.5, (d1.y + d2.y) * 0.5)
    };

    let mut merged = Droplet::new(cx, cy, target)
        .easing(d1.radius, target)
        .with_velocity((d1.vx + d2.vx) * 0.5, (d1.vy + d2.vy) * 0.5)
        .with_shape(shape::generate(rng, config));
    merged.color_offset = d1.color_offset;
    merged.rotation_speed = sym_range(rng, config.rotation_speed);
    merged
}

// shape.rs - Organic outline generation
//
// An outline is a list of radius multipliers at equal angular spacing.
// An empty list means a perfect circle.

use rand::Rng;

use crate::config::SimConfig;

/// Roll a new outline: empty (round) with `round_probability`, otherwise
/// `outline_points` independent multipliers in `[outline_min, outline_max]`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &SimConfig) -> Vec<f32> {
    if rng.gen_bool(config.round_probability as f64) {
        return Vec::new();
    }
    (0..config.outline_points)
        .map(|_| rng.gen_range(config.outline_min..=config.outline_max))
        .collect()
}

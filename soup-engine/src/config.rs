// config.rs - Tunable simulation constants
//
// Defaults reproduce the reference look. A host may override any subset by
// passing a JSON object; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SoupError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Viewport area per seeded droplet.
    pub seed_density: f32,
    /// Target radius range for seeded droplets.
    pub seed_radius_min: f32,
    pub seed_radius_max: f32,
    /// Seeded velocity components are drawn from [-initial_speed, initial_speed].
    pub initial_speed: f32,
    /// Colour offset range upper bound, [0, color_offset_max).
    pub color_offset_max: f32,

    // Outline
    pub round_probability: f32,
    pub outline_points: usize,
    pub outline_min: f32,
    pub outline_max: f32,
    /// Rotation speed is drawn from [-rotation_speed, rotation_speed].
    pub rotation_speed: f32,

    // Physics
    pub drift: f32,
    pub damping: f32,
    pub wall_restitution: f32,
    pub repulsion_radius: f32,
    pub repulsion_force: f32,
    pub proximity_margin: f32,
    pub collision_response: f32,
    pub giant_fraction: f32,
    /// Optional cap on speed per tick. `None` leaves damping as the only limit.
    pub max_speed: Option<f32>,

    // Stir
    pub gather_impulse: f32,
    pub gather_jitter: f32,

    // Merge
    pub merge_tolerance: f32,
    pub merge_distance_factor: f32,

    // Render
    pub radius_easing: f32,
    pub settle_band: f32,
    pub visibility_threshold: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed_density: 9000.0,
            seed_radius_min: 15.0,
            seed_radius_max: 50.0,
            initial_speed: 0.1,
            color_offset_max: 0.2,

            round_probability: 0.8,
            outline_points: 8,
            outline_min: 0.85,
            outline_max: 1.15,
            rotation_speed: 0.01,

            drift: 0.01,
            damping: 0.96,
            wall_restitution: 0.5,
            repulsion_radius: 75.0,
            repulsion_force: 0.005,
            proximity_margin: 10.0,
            collision_response: 0.08,
            giant_fraction: 0.25,
            max_speed: None,

            gather_impulse: 10.0,
            gather_jitter: 5.0,

            merge_tolerance: 60.0,
            merge_distance_factor: 1.2,

            radius_easing: 0.1,
            settle_band: 0.1,
            visibility_threshold: 1.0,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON object over the defaults and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check("seed_density", self.seed_density, 1.0, f32::MAX)?;
        check("seed_radius_min", self.seed_radius_min, 0.0, self.seed_radius_max)?;
        check("seed_radius_max", self.seed_radius_max, self.seed_radius_min, f32::MAX)?;
        check("initial_speed", self.initial_speed, 0.0, f32::MAX)?;
        check("color_offset_max", self.color_offset_max, 0.0, 1.0)?;
        check("round_probability", self.round_probability, 0.0, 1.0)?;
        check("outline_points", self.outline_points as f32, 3.0, 64.0)?;
        check("outline_min", self.outline_min, f32::MIN_POSITIVE, self.outline_max)?;
        check("outline_max", self.outline_max, self.outline_min, f32::MAX)?;
        check("rotation_speed", self.rotation_speed, 0.0, f32::MAX)?;
        check("drift", self.drift, 0.0, f32::MAX)?;
        check("damping", self.damping, 0.0, 1.0)?;
        check("wall_restitution", self.wall_restitution, 0.0, 1.0)?;
        check("repulsion_radius", self.repulsion_radius, 0.0, f32::MAX)?;
        check("repulsion_force", self.repulsion_force, 0.0, f32::MAX)?;
        check("proximity_margin", self.proximity_margin, 0.0, f32::MAX)?;
        check("collision_response", self.collision_response, 0.0, 1.0)?;
        check("giant_fraction", self.giant_fraction, 0.0, 1.0)?;
        if let Some(cap) = self.max_speed {
            check("max_speed", cap, f32::MIN_POSITIVE, f32::MAX)?;
        }
        check("gather_impulse", self.gather_impulse, 0.0, f32::MAX)?;
        check("gather_jitter", self.gather_jitter, 0.0, f32::MAX)?;
        check("merge_tolerance", self.merge_tolerance, 0.0, f32::MAX)?;
        check("merge_distance_factor", self.merge_distance_factor, 0.0, f32::MAX)?;
        check("radius_easing", self.radius_easing, f32::MIN_POSITIVE, 1.0)?;
        check("settle_band", self.settle_band, 0.0, f32::MAX)?;
        check("visibility_threshold", self.visibility_threshold, 0.0, f32::MAX)?;
        Ok(())
    }
}

fn check(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    // NaN fails both comparisons and is rejected here too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(SoupError::OutOfRange { field, min, max, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "damping": 0.9 }"#).unwrap();
        assert_eq!(config.damping, 0.9);
        assert_eq!(config.seed_density, 9000.0);
        assert_eq!(config.merge_distance_factor, 1.2);
    }

    #[test]
    fn rejects_out_of_range_damping() {
        let err = SimConfig::from_json(r#"{ "damping": 1.5 }"#).unwrap_err();
        assert!(matches!(err, SoupError::OutOfRange { field: "damping", .. }), "got {err}");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SimConfig::from_json("{ damping: }").unwrap_err();
        assert!(matches!(err, SoupError::ConfigParse(_)));
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let config = SimConfig { seed_radius_min: 60.0, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }
}

// bounds.rs - Container bounds, wall clamping and seed counts

/// Viewport size in the host's pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite sizes hold no droplets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Number of droplets to seed: one per `density` units of area.
    pub fn seed_count(&self, density: f32) -> usize {
        if self.is_empty() || density <= 0.0 {
            return 0;
        }
        // f64 keeps large viewports exact before flooring.
        ((self.width as f64 * self.height as f64) / density as f64).floor() as usize
    }
}

/// Clamp one axis to `[radius, extent - radius]`.
///
/// On contact the velocity component is reflected and scaled by
/// `restitution`. Returns true if the wall was hit.
#[inline]
pub fn clamp_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32, restitution: f32) -> bool {
    let mut hit = false;
    if *pos < radius {
        *pos = radius;
        *vel *= -restitution;
        hit = true;
    }
    if *pos > extent - radius {
        *pos = extent - radius;
        *vel *= -restitution;
        hit = true;
    }
    hit
}

// render.rs - Draw droplets onto a surface
//
// The renderer owns the per-frame interpolation of radius and rotation and
// emits drawing calls through the `Surface` trait. Canvas output lives in
// `canvas.rs`; `Recorder` captures calls for inspection.

use std::f32::consts::{FRAC_PI_4, TAU};

use crate::config::SimConfig;
use crate::error::Result;
use crate::scene::{BROTH, HIGHLIGHT, HIGHLIGHT_FADE, OIL_FILL, OIL_STROKE, RIM_WIDTH, Rgba};
use crate::sim::{Droplet, DropletStore};
use crate::world::Viewport;

const HIGHLIGHT_SHIFT: f32 = 0.3;
const HIGHLIGHT_SIZE: f32 = 0.25;
const HIGHLIGHT_ASPECT: f32 = 0.7;
/// Fill alpha gained per unit of colour offset.
const OFFSET_ALPHA: f32 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub line_width: f32,
}

/// Quadratic segment from the current point to `to`, bending toward `control`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadTo {
    pub control: Point,
    pub to: Point,
}

/// Closed path made of quadratic segments, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePath {
    pub start: Point,
    pub segments: Vec<QuadTo>,
}

/// Elliptical glint filled with a radial gradient from `inner` at the centre
/// to `outer` at `radius_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    pub center: Point,
    pub radius_x: f32,
    pub radius_y: f32,
    pub angle: f32,
    pub inner: Rgba,
    pub outer: Rgba,
}

/// Minimal drawing surface.
pub trait Surface {
    fn clear(&mut self, viewport: Viewport, background: Rgba) -> Result<()>;
    fn draw_circle(&mut self, center: Point, radius: f32, style: &BlobStyle) -> Result<()>;
    fn draw_closed_curve(&mut self, path: &CurvePath, style: &BlobStyle) -> Result<()>;
    fn draw_radial_highlight(&mut self, highlight: &Highlight) -> Result<()>;
}

pub struct Renderer {
    easing: f32,
    settle_band: f32,
    visibility_threshold: f32,
}

impl Renderer {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            easing: config.radius_easing,
            settle_band: config.settle_band,
            visibility_threshold: config.visibility_threshold,
        }
    }

    /// Clear the surface and draw every visible droplet.
    ///
    /// Eases each radius toward its target and advances rotation; those are
    /// the only fields touched. Returns the number of droplets drawn.
    pub fn draw<S: Surface + ?Sized>(&self, store: &mut DropletStore, surface: &mut S) -> Result<usize> {
        surface.clear(store.viewport(), BROTH)?;

        let mut drawn = 0;
        for d in store.iter_mut() {
            self.ease(d);
            if d.radius <= self.visibility_threshold {
                continue;
            }
            d.rotation += d.rotation_speed;

            let style = style_for(d);
            if d.is_round() {
                surface.draw_circle(Point::new(d.x, d.y), d.radius, &style)?;
            } else {
                surface.draw_closed_curve(&outline(d), &style)?;
            }
            surface.draw_radial_highlight(&highlight(d))?;
            drawn += 1;
        }
        Ok(drawn)
    }

    fn ease(&self, d: &mut Droplet) {
        let gap = d.target_radius - d.radius;
        if gap.abs() > self.settle_band {
            d.radius = (d.radius + gap * self.easing).max(0.0);
        }
    }
}

fn style_for(d: &Droplet) -> BlobStyle {
    BlobStyle {
        fill: OIL_FILL.with_alpha(OIL_FILL.a + d.color_offset * OFFSET_ALPHA),
        stroke: OIL_STROKE,
        line_width: RIM_WIDTH,
    }
}

/// Smooth closed outline through the droplet's control points.
///
/// One control point per offset at equal angular spacing, rotated by the
/// droplet's rotation. The path runs between consecutive midpoints, bending
/// through each control point.
pub fn outline(d: &Droplet) -> CurvePath {
    let offsets = d.shape_offsets();
    let n = offsets.len();
    let points: Vec<Point> = offsets
        .iter()
        .enumerate()
        .map(|(i, &k)| {
            let angle = TAU * i as f32 / n as f32 + d.rotation;
            let r = d.radius * k;
            Point::new(d.x + angle.cos() * r, d.y + angle.sin() * r)
        })
        .collect();

    let Some(&last) = points.last() else {
        return CurvePath { start: Point::new(d.x, d.y), segments: Vec::new() };
    };

    let segments = (0..n)
        .map(|i| {
            let p = points[i];
            QuadTo { control: p, to: p.midpoint(points[(i + 1) % n]) }
        })
        .collect();

    CurvePath { start: last.midpoint(points[0]), segments }
}

/// Glint toward the upper left.
pub fn highlight(d: &Droplet) -> Highlight {
    let r = d.radius;
    let radius_x = r * HIGHLIGHT_SIZE;
    Highlight {
        center: Point::new(d.x - r * HIGHLIGHT_SHIFT, d.y - r * HIGHLIGHT_SHIFT),
        radius_x,
        radius_y: radius_x * HIGHLIGHT_ASPECT,
        angle: FRAC_PI_4,
        inner: HIGHLIGHT,
        outer: HIGHLIGHT_FADE,
    }
}

/// A single recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear { viewport: Viewport, background: Rgba },
    Circle { center: Point, radius: f32, style: BlobStyle },
    Curve { path: CurvePath, style: BlobStyle },
    Highlight(Highlight),
}

/// Surface that records calls instead of drawing them.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. } | DrawOp::Curve { .. }))
            .count()
    }
}

impl Surface for Recorder {
    fn clear(&mut self, viewport: Viewport, background: Rgba) -> Result<()> {
        self.ops.clear();
        self.ops.push(DrawOp::Clear { viewport, background });
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: f32, style: &BlobStyle) -> Result<()> {
        self.ops.push(DrawOp::Circle { center, radius, style: *style });
        Ok(())
    }

    fn draw_closed_curve(&mut self, path: &CurvePath, style: &BlobStyle) -> Result<()> {
        self.ops.push(DrawOp::Curve { path: path.clone(), style: *style });
        Ok(())
    }

    fn draw_radial_highlight(&mut self, highlight: &Highlight) -> Result<()> {
        self.ops.push(DrawOp::Highlight(*highlight));
        Ok(())
    }
}

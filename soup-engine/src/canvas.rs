// canvas.rs - Surface backed by a browser 2D canvas

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{Result, SoupError};
use crate::render::{BlobStyle, CurvePath, Highlight, Point, Surface};
use crate::scene::Rgba;
use crate::world::Viewport;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| SoupError::Canvas("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SoupError::Canvas("context is not a CanvasRenderingContext2d".into()))?;
        Ok(Self { ctx })
    }

    fn paint(&self, style: &BlobStyle) {
        self.ctx.set_fill_style_str(&style.fill.to_string());
        self.ctx.fill();
        self.ctx.set_line_width(style.line_width as f64);
        self.ctx.set_stroke_style_str(&style.stroke.to_string());
        self.ctx.stroke();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport, background: Rgba) -> Result<()> {
        let (w, h) = (viewport.width as f64, viewport.height as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(&background.to_string());
        self.ctx.fill_rect(0.0, 0.0, w, h);
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: f32, style: &BlobStyle) -> Result<()> {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .map_err(js_err)?;
        self.ctx.close_path();
        self.paint(style);
        Ok(())
    }

    fn draw_closed_curve(&mut self, path: &CurvePath, style: &BlobStyle) -> Result<()> {
        self.ctx.begin_path();
        self.ctx.move_to(path.start.x as f64, path.start.y as f64);
        for seg in &path.segments {
            self.ctx.quadratic_curve_to(
                seg.control.x as f64,
                seg.control.y as f64,
                seg.to.x as f64,
                seg.to.y as f64,
            );
        }
        self.ctx.close_path();
        self.paint(style);
        Ok(())
    }

    fn draw_radial_highlight(&mut self, h: &Highlight) -> Result<()> {
        let (x, y) = (h.center.x as f64, h.center.y as f64);
        let gradient = self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, h.radius_x as f64)
            .map_err(js_err)?;
        gradient.add_color_stop(0.0, &h.inner.to_string()).map_err(js_err)?;
        gradient.add_color_stop(1.0, &h.outer.to_string()).map_err(js_err)?;

        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        self.ctx
            .ellipse(x, y, h.radius_x as f64, h.radius_y as f64, h.angle as f64, 0.0, TAU)
            .map_err(js_err)?;
        self.ctx.fill();
        Ok(())
    }
}

fn js_err(err: JsValue) -> SoupError {
    SoupError::Canvas(format!("{err:?}"))
}

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, console};

// ============================================================================
// CHICKEN SOUP - Oil droplets drifting on broth, merged by clicking
// ============================================================================

pub mod canvas;
pub mod config;
pub mod error;
pub mod observer;
pub mod render;
pub mod scene;
pub mod sim;
pub mod world;

pub use canvas::CanvasSurface;
pub use config::SimConfig;
pub use error::SoupError;
pub use observer::{NoOpObserver, SimObserver};
pub use render::{Recorder, Renderer, Surface};
pub use scene::{Language, Texts};
pub use sim::{Command, Droplet, DropletId, DropletStore, LoopState, SimulationLoop, StepReport};
pub use world::Viewport;

/// Logs simulation events to the browser console.
pub struct ConsoleObserver;

impl SimObserver for ConsoleObserver {
    fn on_seed(&mut self, count: usize) {
        console::log_1(&format!("soup: seeded {count} droplets").into());
    }

    fn on_merge(&mut self, consumed: (DropletId, DropletId), created: DropletId) {
        console::log_1(&format!("soup: merged {} + {} -> {}", consumed.0, consumed.1, created).into());
    }

    fn on_stir(&mut self, gathered: usize) {
        console::log_1(&format!("soup: stirred {gathered} droplets").into());
    }

    fn on_state_change(&mut self, from: LoopState, to: LoopState) {
        console::log_1(&format!("soup: {from:?} -> {to:?}").into());
    }
}

/// Browser entry point. The page owns `requestAnimationFrame` and the event
/// listeners and forwards them here; `stop` makes any late calls inert.
#[wasm_bindgen]
pub struct SoupCanvas {
    sim: SimulationLoop<ConsoleObserver>,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl SoupCanvas {
    /// `config` is an optional JSON object overriding `SimConfig` defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: Option<String>) -> Result<SoupCanvas, JsValue> {
        let config = match config {
            Some(json) => SimConfig::from_json(&json).map_err(to_js)?,
            None => SimConfig::default(),
        };
        let surface = CanvasSurface::new(&canvas).map_err(to_js)?;
        let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
        Ok(Self {
            sim: SimulationLoop::with_observer(config, seed, ConsoleObserver),
            surface,
        })
    }

    pub fn start(&mut self, width: f32, height: f32) {
        self.sim.start(Viewport::new(width, height));
    }

    pub fn stop(&mut self) {
        self.sim.stop();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(Viewport::new(width, height));
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.sim.set_playing(playing);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.sim.push(Command::PointerMove { x, y });
    }

    pub fn pointer_leave(&mut self) {
        self.sim.push(Command::PointerLeave);
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.sim.push(Command::Click { x, y });
    }

    pub fn stir(&mut self) {
        self.sim.push(Command::Stir);
    }

    /// Advance and draw one frame. Returns false once stopped.
    pub fn frame(&mut self) -> Result<bool, JsValue> {
        let report = self.sim.frame(&mut self.surface).map_err(to_js)?;
        Ok(report.is_some())
    }

    pub fn hint_visible(&self) -> bool {
        self.sim.hint_visible()
    }

    pub fn droplet_count(&self) -> usize {
        self.sim.store().len()
    }

    pub fn is_running(&self) -> bool {
        self.sim.state() == LoopState::Running
    }
}

/// Shell text for `lang` ("zh" or "en"). `key` is one of `title`,
/// `description`, `start_button` or `scatter_hint`.
#[wasm_bindgen]
pub fn ui_text(lang: &str, key: &str) -> Result<Option<String>, JsValue> {
    let texts = lang.parse::<Language>().map_err(to_js)?.texts();
    let text = match key {
        "title" => texts.title,
        "description" => texts.description,
        "start_button" => texts.start_button,
        "scatter_hint" => texts.scatter_hint,
        _ => return Ok(None),
    };
    Ok(Some(text.to_string()))
}

fn to_js(err: SoupError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

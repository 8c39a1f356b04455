use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub mod config;
pub mod entities;
pub mod math;
pub mod render;
pub mod scene;

use config::SceneConfig;
use render::CanvasRenderer;
use scene::{SceneDirector, SceneSnapshot};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Main scene state exposed to JavaScript
#[wasm_bindgen]
pub struct CelebrationScene {
    director: SceneDirector,
    renderer: CanvasRenderer,
}

#[wasm_bindgen]
impl CelebrationScene {
    /// Create a scene with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<CelebrationScene, JsValue> {
        Self::with_config(canvas, SceneConfig::default())
    }

    /// Create a scene with YAML overrides applied over the defaults
    #[wasm_bindgen]
    pub fn new_with_config(
        canvas: HtmlCanvasElement,
        yaml: &str,
    ) -> Result<CelebrationScene, JsValue> {
        let config =
            SceneConfig::from_yaml(yaml).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::with_config(canvas, config)
    }

    fn with_config(
        canvas: HtmlCanvasElement,
        mut config: SceneConfig,
    ) -> Result<CelebrationScene, JsValue> {
        // Hosts that leave the seed at its sentinel default get a fresh scene
        // per page load; the core itself never reads ambient entropy
        if config.seed == config::DEFAULT_SEED {
            config.seed = js_sys::Date::now() as u64;
        }

        let renderer = CanvasRenderer::new(&canvas, config.canvas_width, config.canvas_height)
            .map_err(|e| JsValue::from_str(&e))?;
        let director =
            SceneDirector::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self { director, renderer })
    }

    /// Fixed-rate driver callback: advance the scene one tick
    #[wasm_bindgen]
    pub fn on_frame_tick(&mut self) {
        self.director.tick();
    }

    /// The activation click; a no-op after the first call
    #[wasm_bindgen]
    pub fn on_activate(&mut self) {
        self.director.activate();
    }

    /// Draw the current state onto the canvas
    #[wasm_bindgen]
    pub fn render_frame(&mut self) {
        self.director.render(&mut self.renderer);
    }

    /// Current phase name: "idle", "ascending", or "revealed"
    #[wasm_bindgen]
    pub fn phase_name(&self) -> String {
        self.director.phase().name().to_string()
    }

    #[wasm_bindgen]
    pub fn is_revealed(&self) -> bool {
        self.director.is_revealed()
    }

    /// Ticks seen since construction
    #[wasm_bindgen]
    pub fn frame_count(&self) -> f64 {
        self.director.frame_count() as f64
    }

    /// Get the current scene state (returns JSON string)
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> String {
        SceneSnapshot::capture(&self.director).to_json()
    }
}

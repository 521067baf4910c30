//! ecoglobe-wasm: WebAssembly bindings for ecoglobe-core
//!
//! The browser renderer fetches the three inputs itself and hands the raw
//! texts to [`Globe::new`]. Everything after that (name resolution, fills,
//! legend, ranking, tooltips, rotation state) is answered from Rust.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { Globe } from 'ecoglobe-wasm';
//!
//! async function main() {
//!   await init();
//!   const [iso, metrics, world] = await Promise.all([
//!     fetch('./data/iso_names.csv').then(r => r.text()),
//!     fetch('./data/OUT/sustainability_index.csv').then(r => r.text()),
//!     fetch('https://unpkg.com/world-atlas@2/countries-110m.json').then(r => r.text()),
//!   ]);
//!   const globe = new Globe(iso, metrics, world);
//!   paths.attr('fill', d => globe.fill(d.properties.name));
//!   console.log(globe.ranking(5));
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - Constructor and serialization failures surface as thrown JS strings.
//! - Objects are returned through `serde-wasm-bindgen`; rotations are plain
//!   `[lambda, phi]` arrays.
use ecoglobe_core::prelude::*;
use ecoglobe_core::Rotation;
use std::result::Result;
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Legend row with its label already formatted.
#[derive(Serialize)]
struct LegendItem {
    color: String,
    label: String,
    lower: f64,
    upper: f64,
}

/// Loaded globe plus the view state the renderer drives.
#[wasm_bindgen]
pub struct Globe {
    inner: Choropleth,
    view: ViewState,
}

#[wasm_bindgen]
impl Globe {
    /// Parses the ISO name table, the metrics table and the world
    /// TopoJSON (object `countries`).
    #[wasm_bindgen(constructor)]
    pub fn new(iso_csv: &str, metrics_csv: &str, world_json: &str) -> Result<Globe, JsValue> {
        let config = GlobeConfig::default();
        let inputs =
            Inputs::from_texts(iso_csv, metrics_csv, world_json, &config.geometry_object).map_err(js_err)?;
        let inner = Choropleth::assemble(
            inputs,
            AliasTable::builtin().clone(),
            config.palette,
            config.unknown_color,
        );

        let stats = inner.stats();
        log(&format!(
            "✓ Loaded {} features ({} mapped), {} metric rows",
            stats.features, stats.mapped_features, stats.metric_rows
        ));

        Ok(Globe {
            inner,
            view: ViewState::new(config.mode),
        })
    }

    /// Switches between `"eco"` and `"sustain"`.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: ScoreMode = mode.parse().map_err(js_err)?;
        self.view.set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.view.mode.to_string()
    }

    /// Fill color (`#RRGGBB`) for a feature name in the current mode.
    pub fn fill(&self, name: &str) -> String {
        let mode = self.view.mode;
        let score = self
            .inner
            .resolver()
            .resolve_name(name)
            .and_then(|code| self.inner.record(code))
            .and_then(|r| r.score_for(mode));
        self.inner.scale(mode).color_for(score).to_string()
    }

    /// ISO alpha-3 code for a name, `undefined` when it does not resolve.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.inner.resolver().resolve_name(name).map(str::to_owned)
    }

    pub fn legend(&self) -> Result<JsValue, JsValue> {
        let items: Vec<LegendItem> = self
            .inner
            .legend(self.view.mode)
            .into_iter()
            .map(|e| LegendItem {
                color: e.color.to_string(),
                label: e.label(),
                lower: e.lower,
                upper: e.upper,
            })
            .collect();
        to_value(&items).map_err(JsValue::from)
    }

    pub fn ranking(&self, n: usize) -> Result<JsValue, JsValue> {
        to_value(&self.inner.ranking(self.view.mode, n)).map_err(JsValue::from)
    }

    /// Hover card for a feature name.
    pub fn tooltip(&self, name: &str) -> Result<JsValue, JsValue> {
        let view = match self.inner.feature_named(name) {
            Some(feature) => self.inner.tooltip(feature, self.view.mode),
            None => self
                .inner
                .tooltip(&GeometryFeature::named(name), self.view.mode),
        };
        to_value(&view).map_err(JsValue::from)
    }

    /// Rotates toward `code`'s centroid; `undefined` for an unknown code.
    pub fn focus(&mut self, code: &str) -> Option<js_sys::Array> {
        let code = code.trim().to_ascii_uppercase();
        self.view.focus(&self.inner, &code).map(rotation_array)
    }

    #[wasm_bindgen(getter)]
    pub fn focused(&self) -> Option<String> {
        self.view.focused.clone()
    }

    /// Pointer drag in pixels.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.view.drag(dx, dy);
    }

    pub fn rotation(&self) -> js_sys::Array {
        rotation_array(self.view.rotation)
    }

    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.stats()).map_err(JsValue::from)
    }

    /// Every feature's fill as a JSON string, for bulk painting.
    #[wasm_bindgen(js_name = fillsJson)]
    pub fn fills_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.fills(self.view.mode)).map_err(js_err)
    }
}

fn rotation_array(r: Rotation) -> js_sys::Array {
    js_sys::Array::of2(&JsValue::from_f64(r.lambda), &JsValue::from_f64(r.phi))
}

use js_sys::JSON;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use kelpie_replay_core::{parse_scenario_json, Config, Engine, Inputs, Outputs, Scenario};

#[wasm_bindgen]
pub struct KelpieReplay {
    core: Engine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

#[wasm_bindgen]
impl KelpieReplay {
    /// Create a new engine instance. `scenario` is a JSON scenario object or
    /// undefined/null for the compiled-in walkthrough; `config` is a JSON
    /// config object or undefined/null for defaults.
    /// Example:
    ///   new KelpieReplay(undefined, { default_speed_ms: 500 })
    #[wasm_bindgen(constructor)]
    pub fn new(scenario: JsValue, config: JsValue) -> Result<KelpieReplay, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        let scenario_rs: Scenario = if jsvalue_is_undefined_or_null(&scenario) {
            kelpie_replay_core::demo::exploit_walkthrough()
        } else {
            // Stringify the JS object so we can reuse the core parser (expects &str)
            let s = JSON::stringify(&scenario)
                .map_err(|e| JsError::new(&format!("scenario stringify error: {:?}", e)))?
                .as_string()
                .ok_or_else(|| JsError::new("scenario: stringify produced non-string"))?;
            parse_scenario_json(&s)
                .map_err(|e| JsError::new(&format!("scenario parse error: {e}")))?
        };

        Ok(KelpieReplay {
            core: Engine::new(scenario_rs, cfg)
                .map_err(|e| JsError::new(&format!("engine error: {e}")))?,
        })
    }

    /// Step the engine by dt (milliseconds) with inputs JSON. Returns Outputs JSON
    /// ({ commands, events }).
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f32, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json)
                .map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let out: &Outputs = self.core.update(dt_ms, inputs);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Read-only playback state snapshot ({ current_step, mode, speed_ms }).
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.core.state()).map_err(|e| JsError::new(&format!("state error: {e}")))
    }

    /// Number of steps revealed so far.
    #[wasm_bindgen(js_name = current_step)]
    pub fn current_step(&self) -> u32 {
        self.core.current_step() as u32
    }

    /// Total step count of the loaded scenario.
    #[wasm_bindgen(js_name = step_count)]
    pub fn step_count(&self) -> u32 {
        self.core.step_count() as u32
    }

    /// Current mode as a lowercase string ("idle" | "playing" | "complete").
    #[wasm_bindgen]
    pub fn mode(&self) -> String {
        self.core.mode().name().to_string()
    }

    /// Current auto-play interval in milliseconds.
    #[wasm_bindgen(js_name = speed_ms)]
    pub fn speed_ms(&self) -> u32 {
        self.core.speed_ms()
    }

    /// Fraction of the scenario revealed, 0.0..=1.0.
    #[wasm_bindgen]
    pub fn progress(&self) -> f32 {
        self.core.progress()
    }

    /// The loaded scenario as JSON (name, nodes, steps).
    #[wasm_bindgen]
    pub fn scenario(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.core.scenario())
            .map_err(|e| JsError::new(&format!("scenario error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

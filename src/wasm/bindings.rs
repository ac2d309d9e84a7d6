//! JavaScript bindings for the WOOT text replica
//!
//! Operations, effects and snapshots cross the boundary as JSON strings.

use super::utils::to_js_error;
use crate::crdt::woot::{Effect, WootText};
use crate::protocol::{decode_operation, encode_effects};
use wasm_bindgen::prelude::*;

/// JavaScript-friendly wrapper for WootText
#[wasm_bindgen]
pub struct WasmWootText {
    inner: WootText,
}

#[wasm_bindgen]
impl WasmWootText {
    /// Create an empty document owned by `site`
    #[wasm_bindgen(constructor)]
    pub fn new(site: String) -> Self {
        Self {
            inner: WootText::new(site),
        }
    }

    /// Get the site ID
    #[wasm_bindgen(js_name = getSite)]
    pub fn get_site(&self) -> String {
        self.inner.site().to_string()
    }

    /// Insert text at a visible index
    ///
    /// Returns the emitted effects as a JSON array string
    #[wasm_bindgen(js_name = insert)]
    pub fn insert(&mut self, position: usize, text: String) -> Result<String, JsValue> {
        let effects = self.inner.insert(position, &text).map_err(to_js_error)?;
        effects_to_json(&effects)
    }

    /// Delete characters at a visible index
    ///
    /// # Arguments
    /// * `length` - Number of characters (defaults to 1 if not provided)
    #[wasm_bindgen(js_name = delete)]
    pub fn delete(&mut self, position: usize, length: Option<usize>) -> Result<String, JsValue> {
        let effects = self
            .inner
            .delete(position, length.unwrap_or(1))
            .map_err(to_js_error)?;
        effects_to_json(&effects)
    }

    /// Replace a range with new text
    #[wasm_bindgen(js_name = replaceRange)]
    pub fn replace_range(
        &mut self,
        position: usize,
        length: usize,
        text: String,
    ) -> Result<String, JsValue> {
        let effects = self
            .inner
            .replace(position, length, &text)
            .map_err(to_js_error)?;
        effects_to_json(&effects)
    }

    /// Replace the whole document
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, text: String) -> Result<String, JsValue> {
        let effects = self.inner.set_value(&text).map_err(to_js_error)?;
        effects_to_json(&effects)
    }

    /// Apply an operation received from another replica (JSON string)
    #[wasm_bindgen(js_name = receive)]
    pub fn receive(&mut self, op_json: String) -> Result<String, JsValue> {
        let op = decode_operation(&op_json).map_err(to_js_error)?;
        let effects = self.inner.receive(op).map_err(to_js_error)?;
        effects_to_json(&effects)
    }

    /// Get the visible text
    #[wasm_bindgen(js_name = value)]
    pub fn value(&self) -> String {
        self.inner.value()
    }

    /// Get the number of visible characters
    #[wasm_bindgen(js_name = len)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the document is empty
    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of operations waiting for their prerequisites
    #[wasm_bindgen(js_name = pendingCount)]
    pub fn pending_count(&self) -> usize {
        self.inner.pending().len()
    }

    /// Export atoms and pending pool as JSON string
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<String, JsValue> {
        self.inner.export_state().map_err(to_js_error)
    }

    /// Replace atoms and pending pool from a JSON string
    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&mut self, state_json: String) -> Result<(), JsValue> {
        self.inner.import_state(&state_json).map_err(to_js_error)?;
        crate::console_log!(
            "woot: imported state for {} ({} pending)",
            self.inner.site(),
            self.inner.pending().len()
        );
        Ok(())
    }
}

fn effects_to_json(effects: &[Effect]) -> Result<String, JsValue> {
    encode_effects(effects).map_err(to_js_error)
}

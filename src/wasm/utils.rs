//! Helpers shared by the WASM bindings of `WasmWootText`

use wasm_bindgen::prelude::*;

/// Route engine panics to the browser console instead of an opaque `unreachable`
#[wasm_bindgen(js_name = initPanicHook)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
extern "C" {
    /// Sink for `console_log!` (snapshot imports report here)
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

/// Format a message for the JS console, e.g. `console_log!("restored {} chars", n)`
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::wasm::utils::log(&format_args!($($t)*).to_string())
    }
}

/// Surface a `WootError` (rejected operation, bad snapshot) as a thrown JS `Error`
pub(crate) fn to_js_error(err: crate::WootError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

//! WASM bindings for the WOOT engine
//!
//! This module provides JavaScript-friendly bindings for `WootText`.

pub mod bindings;
pub mod utils;

pub use bindings::WasmWootText;

//! WebAssembly bindings for the chain-address codec.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Encoding addresses from hashes
//! - Decoding and validating address text against a network
//! - Resolving which registered network an address belongs to
//! - Registering and unregistering networks at runtime

use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod info;

pub use info::AddressInfo;

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

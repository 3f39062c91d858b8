//! Address details handed to JavaScript.

use chain_address::{Address, NetworkDefinition};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Decoded address information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    /// Canonical Base58Check text.
    pub address: String,
    /// Version byte.
    pub version: u8,
    /// 160-bit hash as hex.
    pub hash: String,
    /// Id of the network the address was checked or resolved against.
    pub network: Option<String>,
    /// Whether the address is P2SH on that network.
    pub is_p2sh: bool,
}

impl AddressInfo {
    /// Describe `address`, optionally bound to `network`.
    pub fn new(address: &Address, network: Option<&NetworkDefinition>) -> Self {
        AddressInfo {
            address: address.to_text(),
            version: address.version(),
            hash: hex::encode(address.hash()),
            network: network.map(|n| n.id().to_string()),
            is_p2sh: network.map_or(false, |n| address.is_p2sh_for(n)),
        }
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
    }
}

//! JavaScript entry points over the process-wide network registry.
//!
//! Each exported function is a thin wrapper over a plain Rust function that
//! reports errors as strings, so the logic can be tested off-wasm.

use chain_address::{resolve_address, Address, NetworkConfig, NetworkDefinition, NetworkRegistry};
use wasm_bindgen::prelude::*;

use crate::info::AddressInfo;

/// Encode a hex hash as an address on the given network.
#[wasm_bindgen(js_name = encodeAddress)]
pub fn encode_address(network_id: &str, hash_hex: &str, is_script_hash: bool) -> Result<String, JsValue> {
    encode(NetworkRegistry::global(), network_id, hash_hex, is_script_hash).map_err(|e| JsValue::from_str(&e))
}

/// Decode address text, checking it against `expected_network_id` when given.
#[wasm_bindgen(js_name = decodeAddress)]
pub fn decode_address(text: &str, expected_network_id: Option<String>) -> Result<JsValue, JsValue> {
    decode(NetworkRegistry::global(), text, expected_network_id.as_deref())
        .map_err(|e| JsValue::from_str(&e))?
        .to_js()
}

/// Id of the network that owns `text`.
#[wasm_bindgen(js_name = resolveNetwork)]
pub fn resolve_network(text: &str) -> Result<String, JsValue> {
    resolve(NetworkRegistry::global(), text)
        .map(|info| info.network.unwrap_or_default())
        .map_err(|e| JsValue::from_str(&e))
}

/// Decode `text` and resolve its network.
#[wasm_bindgen(js_name = resolveAddress)]
pub fn resolve_address_info(text: &str) -> Result<JsValue, JsValue> {
    resolve(NetworkRegistry::global(), text)
        .map_err(|e| JsValue::from_str(&e))?
        .to_js()
}

/// Register networks from a JSON config document. Returns how many were added.
#[wasm_bindgen(js_name = registerNetworks)]
pub fn register_networks(json: &str) -> Result<u32, JsValue> {
    register(NetworkRegistry::global(), json).map_err(|e| JsValue::from_str(&e))
}

/// Unregister a network by id. Built-in networks are never removed.
#[wasm_bindgen(js_name = unregisterNetwork)]
pub fn unregister_network(network_id: &str) -> bool {
    NetworkRegistry::global().unregister_id(network_id)
}

fn lookup(registry: &NetworkRegistry, network_id: &str) -> Result<NetworkDefinition, String> {
    registry
        .find_by_id(network_id)
        .ok_or_else(|| format!("Unknown network: {}", network_id))
}

fn encode(
    registry: &NetworkRegistry,
    network_id: &str,
    hash_hex: &str,
    is_script_hash: bool,
) -> Result<String, String> {
    let network = lookup(registry, network_id)?;
    let hash = hex::decode(hash_hex).map_err(|e| format!("Invalid hash hex: {}", e))?;
    let address = Address::from_hash(&network, &hash, is_script_hash)
        .map_err(|e| format!("Invalid hash: {}", e))?;
    Ok(address.to_text())
}

fn decode(
    registry: &NetworkRegistry,
    text: &str,
    expected_network_id: Option<&str>,
) -> Result<AddressInfo, String> {
    let network = expected_network_id
        .map(|id| lookup(registry, id))
        .transpose()?;
    let address = Address::from_text(network.as_ref(), text)
        .map_err(|e| format!("Invalid address: {}", e))?;
    Ok(AddressInfo::new(&address, network.as_ref()))
}

fn resolve(registry: &NetworkRegistry, text: &str) -> Result<AddressInfo, String> {
    let (address, network) =
        resolve_address(registry, text).map_err(|e| format!("Invalid address: {}", e))?;
    Ok(AddressInfo::new(&address, Some(&network)))
}

fn register(registry: &NetworkRegistry, json: &str) -> Result<u32, String> {
    let config = NetworkConfig::from_json(json).map_err(|e| e.to_string())?;
    let count = registry.register_config(&config).map_err(|e| e.to_string())?;
    Ok(count as u32)
}

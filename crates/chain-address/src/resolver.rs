//! Find the network an address text belongs to.

use crate::address::{Address, AddressError, MalformedReason};
use crate::network::NetworkDefinition;
use crate::registry::NetworkRegistry;

/// Resolve the network owning `text`.
///
/// The text is decoded before the registry is consulted. If several networks
/// accept the version byte, the first in registry order wins: built-ins, then
/// registered networks from earliest to latest.
pub fn resolve(registry: &NetworkRegistry, text: &str) -> Result<NetworkDefinition, AddressError> {
    resolve_address(registry, text).map(|(_, network)| network)
}

/// Decode `text` and resolve its network in one step.
pub fn resolve_address(
    registry: &NetworkRegistry,
    text: &str,
) -> Result<(Address, NetworkDefinition), AddressError> {
    let address = Address::decode_unchecked(text)?;
    let version = address.version();

    let mut candidates = registry.find_by_version(version).into_iter();
    let network = candidates
        .next()
        .ok_or(MalformedReason::UnknownVersion(version))?;

    let shadowed: Vec<String> = candidates.map(|n| n.id().to_string()).collect();
    if !shadowed.is_empty() {
        log::debug!(
            "resolver: version 0x{:02x} resolved to {}, shadowing {:?}",
            version,
            network.id(),
            shadowed
        );
    }

    Ok((address, network))
}

/// Resolve against the process-wide registry.
pub fn resolve_network(text: &str) -> Result<NetworkDefinition, AddressError> {
    resolve(NetworkRegistry::global(), text)
}

impl NetworkRegistry {
    /// Resolve the network owning `text` in this registry.
    pub fn resolve(&self, text: &str) -> Result<NetworkDefinition, AddressError> {
        resolve(self, text)
    }
}

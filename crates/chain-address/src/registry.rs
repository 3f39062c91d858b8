//! Registry of the networks an address may belong to.
//!
//! The two built-in networks are always present and always searched first.
//! Further networks are appended by [`NetworkRegistry::register`] and searched
//! in registration order, so when two networks accept the same version byte
//! the earlier one wins.
//!
//! Every method takes the lock once and returns owned data, so each call is
//! atomic with respect to concurrent callers.

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::network::NetworkDefinition;

static GLOBAL: Lazy<NetworkRegistry> = Lazy::new(NetworkRegistry::new);

/// A mutable, ordered set of network definitions.
#[derive(Debug)]
pub struct NetworkRegistry {
    dynamic: RwLock<Vec<NetworkDefinition>>,
}

impl NetworkRegistry {
    /// Networks present in every registry, in search order.
    pub const BUILTINS: [NetworkDefinition; 2] = [NetworkDefinition::MAIN, NetworkDefinition::TEST];

    /// Create an isolated registry holding only the built-in networks.
    pub fn new() -> Self {
        NetworkRegistry {
            dynamic: RwLock::new(Vec::new()),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static NetworkRegistry {
        &GLOBAL
    }

    /// Append a network. Duplicate ids are kept; lookups see the first one.
    ///
    /// Returns `false` without registering when the id belongs to a built-in,
    /// since such an entry could never be found or removed.
    pub fn register(&self, network: NetworkDefinition) -> bool {
        self.register_all(vec![network]) == 1
    }

    /// Append several networks under a single write lock.
    ///
    /// Concurrent readers see either none or all of the batch. Entries with a
    /// built-in id are skipped. Returns the number of networks added.
    pub fn register_all(&self, networks: Vec<NetworkDefinition>) -> usize {
        let accepted: Vec<NetworkDefinition> = networks
            .into_iter()
            .filter(|network| {
                if Self::is_builtin_id(network.id()) {
                    log::warn!("registry: refusing to register network with built-in id {}", network.id());
                    return false;
                }
                log::debug!(
                    "registry: registering network {} (versions {:02x?})",
                    network.id(),
                    network.acceptable_versions()
                );
                true
            })
            .collect();

        let count = accepted.len();
        self.dynamic.write().extend(accepted);
        count
    }

    /// Remove the first registered network with the same id.
    ///
    /// Returns `false` when nothing was removed: the network was never
    /// registered, or it is a built-in.
    pub fn unregister(&self, network: &NetworkDefinition) -> bool {
        self.unregister_id(network.id())
    }

    /// Remove the first registered network with the given id.
    pub fn unregister_id(&self, id: &str) -> bool {
        if Self::is_builtin_id(id) {
            log::warn!("registry: refusing to unregister built-in network {}", id);
            return false;
        }

        let mut dynamic = self.dynamic.write();
        match dynamic.iter().position(|network| network.id() == id) {
            Some(index) => {
                dynamic.remove(index);
                log::debug!("registry: unregistered network {}", id);
                true
            }
            None => false,
        }
    }

    /// Every network accepting `version`, built-ins first, then registration order.
    pub fn find_by_version(&self, version: u8) -> Vec<NetworkDefinition> {
        let dynamic = self.dynamic.read();
        Self::BUILTINS
            .iter()
            .chain(dynamic.iter())
            .filter(|network| network.accepts(version))
            .cloned()
            .collect()
    }

    /// The first network with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<NetworkDefinition> {
        if let Some(builtin) = Self::BUILTINS.iter().find(|network| network.id() == id) {
            return Some(builtin.clone());
        }
        self.dynamic.read().iter().find(|network| network.id() == id).cloned()
    }

    /// Snapshot of all networks in search order.
    pub fn networks(&self) -> Vec<NetworkDefinition> {
        let dynamic = self.dynamic.read();
        Self::BUILTINS.iter().chain(dynamic.iter()).cloned().collect()
    }

    fn is_builtin_id(id: &str) -> bool {
        Self::BUILTINS.iter().any(|builtin| builtin.id() == id)
    }

    /// Number of networks, built-ins included.
    pub fn len(&self) -> usize {
        Self::BUILTINS.len() + self.dynamic.read().len()
    }

    /// Always `false`; the built-ins cannot be removed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Network definitions: the address version bytes that identify one chain.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

/// Id of the built-in main network.
pub const MAIN_ID: &str = "org.floj.production";

/// Id of the built-in test network.
pub const TEST_ID: &str = "org.floj.test";

/// Errors from building a [`NetworkDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// A network must accept at least one version byte.
    #[error("acceptable version list is empty")]
    EmptyAcceptableVersions,
    /// The same version byte appears twice in one definition.
    #[error("version 0x{0:02x} listed more than once")]
    DuplicateVersion(u8),
}

/// Address parameters for one chain.
///
/// Two definitions are equal when their ids are equal; the version bytes are
/// not part of identity, and different networks may share them.
#[derive(Debug, Clone)]
pub struct NetworkDefinition {
    id: Cow<'static, str>,
    p2pkh_version: u8,
    p2sh_version: u8,
    acceptable_versions: Cow<'static, [u8]>,
}

impl NetworkDefinition {
    /// Main network: P2PKH addresses start with `F`, P2SH with `4`.
    pub const MAIN: NetworkDefinition = NetworkDefinition {
        id: Cow::Borrowed(MAIN_ID),
        p2pkh_version: 0x23,
        p2sh_version: 0x08,
        acceptable_versions: Cow::Borrowed(&[0x23, 0x08]),
    };

    /// Test network: P2PKH addresses start with `o`, P2SH with `2`.
    pub const TEST: NetworkDefinition = NetworkDefinition {
        id: Cow::Borrowed(TEST_ID),
        p2pkh_version: 0x73,
        p2sh_version: 0xc6,
        acceptable_versions: Cow::Borrowed(&[0x73, 0xc6]),
    };

    /// Create a definition accepting exactly its P2PKH and P2SH versions.
    pub fn new(id: impl Into<String>, p2pkh_version: u8, p2sh_version: u8) -> Self {
        let acceptable = if p2pkh_version == p2sh_version {
            vec![p2pkh_version]
        } else {
            vec![p2pkh_version, p2sh_version]
        };
        NetworkDefinition {
            id: Cow::Owned(id.into()),
            p2pkh_version,
            p2sh_version,
            acceptable_versions: Cow::Owned(acceptable),
        }
    }

    /// Create a definition with an explicit acceptable version list.
    ///
    /// The list must be non-empty and free of duplicates. It does not have to
    /// contain the P2PKH or P2SH version.
    pub fn with_acceptable_versions(
        id: impl Into<String>,
        p2pkh_version: u8,
        p2sh_version: u8,
        acceptable_versions: Vec<u8>,
    ) -> Result<Self, NetworkError> {
        if acceptable_versions.is_empty() {
            return Err(NetworkError::EmptyAcceptableVersions);
        }
        for (i, version) in acceptable_versions.iter().enumerate() {
            if acceptable_versions[..i].contains(version) {
                return Err(NetworkError::DuplicateVersion(*version));
            }
        }
        Ok(NetworkDefinition {
            id: Cow::Owned(id.into()),
            p2pkh_version,
            p2sh_version,
            acceptable_versions: Cow::Owned(acceptable_versions),
        })
    }

    /// Stable identifier, unique within a registry.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Version byte for pay-to-public-key-hash addresses.
    pub fn p2pkh_version(&self) -> u8 {
        self.p2pkh_version
    }

    /// Version byte for pay-to-script-hash addresses.
    pub fn p2sh_version(&self) -> u8 {
        self.p2sh_version
    }

    /// Version bytes this network accepts as its own, in declaration order.
    pub fn acceptable_versions(&self) -> &[u8] {
        &self.acceptable_versions
    }

    /// Whether `version` is one of this network's acceptable versions.
    pub fn accepts(&self, version: u8) -> bool {
        self.acceptable_versions.contains(&version)
    }

    /// Whether this is one of the two built-in networks.
    pub fn is_builtin(&self) -> bool {
        self.id == MAIN_ID || self.id == TEST_ID
    }
}

impl PartialEq for NetworkDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NetworkDefinition {}

impl Hash for NetworkDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for NetworkDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

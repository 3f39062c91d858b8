//! Address codec and network resolution for Bitcoin-derived chains.
//!
//! This crate provides pure Rust implementations of:
//! - Base58Check encoding with leading-zero preservation and checksum checks
//! - Network definitions (P2PKH/P2SH version bytes) and a runtime registry
//! - P2PKH and P2SH addresses built from hashes, redeem scripts or text
//! - Resolution of address text to the network that owns it

pub mod address;
pub mod base58;
pub mod config;
pub mod hash;
pub mod network;
pub mod registry;
pub mod resolver;

pub use address::{Address, AddressError, BuildError, MalformedReason};
pub use base58::DecodeError;
pub use config::{ConfigError, NetworkConfig, NetworkSpec};
pub use hash::{double_sha256, hash160};
pub use network::{NetworkDefinition, NetworkError};
pub use registry::NetworkRegistry;
pub use resolver::{resolve, resolve_address, resolve_network};

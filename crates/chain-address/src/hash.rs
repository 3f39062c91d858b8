//! Hash primitives used by the address codec.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length of the Base58Check checksum in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Length of a HASH160 digest in bytes.
pub const HASH160_LEN: usize = 20;

/// Single SHA256 hash.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let hash = Sha256::digest(data);
    let mut result = [0u8; 32];
    result.copy_from_slice(&hash);
    result
}

/// Bitcoin's double SHA256: SHA256(SHA256(data)).
///
/// Base58Check checksums are the first four bytes of this digest.
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut result = [0u8; 32];
    result.copy_from_slice(&second);
    result
}

/// RIPEMD160(SHA256(data)), the 160-bit hash committed to by P2PKH and P2SH
/// addresses.
#[inline]
pub fn hash160(data: &[u8]) -> [u8; HASH160_LEN] {
    let inner = Sha256::digest(data);
    let outer = Ripemd160::digest(inner);
    let mut result = [0u8; HASH160_LEN];
    result.copy_from_slice(&outer);
    result
}

/// Base58Check checksum: the first four bytes of `double_sha256(data)`.
#[inline]
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = double_sha256(data);
    let mut result = [0u8; CHECKSUM_LEN];
    result.copy_from_slice(&hash[..CHECKSUM_LEN]);
    result
}

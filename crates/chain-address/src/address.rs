//! Base58Check addresses for P2PKH and P2SH outputs.
//!
//! An [`Address`] is just a version byte and a 160-bit hash. Which network it
//! belongs to is a question for the caller (pass an expected network to
//! [`Address::from_text`]) or for the [resolver](crate::resolver).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::base58::{self, DecodeError};
use crate::hash::{hash160, HASH160_LEN};
use crate::network::NetworkDefinition;

/// Length of [`Address::to_bytes`]: version byte plus hash.
pub const ADDRESS_BYTES_LEN: usize = 1 + HASH160_LEN;

/// Longest Base58 rendering of `version || hash || checksum` (25 bytes).
pub const MAX_TEXT_LEN: usize = 35;

const OP_DUP: u8 = 0x76;
const OP_HASH160: u8 = 0xa9;
const OP_PUSHBYTES_20: u8 = 0x14;
const OP_EQUALVERIFY: u8 = 0x88;
const OP_CHECKSIG: u8 = 0xac;
const OP_EQUAL: u8 = 0x87;

/// Why address text was rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// Not valid Base58Check.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Checksum-valid, but the payload is not a 20-byte hash.
    #[error("payload is {0} bytes, expected 20")]
    InvalidPayloadLength(usize),
    /// Longer than any 25-byte Base58Check rendering; not decoded.
    #[error("address text is {0} characters, at most 35 allowed")]
    TooLong(usize),
    /// Checksum-valid, but no registered network accepts the version byte.
    #[error("no registered network accepts version 0x{0:02x}")]
    UnknownVersion(u8),
}

/// Errors from parsing or resolving address text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The text is not a valid address for any known network.
    #[error("malformed address: {0}")]
    Malformed(#[from] MalformedReason),
    /// A valid address, but not for the network the caller expected.
    #[error(
        "wrong network: version 0x{observed_version:02x} is not one of {acceptable_versions:02x?}"
    )]
    WrongNetwork {
        observed_version: u8,
        acceptable_versions: Vec<u8>,
    },
}

impl From<DecodeError> for AddressError {
    fn from(err: DecodeError) -> Self {
        AddressError::Malformed(MalformedReason::Decode(err))
    }
}

/// Errors from building an address out of collaborator-supplied bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The hash is not 160 bits.
    #[error("invalid hash length: {length} bytes, expected 20")]
    InvalidHashLength { length: usize },
    /// Serialized address bytes are not version plus 20-byte hash.
    #[error("invalid address bytes length: {length}, expected 21")]
    InvalidPayloadLength { length: usize },
    /// The script is not `OP_HASH160 <20 bytes> OP_EQUAL`.
    #[error("script is not a pay-to-script-hash output script")]
    NotP2shScript,
}

/// A version byte paired with a 160-bit public key or script hash.
///
/// Equality and ordering look only at the bytes: version first, then the hash
/// compared as unsigned bytes. This is not the order of the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    version: u8,
    hash: [u8; HASH160_LEN],
}

impl Address {
    /// Build an address from a raw version byte and hash.
    pub const fn new(version: u8, hash: [u8; HASH160_LEN]) -> Self {
        Address { version, hash }
    }

    /// Build a P2PKH or P2SH address for `network` from a 20-byte hash.
    pub fn from_hash(
        network: &NetworkDefinition,
        hash: &[u8],
        is_script_hash: bool,
    ) -> Result<Self, BuildError> {
        let hash: [u8; HASH160_LEN] = hash
            .try_into()
            .map_err(|_| BuildError::InvalidHashLength { length: hash.len() })?;
        let version = if is_script_hash {
            network.p2sh_version()
        } else {
            network.p2pkh_version()
        };
        Ok(Address::new(version, hash))
    }

    /// P2PKH address for a public key hash.
    pub fn from_p2pkh_hash(network: &NetworkDefinition, hash: [u8; HASH160_LEN]) -> Self {
        Address::new(network.p2pkh_version(), hash)
    }

    /// P2SH address for a script hash.
    pub fn from_p2sh_hash(network: &NetworkDefinition, hash: [u8; HASH160_LEN]) -> Self {
        Address::new(network.p2sh_version(), hash)
    }

    /// P2SH address committing to a redeem script.
    pub fn from_redeem_script(network: &NetworkDefinition, redeem_script: &[u8]) -> Self {
        Address::from_p2sh_hash(network, hash160(redeem_script))
    }

    /// P2SH address taken from an `OP_HASH160 <hash> OP_EQUAL` output script.
    pub fn from_p2sh_output_script(
        network: &NetworkDefinition,
        script_pubkey: &[u8],
    ) -> Result<Self, BuildError> {
        match script_pubkey {
            [OP_HASH160, OP_PUSHBYTES_20, hash @ .., OP_EQUAL] if hash.len() == HASH160_LEN => {
                Address::from_hash(network, hash, true)
            }
            _ => Err(BuildError::NotP2shScript),
        }
    }

    /// Parse Base58Check address text.
    ///
    /// With `expected_network`, the version byte must be one the network
    /// accepts, otherwise [`AddressError::WrongNetwork`] is returned even if
    /// some other network would accept it. Without one, any checksum-valid
    /// address is returned unbound to a network.
    pub fn from_text(
        expected_network: Option<&NetworkDefinition>,
        text: &str,
    ) -> Result<Self, AddressError> {
        let address = Self::decode_unchecked(text)?;

        if let Some(network) = expected_network {
            if !network.accepts(address.version) {
                return Err(AddressError::WrongNetwork {
                    observed_version: address.version,
                    acceptable_versions: network.acceptable_versions().to_vec(),
                });
            }
        }

        Ok(address)
    }

    /// Decode text into an address without any network check.
    pub(crate) fn decode_unchecked(text: &str) -> Result<Self, AddressError> {
        if text.len() > MAX_TEXT_LEN {
            return Err(MalformedReason::TooLong(text.len()).into());
        }
        let (version, payload) = base58::decode_check(text)?;
        let hash: [u8; HASH160_LEN] = payload
            .as_slice()
            .try_into()
            .map_err(|_| MalformedReason::InvalidPayloadLength(payload.len()))?;
        Ok(Address::new(version, hash))
    }

    /// Base58Check text of this address.
    pub fn to_text(&self) -> String {
        base58::encode_check(self.version, &self.hash)
    }

    /// The version byte.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The 160-bit hash.
    pub fn hash(&self) -> &[u8; HASH160_LEN] {
        &self.hash
    }

    /// Whether this is a P2SH address under `network`'s version bytes.
    pub fn is_p2sh_for(&self, network: &NetworkDefinition) -> bool {
        self.version == network.p2sh_version()
    }

    /// The output script paying to this address on `network`.
    pub fn script_pubkey_for(&self, network: &NetworkDefinition) -> Vec<u8> {
        if self.is_p2sh_for(network) {
            // OP_HASH160 <20-byte-hash> OP_EQUAL
            let mut script = Vec::with_capacity(23);
            script.push(OP_HASH160);
            script.push(OP_PUSHBYTES_20);
            script.extend_from_slice(&self.hash);
            script.push(OP_EQUAL);
            script
        } else {
            // OP_DUP OP_HASH160 <20-byte-hash> OP_EQUALVERIFY OP_CHECKSIG
            let mut script = Vec::with_capacity(25);
            script.push(OP_DUP);
            script.push(OP_HASH160);
            script.push(OP_PUSHBYTES_20);
            script.extend_from_slice(&self.hash);
            script.push(OP_EQUALVERIFY);
            script.push(OP_CHECKSIG);
            script
        }
    }

    /// Serialize as `version || hash`.
    pub fn to_bytes(&self) -> [u8; ADDRESS_BYTES_LEN] {
        let mut bytes = [0u8; ADDRESS_BYTES_LEN];
        bytes[0] = self.version;
        bytes[1..].copy_from_slice(&self.hash);
        bytes
    }

    /// Inverse of [`Address::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BuildError> {
        match bytes {
            [version, hash @ ..] if hash.len() == HASH160_LEN => {
                let mut buf = [0u8; HASH160_LEN];
                buf.copy_from_slice(hash);
                Ok(Address::new(*version, buf))
            }
            _ => Err(BuildError::InvalidPayloadLength { length: bytes.len() }),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_text(None, s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Address::from_text(None, &text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkDefinition;

    const MAIN_ADDRESS: &str = "F9nYnvA27qGFcxwQKXvVMQn7E8SMQsbaHD";
    const MAIN_HASH: &str = "2b646639fbeade213a81afbb193dff43e2f93d32";
    const TEST_ADDRESS: &str = "ofkkGFgK3JBwLqUzTLcuupM4PjPBH56qd4";
    const TEST_HASH: &str = "fb0a5f12b8d54102396fcb259cea199ead505bee";

    fn main_net() -> NetworkDefinition {
        NetworkDefinition::MAIN
    }

    fn test_net() -> NetworkDefinition {
        NetworkDefinition::TEST
    }

    #[test]
    fn test_stringification() {
        let a = Address::from_hash(&test_net(), &hex::decode(TEST_HASH).unwrap(), false).unwrap();
        assert_eq!(a.to_string(), TEST_ADDRESS);
        assert!(!a.is_p2sh_for(&test_net()));

        let b = Address::from_hash(&main_net(), &hex::decode(MAIN_HASH).unwrap(), false).unwrap();
        assert_eq!(b.to_text(), MAIN_ADDRESS);
        assert!(!b.is_p2sh_for(&main_net()));
    }

    #[test]
    fn test_decoding() {
        let a = Address::from_text(Some(&test_net()), TEST_ADDRESS).unwrap();
        assert_eq!(hex::encode(a.hash()), TEST_HASH);

        let b = Address::from_text(Some(&main_net()), MAIN_ADDRESS).unwrap();
        assert_eq!(hex::encode(b.hash()), MAIN_HASH);
        assert_eq!(b.version(), 0x23);
        assert!(!b.is_p2sh_for(&main_net()));
    }

    #[test]
    fn test_error_paths() {
        let garbage = Address::from_text(Some(&test_net()), "this is not a valid address!");
        assert!(matches!(garbage, Err(AddressError::Malformed(_))));

        let empty = Address::from_text(Some(&test_net()), "");
        assert_eq!(
            empty,
            Err(AddressError::Malformed(MalformedReason::Decode(DecodeError::TooShort { length: 0 })))
        );

        let mismatch = Address::from_text(Some(&test_net()), MAIN_ADDRESS);
        assert_eq!(
            mismatch,
            Err(AddressError::WrongNetwork {
                observed_version: main_net().p2pkh_version(),
                acceptable_versions: test_net().acceptable_versions().to_vec(),
            })
        );
    }

    #[test]
    fn test_wrong_payload_length_is_malformed() {
        let short = base58::encode_check(0x23, &[0u8; 19]);
        assert_eq!(
            Address::from_text(Some(&main_net()), &short),
            Err(AddressError::Malformed(MalformedReason::InvalidPayloadLength(19)))
        );

        let long = base58::encode_check(0x23, &[0u8; 32]);
        assert!(matches!(Address::from_text(None, &long), Err(AddressError::Malformed(_))));
    }

    #[test]
    fn test_overlong_text_rejected_before_decoding() {
        let long = "z".repeat(200_000);
        assert_eq!(
            Address::from_text(None, &long),
            Err(AddressError::Malformed(MalformedReason::TooLong(200_000)))
        );
        assert!(matches!(
            Address::from_text(Some(&main_net()), &long),
            Err(AddressError::Malformed(MalformedReason::TooLong(_)))
        ));
    }

    #[test]
    fn test_max_text_len_covers_every_address() {
        // Largest possible 25-byte value renders at the limit.
        let widest = base58::encode(&[0xff; 25]);
        assert_eq!(widest.len(), MAX_TEXT_LEN);

        let address = Address::new(0xff, [0xff; 20]);
        assert!(address.to_text().len() <= MAX_TEXT_LEN);
        assert_eq!(Address::from_text(None, &address.to_text()), Ok(address));

        // Leading zero bytes take one character each and still fit.
        let zeros = Address::new(0x00, [0u8; 20]);
        assert_eq!(Address::from_text(None, &zeros.to_text()), Ok(zeros));
    }

    #[test]
    fn test_single_character_flip_is_malformed() {
        let alphabet = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
        for (i, original) in MAIN_ADDRESS.char_indices() {
            let replacement = alphabet.chars().find(|&c| c != original).unwrap();
            let mut mutated = String::from(&MAIN_ADDRESS[..i]);
            mutated.push(replacement);
            mutated.push_str(&MAIN_ADDRESS[i + 1..]);

            let result = Address::from_text(Some(&main_net()), &mutated);
            assert!(
                matches!(result, Err(AddressError::Malformed(_))),
                "flip at {} accepted: {:?}",
                i,
                result
            );
        }
    }

    #[test]
    fn test_roundtrip_without_network() {
        let address: Address = MAIN_ADDRESS.parse().unwrap();
        assert_eq!(address.to_text(), MAIN_ADDRESS);

        // Unknown versions still parse when no network is expected.
        let foreign = Address::new(0x99, [7u8; 20]).to_text();
        assert_eq!(Address::from_text(None, &foreign).unwrap().version(), 0x99);
    }

    #[test]
    fn test_roundtrip_with_network() {
        let hash = [0x5au8; 20];
        for network in [main_net(), test_net()] {
            for is_script_hash in [false, true] {
                let address = Address::from_hash(&network, &hash, is_script_hash).unwrap();
                let parsed = Address::from_text(Some(&network), &address.to_text()).unwrap();
                assert_eq!(parsed, address);
                assert_eq!(parsed.is_p2sh_for(&network), is_script_hash);
            }
        }
    }

    #[test]
    fn test_invalid_hash_length() {
        assert_eq!(
            Address::from_hash(&main_net(), &[0u8; 19], false),
            Err(BuildError::InvalidHashLength { length: 19 })
        );
        assert_eq!(
            Address::from_hash(&main_net(), &[0u8; 32], true),
            Err(BuildError::InvalidHashLength { length: 32 })
        );
    }

    #[test]
    fn test_p2sh_address() {
        let main_p2sh = Address::from_text(Some(&main_net()), "4Zh75RGJT2aYtgDQbzsrwX56SXxYf6ysU8").unwrap();
        assert_eq!(main_p2sh.version(), main_net().p2sh_version());
        assert!(main_p2sh.is_p2sh_for(&main_net()));

        let test_p2sh = Address::from_text(Some(&test_net()), "2P1efmCKpM6tzncRJTFqo3iKbcPv7rrGbAh").unwrap();
        assert_eq!(test_p2sh.version(), test_net().p2sh_version());
        assert!(test_p2sh.is_p2sh_for(&test_net()));

        let hash: [u8; 20] = hex::decode("db3f9f3fd8cb236033756659fd2c5400f8eeee18")
            .unwrap()
            .try_into()
            .unwrap();
        let a = Address::from_p2sh_hash(&main_net(), hash);
        assert_eq!(a.to_text(), "4Zh75RGJT2aYtgDQbzsrwX56SXxYf6ysU8");

        let b = Address::from_hash(
            &test_net(),
            &hex::decode("d867625a627322622e74d1f8bdb972c96ab86b40").unwrap(),
            true,
        )
        .unwrap();
        assert_eq!(b.to_text(), "2P1efmCKpM6tzncRJTFqo3iKbcPv7rrGbAh");

        let c = Address::from_p2sh_output_script(&main_net(), &a.script_pubkey_for(&main_net())).unwrap();
        assert_eq!(c.to_text(), "4Zh75RGJT2aYtgDQbzsrwX56SXxYf6ysU8");
    }

    #[test]
    fn test_from_redeem_script() {
        // OP_TRUE
        let address = Address::from_redeem_script(&main_net(), &[0x51]);
        assert_eq!(hex::encode(address.hash()), "da1745e9b549bd0bfa1a569971c77eba30cd5a4b");
        assert_eq!(address.to_text(), "4Zaz4jPhBHTSsFTSn8vBcbWMJKZAeQWGzg");
        assert!(address.is_p2sh_for(&main_net()));
    }

    #[test]
    fn test_from_p2sh_output_script_rejects_other_scripts() {
        let p2pkh = Address::from_p2pkh_hash(&main_net(), [1u8; 20]).script_pubkey_for(&main_net());
        assert_eq!(
            Address::from_p2sh_output_script(&main_net(), &p2pkh),
            Err(BuildError::NotP2shScript)
        );
        assert_eq!(Address::from_p2sh_output_script(&main_net(), &[]), Err(BuildError::NotP2shScript));
    }

    #[test]
    fn test_script_pubkey() {
        let p2pkh = Address::from_p2pkh_hash(&main_net(), [1u8; 20]).script_pubkey_for(&main_net());
        assert_eq!(p2pkh.len(), 25);
        assert_eq!(p2pkh[0], OP_DUP);
        assert_eq!(p2pkh[1], OP_HASH160);
        assert_eq!(p2pkh[24], OP_CHECKSIG);

        let p2sh = Address::from_p2sh_hash(&main_net(), [1u8; 20]).script_pubkey_for(&main_net());
        assert_eq!(p2sh.len(), 23);
        assert_eq!(p2sh[0], OP_HASH160);
        assert_eq!(p2sh[22], OP_EQUAL);
    }

    #[test]
    fn test_cloning() {
        let a = Address::from_hash(
            &test_net(),
            &hex::decode("fda79a24e50ff70ff42f7d89585da5bd19d9e5cc").unwrap(),
            false,
        )
        .unwrap();
        let b = a;
        let c = a.clone();

        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.cmp(&c), std::cmp::Ordering::Equal);
        assert!(!std::ptr::eq(&a, &c));
    }

    #[test]
    fn test_comparison() {
        let lower = Address::from_text(Some(&main_net()), "F8LbSsrHqAwZ1GiDyvgykANZ8obTp9iQ29").unwrap();
        let higher = Address::from_text(Some(&main_net()), MAIN_ADDRESS).unwrap();

        assert!(lower < higher);
        assert!(higher > lower);
        assert_eq!(lower.cmp(&lower.clone()), std::cmp::Ordering::Equal);

        // Byte order and text order happen to agree for this pair.
        assert!(lower.hash() < higher.hash());
        assert!(lower.to_text() < higher.to_text());
    }

    #[test]
    fn test_ordering_is_by_bytes_not_text() {
        // Same version, hashes differ only in the last byte.
        let a = Address::new(0x23, [0u8; 20]);
        let mut hash = [0u8; 20];
        hash[19] = 0xff;
        let b = Address::new(0x23, hash);
        assert!(a < b);

        // Version dominates the hash.
        let c = Address::new(0x08, [0xff; 20]);
        assert!(c < a);

        let mut sorted = vec![b, a, c];
        sorted.sort();
        assert_eq!(sorted, vec![c, a, b]);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let address = Address::from_text(None, MAIN_ADDRESS).unwrap();
        let bytes = address.to_bytes();
        assert_eq!(bytes[0], 0x23);
        assert_eq!(Address::from_bytes(&bytes), Ok(address));
        assert_eq!(
            Address::from_bytes(&bytes[..20]),
            Err(BuildError::InvalidPayloadLength { length: 20 })
        );
    }

    #[test]
    fn test_serde_as_text() {
        let address = Address::from_text(None, TEST_ADDRESS).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", TEST_ADDRESS));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);

        assert!(serde_json::from_str::<Address>("\"not an address\"").is_err());
    }
}

//! Base58 and Base58Check encoding.
//!
//! Base58Check text is `base58(version || payload || checksum)` where the
//! checksum is the first four bytes of double SHA256 over `version || payload`.
//! Base58 has no zero digit of its own, so every leading zero byte is carried
//! as one leading `'1'` character and restored on decode.

use thiserror::Error;

use crate::hash::{checksum, CHECKSUM_LEN};

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Smallest decoded Base58Check buffer: one version byte plus the checksum.
pub const MIN_CHECKED_LEN: usize = 1 + CHECKSUM_LEN;

/// Reverse lookup from ASCII to digit value, `-1` for characters outside the alphabet.
const BASE58_DIGITS: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < BASE58_ALPHABET.len() {
        table[BASE58_ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// Base58 / Base58Check decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A character outside the Base58 alphabet.
    #[error("invalid base58 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    /// Fewer bytes than a version byte and a checksum.
    #[error("decoded data too short: {length} bytes, need at least 5")]
    TooShort { length: usize },
    /// The trailing checksum does not match the data.
    #[error("checksum mismatch: expected {expected:02x?}, found {actual:02x?}")]
    ChecksumMismatch {
        expected: [u8; CHECKSUM_LEN],
        actual: [u8; CHECKSUM_LEN],
    },
}

/// Encode bytes as Base58 without a checksum.
pub fn encode(data: &[u8]) -> String {
    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();

    // Little-endian base58 digits of the big-endian input number.
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    for &byte in &data[leading_zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            let temp = (*digit as u32) * 256 + carry;
            *digit = (temp % 58) as u8;
            carry = temp / 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(leading_zeros + digits.len());
    for _ in 0..leading_zeros {
        out.push(BASE58_ALPHABET[0] as char);
    }
    for &digit in digits.iter().rev() {
        out.push(BASE58_ALPHABET[digit as usize] as char);
    }
    out
}

/// Decode Base58 text without checking a checksum.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    // Count leading '1's (they become leading zeros)
    let leading_zeros = input.chars().take_while(|&c| c == '1').count();

    // Little-endian bytes of the number being accumulated.
    let mut bytes: Vec<u8> = Vec::with_capacity(input.len() * 733 / 1000 + 1);
    for (position, c) in input.chars().enumerate() {
        let value = digit_value(c).ok_or(DecodeError::InvalidCharacter { character: c, position })?;

        // Multiply result by 58 and add value
        let mut carry = value;
        for byte in bytes.iter_mut() {
            let temp = (*byte as u32) * 58 + carry;
            *byte = (temp & 0xFF) as u8;
            carry = temp >> 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    let mut result = vec![0u8; leading_zeros];
    result.extend(bytes.iter().rev());
    Ok(result)
}

/// Encode `version || payload || checksum` as Base58Check text.
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    buf.push(version);
    buf.extend_from_slice(payload);
    let check = checksum(&buf);
    buf.extend_from_slice(&check);
    encode(&buf)
}

/// Decode Base58Check text into its version byte and payload.
pub fn decode_check(input: &str) -> Result<(u8, Vec<u8>), DecodeError> {
    let mut decoded = decode(input)?;

    if decoded.len() < MIN_CHECKED_LEN {
        return Err(DecodeError::TooShort { length: decoded.len() });
    }

    let body_len = decoded.len() - CHECKSUM_LEN;
    let mut actual = [0u8; CHECKSUM_LEN];
    actual.copy_from_slice(&decoded[body_len..]);
    let expected = checksum(&decoded[..body_len]);
    if actual != expected {
        return Err(DecodeError::ChecksumMismatch { expected, actual });
    }

    decoded.truncate(body_len);
    let version = decoded.remove(0);
    Ok((version, decoded))
}

fn digit_value(c: char) -> Option<u32> {
    if !c.is_ascii() {
        return None;
    }
    match BASE58_DIGITS[c as usize] {
        -1 => None,
        value => Some(value as u32),
    }
}

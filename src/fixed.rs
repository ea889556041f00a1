//! Fixed-width byte arrays.
//!
//! The width is part of the kind, so fixed arrays carry no length prefix in binary.
//! In JSON they are unpadded URL-safe base64, and decoding rejects payloads of the
//! wrong width.
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! // 31 zero bytes
//! let short = format!("\"{}\"", "A".repeat(42));
//!
//! let err = serde_json::from_str::<Bytes32>(&short).unwrap_err();
//! assert!(err.to_string().contains("expected len=32, got len=31"));
//! ```

use crate::{errors::DecodingError, json, kind::Kind, types::Type};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{convert::TryFrom, fmt, ops::Deref};

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Exactly `N` bytes.
pub struct FixedBytes<const N: usize>([u8; N]);

/// 32 bytes, typically a hash.
pub type Bytes32 = FixedBytes<32>;
/// 65 bytes, typically a recoverable signature.
pub type Bytes65 = FixedBytes<65>;

impl<const N: usize> FixedBytes<N> {
    /// Width in bytes.
    pub const LEN: usize = N;

    /// Wraps an array.
    pub const fn new(bytes: [u8; N]) -> Self { FixedBytes(bytes) }

    /// Borrows the array.
    pub fn as_bytes(&self) -> &[u8; N] { &self.0 }

    /// Unwraps the array.
    pub fn into_inner(self) -> [u8; N] { self.0 }

    /// Copies `bytes`, failing unless it holds exactly `N` bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes: &[u8]` - The bytes to copy.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodingError> {
        <[u8; N]>::try_from(bytes)
            .map(FixedBytes)
            .map_err(|_| DecodingError::LengthMismatch {
                expected: N,
                got: bytes.len(),
            })
    }
}

impl Bytes32 {
    /// The [`Kind`] of every value of this type.
    pub fn kind(&self) -> Kind { Kind::Bytes32 }

    /// The [`Type`] of every value of this type.
    pub fn ty(&self) -> Type { Type::Bytes32 }
}

impl Bytes65 {
    /// The [`Kind`] of every value of this type.
    pub fn kind(&self) -> Kind { Kind::Bytes65 }

    /// The [`Type`] of every value of this type.
    pub fn ty(&self) -> Type { Type::Bytes65 }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self { FixedBytes([0u8; N]) }
}

impl<const N: usize> Deref for FixedBytes<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] { &self.0 }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] { &self.0 }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self { FixedBytes(bytes) }
}

impl<const N: usize> From<FixedBytes<N>> for [u8; N] {
    fn from(bytes: FixedBytes<N>) -> Self { bytes.0 }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "FixedBytes<{}>({})", N, self) }
}

impl<const N: usize> fmt::Display for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(&json::encode_base64(&self.0)) }
}

impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> { s.serialize_str(&json::encode_base64(&self.0)) }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        json::decode_base64(&text)
            .and_then(|raw| FixedBytes::from_slice(&raw))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_checks_width() {
        assert_eq!(Bytes32::from_slice(&[7u8; 32]), Ok(Bytes32::new([7u8; 32])));
        assert_eq!(
            Bytes65::from_slice(&[0u8; 64]),
            Err(DecodingError::LengthMismatch {
                expected: 65,
                got: 64
            })
        );
    }

    #[test]
    fn json_round_trip() {
        let mut raw = [0u8; 65];
        raw[0] = 0xfb;
        raw[64] = 0xff;
        let sig = Bytes65::new(raw);

        let text = serde_json::to_string(&sig).unwrap();
        assert!(!text.contains('='));
        assert_eq!(serde_json::from_str::<Bytes65>(&text).unwrap(), sig);
    }

    #[test]
    fn json_length_mismatch() {
        let text = format!("\"{}\"", json::encode_base64(&[1u8; 31]));
        let err = serde_json::from_str::<Bytes32>(&text).unwrap_err();
        assert!(err.to_string().contains("expected len=32, got len=31"));
    }
}

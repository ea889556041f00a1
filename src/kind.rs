//! Kinds: the closed set of tags that classify every value and type.
//!
//! Each kind has a one-byte discriminant, which is what goes over the wire, and a
//! lower-case name, which is what appears in JSON.
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! assert_eq!(Kind::U256 as u8, 7);
//! assert_eq!(Kind::Bytes65.name(), "bytes65");
//! assert_eq!(Kind::from_text("Bytes32"), Kind::Bytes32);
//!
//! // unrecognised names fall back to nil
//! assert_eq!(Kind::from_text("float"), Kind::Nil);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{convert::Infallible, fmt, str::FromStr};

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// The kind of a value or type.
pub enum Kind {
    /// The absence of a value.
    Nil = 0,
    /// `true` or `false`.
    Bool = 1,
    /// 8-bit unsigned integer.
    U8 = 2,
    /// 16-bit unsigned integer.
    U16 = 3,
    /// 32-bit unsigned integer.
    U32 = 4,
    /// 64-bit unsigned integer.
    U64 = 5,
    /// 128-bit unsigned integer.
    U128 = 6,
    /// 256-bit unsigned integer.
    U256 = 7,
    /// UTF-8 text.
    String = 10,
    /// Arbitrary-length bytes.
    Bytes = 11,
    /// Exactly 32 bytes.
    Bytes32 = 12,
    /// Exactly 65 bytes.
    Bytes65 = 13,
    /// Ordered, named fields.
    Struct = 20,
    /// Homogeneous sequence.
    List = 21,
}

impl Kind {
    /// Every kind, in discriminant order.
    pub const ALL: [Kind; 14] = [
        Kind::Nil,
        Kind::Bool,
        Kind::U8,
        Kind::U16,
        Kind::U32,
        Kind::U64,
        Kind::U128,
        Kind::U256,
        Kind::String,
        Kind::Bytes,
        Kind::Bytes32,
        Kind::Bytes65,
        Kind::Struct,
        Kind::List,
    ];

    /// Lower-case name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::U128 => "u128",
            Kind::U256 => "u256",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Bytes32 => "bytes32",
            Kind::Bytes65 => "bytes65",
            Kind::Struct => "struct",
            Kind::List => "list",
        }
    }

    /// Parses a kind name, ignoring case. Anything unrecognised is [`Kind::Nil`].
    ///
    /// # Arguments
    ///
    /// * `text: &str` - The name to parse.
    pub fn from_text(text: &str) -> Kind {
        let lower = text.to_ascii_lowercase();
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == lower)
            .unwrap_or(Kind::Nil)
    }

    /// Looks up a kind by its wire discriminant.
    ///
    /// # Arguments
    ///
    /// * `byte: u8` - The discriminant.
    pub fn from_u8(byte: u8) -> Option<Kind> { Kind::ALL.iter().copied().find(|k| *k as u8 == byte) }
}

impl Default for Kind {
    fn default() -> Self { Kind::Nil }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Kind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Kind, Infallible> { Ok(Kind::from_text(s)) }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> { s.serialize_str(self.name()) }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Kind, D::Error> {
        struct KindVisitor;

        impl<'de> de::Visitor<'de> for KindVisitor {
            type Value = Kind;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str("a kind name") }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Kind, E> { Ok(Kind::from_text(v)) }
        }

        d.deserialize_str(KindVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants() {
        let expected: [u8; 14] = [0, 1, 2, 3, 4, 5, 6, 7, 10, 11, 12, 13, 20, 21];
        for (kind, byte) in Kind::ALL.iter().zip(expected.iter()) {
            assert_eq!(*kind as u8, *byte);
            assert_eq!(Kind::from_u8(*byte), Some(*kind));
        }
        assert_eq!(Kind::from_u8(8), None);
        assert_eq!(Kind::from_u8(22), None);
    }

    #[test]
    fn names_round_trip() {
        for kind in Kind::ALL.iter() {
            assert_eq!(Kind::from_text(kind.name()), *kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn text_is_case_insensitive() {
        assert_eq!(Kind::from_text("STRUCT"), Kind::Struct);
        assert_eq!(Kind::from_text("U128"), Kind::U128);
        assert_eq!("List".parse::<Kind>(), Ok(Kind::List));
    }

    #[test]
    fn unknown_text_is_nil() {
        assert_eq!(Kind::from_text(""), Kind::Nil);
        assert_eq!(Kind::from_text("i64"), Kind::Nil);
    }

    #[test]
    fn json() {
        assert_eq!(serde_json::to_string(&Kind::Bytes32).unwrap(), "\"bytes32\"");
        let k: Kind = serde_json::from_str("\"u16\"").unwrap();
        assert_eq!(k, Kind::U16);
    }
}

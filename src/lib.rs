//! # pack
//!
//! Self-describing, strongly-kinded values with binary and JSON encodings.
//!
//! Every [`Value`] has a [`Kind`] from a small closed set and a [`Type`] that
//! describes its full shape. A type can rebuild a value from raw bytes or JSON, and
//! a [`Typed`] envelope ships a struct together with its own type so that a receiver
//! with no schema can decode it.
//!
//! # Usage
//!
//! The trait [`PackRep`](rep::PackRep) is used to specify how native data is converted
//! into a [`Value`]. It can usually be derived:
//!
//! ```
//! use pack::prelude::*;
//!
//! #[derive(PackRep, Debug, PartialEq)]
//! struct Block {
//!     height: u64,
//!     hash: [u8; 32],
//!     txs: Vec<Vec<u8>>,
//! }
//!
//! let block = Block {
//!     height: 12,
//!     hash: [0xab; 32],
//!     txs: vec![b"tx".to_vec()],
//! };
//!
//! // into the value model
//! let value = encode_value(&block).unwrap();
//! assert_eq!(value.kind(), Kind::Struct);
//!
//! // over the wire, with its type
//! let typed = Typed::new(value.into_struct().unwrap());
//! let bytes = encode_full(&typed);
//! let received: Typed = decode_full(&bytes, &DecodeConfig::default()).unwrap();
//!
//! // and back out again
//! let block2 = Block::from_value(&Value::from(received)).unwrap();
//! assert_eq!(block, block2);
//! ```
//!
//! # Kinds
//!
//! | Kind      | Byte | Binary                        | JSON                      |
//! | ---       | ---  | ---                           | ---                       |
//! | `nil`     | 0    | nothing                       | `null`                    |
//! | `bool`    | 1    | `0x00` or `0x01`              | boolean                   |
//! | `u8`      | 2    | 1 byte                        | decimal string            |
//! | `u16`     | 3    | 2 bytes, big-endian           | decimal string            |
//! | `u32`     | 4    | 4 bytes, big-endian           | decimal string            |
//! | `u64`     | 5    | 8 bytes, big-endian           | decimal string            |
//! | `u128`    | 6    | 16 bytes, big-endian          | decimal string            |
//! | `u256`    | 7    | 32 bytes, big-endian          | decimal string            |
//! | `string`  | 10   | `u32` length, UTF-8           | string                    |
//! | `bytes`   | 11   | `u32` length, raw bytes       | unpadded URL-safe base64  |
//! | `bytes32` | 12   | 32 bytes                      | unpadded URL-safe base64  |
//! | `bytes65` | 13   | 65 bytes                      | unpadded URL-safe base64  |
//! | `struct`  | 20   | field values in order         | object keyed by field     |
//! | `list`    | 21   | `u32` count, elements         | array                     |
//!
//! Struct field names and list element types are not part of a value's encoding; they
//! come from the [`Type`].
//!
//! ## Type descriptors
//!
//! A type is encoded as its kind byte. Struct types follow it with a `u32` field count
//! and, per field, a length-prefixed name and the field's type. List types follow it
//! with the element type. In JSON a leaf type is its kind name, and container types are
//! `{"struct": [{"name": type}, ...]}` and `{"list": type}`.
//!
//! ## Decode limits
//!
//! Binary decoding is bounded by [`DecodeConfig::max_bytes`](config::DecodeConfig),
//! 32 MiB by default. Every consumed byte counts against it, and a length or count
//! prefix that claims more than what is left is rejected before anything is read or
//! allocated. Counts are charged at the in-memory size of their entries, so a list of
//! zero-width elements cannot grow past the budget either.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]

extern crate self as pack;

#[macro_use]
pub mod util;

pub mod config;
pub mod encoding;
pub mod errors;
pub mod fixed;
pub mod json;
pub mod kind;
pub mod list;
pub mod prelude;
pub mod rep;
pub mod scalar;
pub mod structure;
pub mod typed;
pub mod types;
pub mod uint;

/// Derives [`PackRep`](rep::PackRep) for structs with named fields.
pub use pack_derive::PackRep;

use fixed::{Bytes32, Bytes65};
use kind::Kind;
use list::List;
use scalar::{U16, U32, U64, U8};
use std::fmt;
use structure::Struct;
use typed::Typed;
use types::Type;
use uint::{U128, U256};

#[derive(Clone, Debug, PartialEq)]
/// A value of any [`Kind`].
///
/// # Example
///
/// ```
/// use pack::prelude::*;
///
/// let v = Value::from(U32::new(3));
///
/// assert_eq!(v.kind(), Kind::U32);
/// assert_eq!(v.ty(), Type::U32);
/// assert_eq!(v.to_string(), "\"3\"");
/// ```
pub enum Value {
    /// The absence of a value.
    Nil,
    /// Boolean.
    Bool(bool),
    /// 8-bit unsigned integer.
    U8(U8),
    /// 16-bit unsigned integer.
    U16(U16),
    /// 32-bit unsigned integer.
    U32(U32),
    /// 64-bit unsigned integer.
    U64(U64),
    /// 128-bit unsigned integer.
    U128(U128),
    /// 256-bit unsigned integer.
    U256(U256),
    /// UTF-8 text.
    String(String),
    /// Arbitrary-length bytes.
    Bytes(bytes::Bytes),
    /// Exactly 32 bytes.
    Bytes32(Bytes32),
    /// Exactly 65 bytes.
    Bytes65(Bytes65),
    /// Ordered named fields.
    Struct(Struct),
    /// Homogeneous sequence.
    List(List),
}

impl Default for Value {
    fn default() -> Self { Value::Nil }
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::U128(_) => Kind::U128,
            Value::U256(_) => Kind::U256,
            Value::String(_) => Kind::String,
            Value::Bytes(_) => Kind::Bytes,
            Value::Bytes32(_) => Kind::Bytes32,
            Value::Bytes65(_) => Kind::Bytes65,
            Value::Struct(_) => Kind::Struct,
            Value::List(_) => Kind::List,
        }
    }

    /// The full type of this value. For structs and lists this includes field names and
    /// element types.
    pub fn ty(&self) -> Type {
        match self {
            Value::Struct(st) => st.ty(),
            Value::List(l) => l.ty(),
            // leaf kinds always have a leaf type
            other => Type::leaf(other.kind()).unwrap_or_default(),
        }
    }

    /// Exact size of this value's binary encoding.
    pub fn size_hint(&self) -> usize {
        use encoding::{constants::SIZE_LEN, Ser};
        match self {
            Value::Nil => 0,
            Value::Bool(_) => encoding::constants::SIZE_BOOL,
            Value::U8(u) => u.size_hint(),
            Value::U16(u) => u.size_hint(),
            Value::U32(u) => u.size_hint(),
            Value::U64(u) => u.size_hint(),
            Value::U128(u) => u.size_hint(),
            Value::U256(u) => u.size_hint(),
            Value::String(s) => SIZE_LEN + s.len(),
            Value::Bytes(bs) => SIZE_LEN + bs.len(),
            Value::Bytes32(bs) => bs.size_hint(),
            Value::Bytes65(bs) => bs.size_hint(),
            Value::Struct(st) => st.size_hint(),
            Value::List(l) => l.size_hint(),
        }
    }

    /// Whether this is [`Value::Nil`].
    pub fn is_nil(&self) -> bool { matches!(self, Value::Nil) }

    /// Returns the bool, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the raw bytes of a `bytes`, `bytes32` or `bytes65` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bs) => Some(bs),
            Value::Bytes32(bs) => Some(bs),
            Value::Bytes65(bs) => Some(bs),
            _ => None,
        }
    }

    /// Returns the struct, if this is one.
    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Value::Struct(st) => Some(st),
            _ => None,
        }
    }

    /// Consumes the value, returning the struct if this is one.
    pub fn into_struct(self) -> Option<Struct> {
        match self {
            Value::Struct(st) => Some(st),
            _ => None,
        }
    }

    /// Returns the list, if this is one.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

from_fn!(Value, bool, Value::Bool);
from_fn!(Value, U8, Value::U8);
from_fn!(Value, U16, Value::U16);
from_fn!(Value, U32, Value::U32);
from_fn!(Value, U64, Value::U64);
from_fn!(Value, U128, Value::U128);
from_fn!(Value, U256, Value::U256);
from_fn!(Value, String, Value::String);
from_fn!(Value, bytes::Bytes, Value::Bytes);
from_fn!(Value, Bytes32, Value::Bytes32);
from_fn!(Value, Bytes65, Value::Bytes65);
from_fn!(Value, Struct, Value::Struct);
from_fn!(Value, List, Value::List);
from_fn!(Value, Typed, |t: Typed| Value::Struct(t.into_inner()));

compose_from!(Value, U8, u8);
compose_from!(Value, U16, u16);
compose_from!(Value, U32, u32);
compose_from!(Value, U64, u64);
compose_from!(Value, U128, u128);
compose_from!(Value, bytes::Bytes, Vec<u8>);

impl From<&str> for Value {
    fn from(s: &str) -> Value { Value::String(s.to_owned()) }
}

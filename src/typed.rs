//! Self-describing struct envelopes.
//!
//! A [`Typed`] value is a [`Struct`] that is always serialized together with its own
//! [`Type`], so a receiver with no schema can still decode it. In binary the descriptor
//! comes first and the field values follow; in JSON the envelope is
//! `{"t": <type>, "v": <object>}`.
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! let typed = Typed::new(Struct::from_iter(vec![
//!     ("height", Value::from(U64::new(100))),
//!     ("hash", Value::from(Bytes32::default())),
//! ]));
//!
//! let bytes = encode_full(&typed);
//! let decoded: Typed = decode_full(&bytes, &DecodeConfig::default()).unwrap();
//!
//! assert_eq!(decoded, typed);
//! assert_eq!(decoded.get("height"), Some(&Value::from(U64::new(100))));
//! ```

use crate::{
    kind::Kind,
    structure::{Struct, StructField},
    types::Type,
    Value,
};
use std::{fmt, iter::FromIterator};

#[derive(Clone, Debug, PartialEq, Default)]
/// A [`Struct`] that carries its own type on the wire.
pub struct Typed(Struct);

impl Typed {
    /// Wraps a struct.
    pub fn new(inner: Struct) -> Self { Typed(inner) }

    /// Value of the first field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> { self.0.get(name) }

    /// Replaces the value of the first field called `name`; see [`Struct::set`].
    pub fn set(&mut self, name: &str, value: Value) -> Option<Value> { self.0.set(name, value) }

    /// The type of the wrapped struct.
    pub fn ty(&self) -> Type { self.0.ty() }

    /// Always [`Kind::Struct`].
    pub fn kind(&self) -> Kind { Kind::Struct }

    /// Borrows the wrapped struct.
    pub fn as_struct(&self) -> &Struct { &self.0 }

    /// Unwraps the struct.
    pub fn into_inner(self) -> Struct { self.0 }
}

impl From<Struct> for Typed {
    fn from(inner: Struct) -> Self { Typed(inner) }
}

impl From<Typed> for Struct {
    fn from(typed: Typed) -> Self { typed.0 }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Typed {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self { Typed(Struct::from_iter(iter)) }
}

impl FromIterator<StructField> for Typed {
    fn from_iter<I: IntoIterator<Item = StructField>>(iter: I) -> Self { Typed(Struct::from_iter(iter)) }
}

impl fmt::Display for Typed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

//! Type descriptors.
//!
//! A [`Type`] mirrors the [`Kind`] tree. Leaf types carry nothing, a struct type carries
//! its ordered `(name, type)` pairs and a list type carries its element type. Given a
//! type, raw bytes or JSON can be turned back into a [`Value`].
//!
//! Two types are equal when their binary descriptors are byte-identical, so struct types
//! compare structurally and field order matters.
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! let ty = Type::Struct(StructType::from_iter(vec![
//!     TypeField::new("id", Type::U64),
//!     TypeField::new("tags", Type::List(Box::new(Type::String))),
//! ]));
//!
//! // descriptors round trip through their own binary form
//! let bytes = marshal_type(&ty);
//! let decoded = unmarshal_type(&bytes, &DecodeConfig::default()).unwrap();
//! assert!(decoded.equals(&ty));
//!
//! // and through JSON
//! assert_eq!(ty.to_string(), r#"{"struct":[{"id":"u64"},{"tags":{"list":"string"}}]}"#);
//! ```

use crate::{
    config::DecodeConfig,
    encoding::{constants::{SIZE_KIND, SIZE_LEN}, decode_full, encode_full, Decoder},
    errors::DecodingError,
    json,
    kind::Kind,
    Value,
};
use std::{fmt, iter::FromIterator, slice};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// A recursive descriptor of the shape of a [`Value`].
pub enum Type {
    /// The type of [`Value::Nil`].
    Nil,
    /// `bool`
    Bool,
    /// [`U8`](crate::scalar::U8)
    U8,
    /// [`U16`](crate::scalar::U16)
    U16,
    /// [`U32`](crate::scalar::U32)
    U32,
    /// [`U64`](crate::scalar::U64)
    U64,
    /// [`U128`](crate::uint::U128)
    U128,
    /// [`U256`](crate::uint::U256)
    U256,
    /// UTF-8 text.
    String,
    /// Arbitrary-length bytes.
    Bytes,
    /// [`Bytes32`](crate::fixed::Bytes32)
    Bytes32,
    /// [`Bytes65`](crate::fixed::Bytes65)
    Bytes65,
    /// A struct with the given fields.
    Struct(StructType),
    /// A list of the given element type.
    List(Box<Type>),
}

impl Default for Type {
    fn default() -> Self { Type::Nil }
}

impl Type {
    /// Returns the leaf type of `kind`, or `None` for [`Kind::Struct`] and
    /// [`Kind::List`], which need a body.
    pub fn leaf(kind: Kind) -> Option<Type> {
        let ty = match kind {
            Kind::Nil => Type::Nil,
            Kind::Bool => Type::Bool,
            Kind::U8 => Type::U8,
            Kind::U16 => Type::U16,
            Kind::U32 => Type::U32,
            Kind::U64 => Type::U64,
            Kind::U128 => Type::U128,
            Kind::U256 => Type::U256,
            Kind::String => Type::String,
            Kind::Bytes => Type::Bytes,
            Kind::Bytes32 => Type::Bytes32,
            Kind::Bytes65 => Type::Bytes65,
            Kind::Struct | Kind::List => return None,
        };
        Some(ty)
    }

    /// The kind this type describes.
    pub fn kind(&self) -> Kind {
        match self {
            Type::Nil => Kind::Nil,
            Type::Bool => Kind::Bool,
            Type::U8 => Kind::U8,
            Type::U16 => Kind::U16,
            Type::U32 => Kind::U32,
            Type::U64 => Kind::U64,
            Type::U128 => Kind::U128,
            Type::U256 => Kind::U256,
            Type::String => Kind::String,
            Type::Bytes => Kind::Bytes,
            Type::Bytes32 => Kind::Bytes32,
            Type::Bytes65 => Kind::Bytes65,
            Type::Struct(_) => Kind::Struct,
            Type::List(_) => Kind::List,
        }
    }

    /// Compares the binary descriptors of two types.
    ///
    /// # Arguments
    ///
    /// * `other: &Type` - The type to compare against.
    pub fn equals(&self, other: &Type) -> bool { encode_full(self) == encode_full(other) }

    /// Decodes a value of this type from its binary encoding.
    ///
    /// # Arguments
    ///
    /// * `data: &[u8]` - The encoded value.
    /// * `cfg: &DecodeConfig` - Limits on the decode.
    ///
    /// # Example
    ///
    /// ```
    /// use pack::prelude::*;
    ///
    /// let value = Type::U16.unmarshal_value(&[0x01, 0x02], &DecodeConfig::default()).unwrap();
    ///
    /// assert_eq!(value, Value::from(U16::new(0x0102)));
    /// ```
    pub fn unmarshal_value(&self, data: &[u8], cfg: &DecodeConfig) -> Result<Value, DecodingError> {
        Decoder::new(data, cfg).read_value(self)
    }

    /// Decodes a value of this type from JSON.
    ///
    /// # Arguments
    ///
    /// * `data: &[u8]` - The JSON text.
    ///
    /// # Example
    ///
    /// ```
    /// use pack::prelude::*;
    ///
    /// let ty = Type::List(Box::new(Type::U128));
    /// let value = ty.unmarshal_value_json(br#"["1", "2"]"#).unwrap();
    ///
    /// assert_eq!(value.to_string(), r#"["1","2"]"#);
    /// ```
    pub fn unmarshal_value_json(&self, data: &[u8]) -> Result<Value, DecodingError> {
        let raw: serde_json::Value = serde_json::from_slice(data)?;
        json::value_from_json(self, &raw)
    }

    /// Exact size of this descriptor's binary encoding.
    pub fn size_hint(&self) -> usize {
        match self {
            Type::Struct(st) => {
                SIZE_KIND
                    + SIZE_LEN
                    + st
                        .iter()
                        .map(|f| SIZE_LEN + f.name.len() + f.ty.size_hint())
                        .sum::<usize>()
            }
            Type::List(elem) => SIZE_KIND + elem.size_hint(),
            _ => SIZE_KIND,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// One named field of a [`StructType`].
pub struct TypeField {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: Type,
}

impl TypeField {
    /// Creates a field.
    pub fn new<S: Into<String>>(name: S, ty: Type) -> Self {
        TypeField {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
/// The ordered fields of a struct type.
pub struct StructType(Vec<TypeField>);

impl StructType {
    /// Creates a struct type from its fields, keeping their order.
    pub fn new(fields: Vec<TypeField>) -> Self { StructType(fields) }

    /// The fields, in order.
    pub fn fields(&self) -> &[TypeField] { &self.0 }

    /// Iterates over the fields in order.
    pub fn iter(&self) -> slice::Iter<TypeField> { self.0.iter() }

    /// Number of fields.
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the struct type has no fields.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Type of the first field called `name`.
    pub fn get(&self, name: &str) -> Option<&Type> { self.0.iter().find(|f| f.name == name).map(|f| &f.ty) }
}

impl FromIterator<TypeField> for StructType {
    fn from_iter<I: IntoIterator<Item = TypeField>>(iter: I) -> Self { StructType(iter.into_iter().collect()) }
}

impl<'a> IntoIterator for &'a StructType {
    type IntoIter = slice::Iter<'a, TypeField>;
    type Item = &'a TypeField;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Encodes a type descriptor: its kind byte, then for structs the field count and each
/// `(name, type)` pair, and for lists the element type.
///
/// # Arguments
///
/// * `ty: &Type` - The descriptor to encode.
pub fn marshal_type(ty: &Type) -> Vec<u8> { encode_full(ty) }

/// Decodes a type descriptor written by [`marshal_type`]. Trailing bytes are ignored.
///
/// # Arguments
///
/// * `data: &[u8]` - The encoded descriptor.
/// * `cfg: &DecodeConfig` - Limits on the decode.
pub fn unmarshal_type(data: &[u8], cfg: &DecodeConfig) -> Result<Type, DecodingError> { decode_full(data, cfg) }

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Type {
        Type::Struct(StructType::from_iter(vec![
            TypeField::new("a", Type::Bytes32),
            TypeField::new(
                "b",
                Type::List(Box::new(Type::Struct(StructType::from_iter(vec![TypeField::new(
                    "c",
                    Type::U256,
                )])))),
            ),
        ]))
    }

    #[test]
    fn leaf_descriptor_is_kind_byte() {
        assert_eq!(marshal_type(&Type::U64), vec![5]);
        assert_eq!(marshal_type(&Type::Nil), vec![0]);
    }

    #[test]
    fn struct_descriptor_layout() {
        let ty = Type::Struct(StructType::from_iter(vec![TypeField::new("ab", Type::Bool)]));
        assert_eq!(marshal_type(&ty), vec![20, 0, 0, 0, 1, 0, 0, 0, 2, b'a', b'b', 1]);
        assert_eq!(
            marshal_type(&Type::List(Box::new(Type::U8))),
            vec![21, 2]
        );
    }

    #[test]
    fn size_hint_is_exact() {
        let ty = nested();
        assert_eq!(ty.size_hint(), marshal_type(&ty).len());
    }

    #[test]
    fn equality_is_structural() {
        assert!(nested().equals(&nested()));
        assert!(!nested().equals(&Type::List(Box::new(Type::Bytes32))));

        let a = Type::Struct(StructType::from_iter(vec![TypeField::new("x", Type::U8)]));
        let b = Type::Struct(StructType::from_iter(vec![TypeField::new("y", Type::U8)]));
        assert!(!a.equals(&b));
    }

    #[test]
    fn binary_round_trip() {
        let cfg = DecodeConfig::default();
        let ty = nested();
        assert_eq!(unmarshal_type(&marshal_type(&ty), &cfg), Ok(ty));
    }

    #[test]
    fn unknown_kind_byte() {
        let cfg = DecodeConfig::default();
        assert_eq!(unmarshal_type(&[9], &cfg), Err(DecodingError::UnsupportedKind(9)));
    }

    #[test]
    fn leaf_of_container_kinds() {
        assert_eq!(Type::leaf(Kind::Struct), None);
        assert_eq!(Type::leaf(Kind::Bytes65), Some(Type::Bytes65));
    }
}

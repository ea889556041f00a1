//! JSON encoding.
//!
//! Values serialize through `serde`: integers of every width as decimal strings, byte
//! values as unpadded URL-safe base64, structs as objects and lists as arrays. Decoding a
//! value needs its [`Type`], see [`Type::unmarshal_value_json`]; type descriptors and
//! [`Typed`] envelopes describe themselves and implement [`Deserialize`].
//!
//! Type descriptors are written as a bare kind name for leaf types, `{"struct": [{name:
//! type}, ...]}` for structs and `{"list": type}` for lists.

use crate::{
    encoding::constants::MAX_DEPTH,
    errors::DecodingError,
    fixed::FixedBytes,
    kind::Kind,
    list::List,
    structure::{Struct, StructField},
    typed::Typed,
    types::{StructType, Type, TypeField},
    Value,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value as Json};
use std::str::FromStr;
use tracing::debug;

const KEY_STRUCT: &str = "struct";
const KEY_LIST: &str = "list";
const KEY_TYPE: &str = "t";
const KEY_VALUE: &str = "v";

/// Unpadded URL-safe base64.
pub fn encode_base64(bytes: &[u8]) -> String { URL_SAFE_NO_PAD.encode(bytes) }

/// Decodes unpadded URL-safe base64.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, DecodingError> {
    URL_SAFE_NO_PAD
        .decode(text)
        .map_err(|e| DecodingError::Malformed(e.to_string()))
}

/// Checks that `x` is within `[0, 2^bits - 1]`.
pub(crate) fn check_bounds(x: &BigInt, bits: u64) -> Result<BigUint, DecodingError> {
    if x.sign() == Sign::Minus {
        return Err(DecodingError::Underflow(x.to_string()));
    }
    let magnitude = x.magnitude();
    if magnitude.bits() > bits {
        return Err(DecodingError::Overflow(x.to_string()));
    }
    Ok(magnitude.clone())
}

/// Parses a base-10 integer string into an unsigned integer of at most `bits` bits.
///
/// Negative numbers report [`DecodingError::Underflow`], numbers that are too wide
/// [`DecodingError::Overflow`], and anything that is not an optionally-signed run of
/// ASCII digits [`DecodingError::Malformed`].
///
/// # Example
///
/// ```
/// use num_bigint::BigUint;
/// use pack::{json::parse_decimal, prelude::*};
///
/// assert_eq!(parse_decimal("255", 8).unwrap(), BigUint::from(255u32));
/// assert!(matches!(parse_decimal("256", 8), Err(DecodingError::Overflow(_))));
/// assert!(matches!(parse_decimal("-1", 8), Err(DecodingError::Underflow(_))));
/// assert!(matches!(parse_decimal("0x10", 8), Err(DecodingError::Malformed(_))));
/// ```
pub fn parse_decimal(text: &str, bits: u64) -> Result<BigUint, DecodingError> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodingError::Malformed(text.to_owned()));
    }
    let x = BigInt::from_str(text).map_err(|_| DecodingError::Malformed(text.to_owned()))?;
    check_bounds(&x, bits)
}

pub(crate) fn parse_primitive<T: FromPrimitive>(text: &str) -> Result<T, DecodingError> {
    let bits = (std::mem::size_of::<T>() * 8) as u64;
    parse_decimal(text, bits)?
        .to_u64()
        .and_then(T::from_u64)
        .ok_or_else(|| DecodingError::Overflow(text.to_owned()))
}

fn json_kind(raw: &Json) -> &'static str {
    match raw {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn mismatch(expected: &str, raw: &Json) -> DecodingError {
    DecodingError::Json(format!("expected {}, found {}", expected, json_kind(raw)))
}

fn as_str<'a>(raw: &'a Json) -> Result<&'a str, DecodingError> { raw.as_str().ok_or_else(|| mismatch("string", raw)) }

fn single_entry<'a>(obj: &'a Map<String, Json>) -> Result<(&'a String, &'a Json), DecodingError> {
    match obj.iter().next() {
        Some(entry) if obj.len() == 1 => Ok(entry),
        _ => Err(DecodingError::Json(format!(
            "expected an object with one key, found {} keys",
            obj.len()
        ))),
    }
}

/// Builds a type descriptor from its JSON form.
pub fn type_from_json(raw: &Json) -> Result<Type, DecodingError> { type_from_json_at(raw, 0) }

fn type_from_json_at(raw: &Json, depth: usize) -> Result<Type, DecodingError> {
    if depth > MAX_DEPTH {
        return Err(DecodingError::DepthExceeded(MAX_DEPTH));
    }
    match raw {
        Json::String(name) => {
            let kind = Kind::from_text(name);
            if kind == Kind::Nil && !name.eq_ignore_ascii_case(Kind::Nil.name()) {
                debug!(name = name.as_str(), "unknown kind name");
                return Err(DecodingError::UnknownKind(name.clone()));
            }
            Type::leaf(kind).ok_or_else(|| DecodingError::Json(format!("kind {} needs a body", kind)))
        }
        Json::Object(obj) => {
            let (key, body) = single_entry(obj)?;
            match Kind::from_text(key) {
                Kind::Struct => {
                    let fields = body.as_array().ok_or_else(|| mismatch("array", body))?;
                    fields
                        .iter()
                        .map(|field| -> Result<TypeField, DecodingError> {
                            let obj = field.as_object().ok_or_else(|| mismatch("object", field))?;
                            let (name, ty) = single_entry(obj)?;
                            Ok(TypeField::new(name.clone(), type_from_json_at(ty, depth + 1)?))
                        })
                        .collect::<Result<StructType, DecodingError>>()
                        .map(Type::Struct)
                }
                Kind::List => Ok(Type::List(Box::new(type_from_json_at(body, depth + 1)?))),
                _ => Err(DecodingError::UnknownKind(key.clone())),
            }
        }
        other => Err(mismatch("type descriptor", other)),
    }
}

/// Builds a value of type `ty` from its JSON form.
pub fn value_from_json(ty: &Type, raw: &Json) -> Result<Value, DecodingError> {
    let value = match ty {
        Type::Nil => match raw {
            Json::Null => Value::Nil,
            other => return Err(mismatch("null", other)),
        },
        Type::Bool => Value::Bool(raw.as_bool().ok_or_else(|| mismatch("bool", raw))?),
        Type::U8 => Value::U8(parse_primitive::<u8>(as_str(raw)?)?.into()),
        Type::U16 => Value::U16(parse_primitive::<u16>(as_str(raw)?)?.into()),
        Type::U32 => Value::U32(parse_primitive::<u32>(as_str(raw)?)?.into()),
        Type::U64 => Value::U64(parse_primitive::<u64>(as_str(raw)?)?.into()),
        Type::U128 => Value::U128(uint_from_json(raw, 128)?),
        Type::U256 => Value::U256(uint_from_json(raw, 256)?),
        Type::String => Value::String(as_str(raw)?.to_owned()),
        Type::Bytes => Value::Bytes(decode_base64(as_str(raw)?)?.into()),
        Type::Bytes32 => Value::Bytes32(FixedBytes::from_slice(&decode_base64(as_str(raw)?)?)?),
        Type::Bytes65 => Value::Bytes65(FixedBytes::from_slice(&decode_base64(as_str(raw)?)?)?),
        Type::Struct(st) => Value::Struct(struct_from_json(st, raw)?),
        Type::List(elem) => Value::List(list_from_json(elem, raw)?),
    };
    Ok(value)
}

fn uint_from_json<T>(raw: &Json, bits: u64) -> Result<T, DecodingError>
where
    T: std::convert::TryFrom<BigInt, Error = DecodingError>,
{
    let x = parse_decimal(as_str(raw)?, bits)?;
    T::try_from(BigInt::from(x))
}

fn struct_from_json(st: &StructType, raw: &Json) -> Result<Struct, DecodingError> {
    let obj = raw.as_object().ok_or_else(|| mismatch("object", raw))?;
    st.iter()
        .map(|field| {
            let raw = obj
                .get(&field.name)
                .ok_or_else(|| DecodingError::MissingField(field.name.clone()))?;
            value_from_json(&field.ty, raw)
                .map(|value| StructField::new(field.name.clone(), value))
                .map_err(|e| DecodingError::field(&field.name, e))
        })
        .collect()
}

fn list_from_json(elem: &Type, raw: &Json) -> Result<List, DecodingError> {
    let items = raw.as_array().ok_or_else(|| mismatch("array", raw))?;
    if elem.kind() == Kind::Nil {
        return match items.len() {
            0 => Ok(List::empty(Type::Nil)),
            _ => Err(DecodingError::UnknownElementType),
        };
    }
    let elems = items
        .iter()
        .enumerate()
        .map(|(i, item)| value_from_json(elem, item).map_err(|e| DecodingError::element(i, e)))
        .collect::<Result<Vec<Value>, DecodingError>>()?;
    Ok(List::from_parts(elem.clone(), elems))
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => s.serialize_unit(),
            Value::Bool(b) => s.serialize_bool(*b),
            Value::U8(u) => u.serialize(s),
            Value::U16(u) => u.serialize(s),
            Value::U32(u) => u.serialize(s),
            Value::U64(u) => u.serialize(s),
            Value::U128(u) => u.serialize(s),
            Value::U256(u) => u.serialize(s),
            Value::String(st) => s.serialize_str(st),
            Value::Bytes(bs) => s.serialize_str(&encode_base64(bs)),
            Value::Bytes32(bs) => bs.serialize(s),
            Value::Bytes65(bs) => bs.serialize(s),
            Value::Struct(st) => st.serialize(s),
            Value::List(l) => l.serialize(s),
        }
    }
}

impl Serialize for Struct {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.len()))?;
        for field in self {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(self.len()))?;
        for elem in self {
            seq.serialize_element(elem)?;
        }
        seq.end()
    }
}

struct FieldTypes<'a>(&'a StructType);

impl<'a> Serialize for FieldTypes<'a> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(self.0.len()))?;
        for field in self.0 {
            seq.serialize_element(&SingleEntry(&field.name, &field.ty))?;
        }
        seq.end()
    }
}

struct SingleEntry<'a, V>(&'a str, &'a V);

impl<'a, V: Serialize> Serialize for SingleEntry<'a, V> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Type::Struct(st) => SingleEntry(KEY_STRUCT, &FieldTypes(st)).serialize(s),
            Type::List(elem) => SingleEntry(KEY_LIST, elem.as_ref()).serialize(s),
            leaf => s.serialize_str(leaf.kind().name()),
        }
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Type, D::Error> {
        let raw = Json::deserialize(d)?;
        type_from_json(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Typed {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(2))?;
        map.serialize_entry(KEY_TYPE, &self.ty())?;
        map.serialize_entry(KEY_VALUE, self.as_struct())?;
        map.end()
    }
}

/// Builds a typed envelope from its JSON form.
pub fn typed_from_json(raw: &Json) -> Result<Typed, DecodingError> {
    let obj = raw.as_object().ok_or_else(|| mismatch("object", raw))?;
    let ty = obj
        .get(KEY_TYPE)
        .ok_or_else(|| DecodingError::MissingField(KEY_TYPE.to_owned()))?;
    let st = match type_from_json(ty)? {
        Type::Struct(st) => st,
        other => {
            debug!(kind = %other.kind(), "typed envelope is not a struct");
            return Err(DecodingError::NotAStruct(other.kind()));
        }
    };
    let value = obj
        .get(KEY_VALUE)
        .ok_or_else(|| DecodingError::MissingField(KEY_VALUE.to_owned()))?;
    Ok(Typed::new(struct_from_json(&st, value)?))
}

impl<'de> Deserialize<'de> for Typed {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Typed, D::Error> {
        let raw = Json::deserialize(d)?;
        typed_from_json(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scalar::{U16, U64},
        uint::{U128, U256},
    };
    use std::iter::FromIterator;

    fn decode(ty: &Type, text: &str) -> Result<Value, DecodingError> { ty.unmarshal_value_json(text.as_bytes()) }

    #[test]
    fn scalars() {
        assert_eq!(Value::from(U16::new(500)).to_string(), r#""500""#);
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Nil.to_string(), "null");
        assert_eq!(decode(&Type::U16, r#""500""#), Ok(Value::from(U16::new(500))));
        assert_eq!(decode(&Type::Nil, "null"), Ok(Value::Nil));
    }

    #[test]
    fn integers_must_be_strings() {
        assert!(matches!(decode(&Type::U64, "5"), Err(DecodingError::Json(_))));
    }

    #[test]
    fn integer_bounds() {
        assert!(matches!(decode(&Type::U16, r#""65536""#), Err(DecodingError::Overflow(_))));
        assert!(matches!(decode(&Type::U8, r#""-3""#), Err(DecodingError::Underflow(_))));
        assert!(matches!(decode(&Type::U64, r#""1e3""#), Err(DecodingError::Malformed(_))));
        assert!(matches!(decode(&Type::U128, r#""+1""#), Err(DecodingError::Malformed(_))));
        assert!(matches!(decode(&Type::U256, r#""""#), Err(DecodingError::Malformed(_))));

        let max = U256::max_value().to_string();
        assert_eq!(decode(&Type::U256, &format!("\"{}\"", max)), Ok(Value::from(U256::max_value())));
        assert!(matches!(
            decode(&Type::U128, &format!("\"{}\"", max)),
            Err(DecodingError::Overflow(_))
        ));
    }

    #[test]
    fn bytes_are_unpadded_url_safe() {
        let v = Value::from(vec![0xfbu8, 0xff]);
        assert_eq!(v.to_string(), r#""-_8""#);
        assert_eq!(decode(&Type::Bytes, r#""-_8""#), Ok(v));
        assert!(matches!(decode(&Type::Bytes, r#""+/8=""#), Err(DecodingError::Malformed(_))));
    }

    #[test]
    fn fixed_length_mismatch() {
        let text = format!("\"{}\"", encode_base64(&[0u8; 31]));
        let err = decode(&Type::Bytes32, &text).unwrap_err();
        assert_eq!(err, DecodingError::LengthMismatch { expected: 32, got: 31 });
        assert_eq!(err.to_string(), "expected len=32, got len=31");
    }

    #[test]
    fn structs_need_typed_fields_only() {
        let ty = Type::Struct(StructType::from_iter(vec![
            TypeField::new("a", Type::U64),
            TypeField::new("b", Type::String),
        ]));
        let v = decode(&ty, r#"{"b": "x", "extra": 1, "a": "3"}"#).unwrap();
        let expected = Struct::from_iter(vec![("a", Value::from(U64::new(3))), ("b", Value::from("x"))]);
        assert_eq!(v, Value::from(expected));

        assert_eq!(
            decode(&ty, r#"{"a": "3"}"#),
            Err(DecodingError::MissingField("b".to_owned()))
        );
    }

    #[test]
    fn nested_errors_have_context() {
        let ty = Type::Struct(StructType::from_iter(vec![TypeField::new(
            "xs",
            Type::List(Box::new(Type::U128)),
        )]));
        let err = decode(&ty, r#"{"xs": ["1", "x"]}"#).unwrap_err();
        assert_eq!(err.root(), &DecodingError::Malformed("x".to_owned()));
        match err {
            DecodingError::Field { name, inner } => {
                assert_eq!(name, "xs");
                assert!(matches!(*inner, DecodingError::Element { index: 1, .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_list_keeps_type() {
        let ty = Type::List(Box::new(Type::U128));
        assert_eq!(decode(&ty, "[]"), Ok(Value::from(List::empty(Type::U128))));
        let untyped = Type::List(Box::new(Type::Nil));
        assert_eq!(decode(&untyped, "[]"), Ok(Value::from(List::empty(Type::Nil))));
        assert_eq!(decode(&untyped, "[null]"), Err(DecodingError::UnknownElementType));
    }

    #[test]
    fn type_descriptors() {
        let ty = Type::List(Box::new(Type::Struct(StructType::from_iter(vec![TypeField::new(
            "h",
            Type::Bytes32,
        )]))));
        let text = serde_json::to_string(&ty).unwrap();
        assert_eq!(text, r#"{"list":{"struct":[{"h":"bytes32"}]}}"#);
        assert_eq!(serde_json::from_str::<Type>(&text).unwrap(), ty);
    }

    #[test]
    fn type_names_are_strict() {
        assert_eq!(type_from_json(&Json::from("NIL")), Ok(Type::Nil));
        assert_eq!(type_from_json(&Json::from("U128")), Ok(Type::U128));
        assert_eq!(
            type_from_json(&Json::from("float")),
            Err(DecodingError::UnknownKind("float".to_owned()))
        );
        assert!(type_from_json(&Json::from("struct")).is_err());
        assert!(type_from_json(&serde_json::json!({"list": "u8", "struct": []})).is_err());
    }

    #[test]
    fn typed_round_trip() {
        let typed = Typed::from_iter(vec![
            ("n", Value::from(U128::from(5u128))),
            ("s", Value::from("x")),
        ]);
        let text = serde_json::to_string(&typed).unwrap();
        assert_eq!(serde_json::from_str::<Typed>(&text).unwrap(), typed);
    }

    #[test]
    fn typed_requires_struct() {
        let raw = serde_json::json!({"t": {"list": "u8"}, "v": []});
        assert_eq!(typed_from_json(&raw), Err(DecodingError::NotAStruct(Kind::List)));
        assert_eq!(
            DecodingError::NotAStruct(Kind::List).to_string(),
            r#"expected kind "struct", got kind "list""#
        );
    }
}

//! Conversion between native Rust types and [`Value`]s.
//!
//! [`PackRep`] maps a native type onto the value model. It is implemented here for
//! `bool`, the unsigned integers, strings, byte buffers, 32- and 65-byte arrays, vectors
//! and the model types themselves, and can be derived for structs with named fields.
//!
//! Derived structs map to [`Struct`]s with one field per struct field, in declaration
//! order. The wire name of a field is its identifier unless overridden:
//!
//! * `#[pack(rename = "name")]` uses `name` instead,
//! * `#[pack(skip)]` leaves the field out entirely,
//! * `#[pack(omitempty)]` is accepted and does not change the name.
//!
//! Decoding a struct tolerates schema drift. Fields the destination has but the source
//! lacks keep their current value, and source fields the destination does not know are
//! ignored.
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! #[derive(PackRep, Debug, PartialEq, Default)]
//! struct Old {
//!     foo: u64,
//! }
//!
//! #[derive(PackRep, Debug, PartialEq, Default)]
//! struct New {
//!     foo: u64,
//!     #[pack(rename = "bar_v2")]
//!     bar: String,
//! }
//!
//! let value = encode_value(&Old { foo: 1 }).unwrap();
//!
//! let mut new = New::default();
//! decode_value(&mut new, &value).unwrap();
//!
//! assert_eq!(new, New { foo: 1, bar: String::new() });
//! ```

use crate::{
    errors::ConversionError,
    fixed::{Bytes32, Bytes65, FixedBytes},
    kind::Kind,
    list::List,
    scalar::{U16, U32, U64, U8},
    structure::Struct,
    typed::Typed,
    types::{StructType, Type},
    uint::{U128, U256},
    util::panic_message,
    Value,
};
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

/// A native type representable as a [`Value`].
pub trait PackRep: Sized {
    /// The [`Type`] of the values this type converts to.
    ///
    /// Types whose shape is only known at runtime, such as [`Value`] itself, report the
    /// most specific type they can: [`Type::Nil`] for [`Value`] and an empty struct or
    /// untyped list for [`Struct`], [`Typed`] and [`List`].
    fn rep_type() -> Type;

    /// Converts `self` into a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use pack::prelude::*;
    ///
    /// assert_eq!(7u16.to_value().unwrap(), Value::from(U16::new(7)));
    /// ```
    fn to_value(&self) -> Result<Value, ConversionError>;

    /// Overwrites `self` with the contents of `value`. Structs keep the current value of
    /// any field that `value` does not mention.
    ///
    /// # Arguments
    ///
    /// * `value: &Value` - The value to read from.
    fn unpack(&mut self, value: &Value) -> Result<(), ConversionError>;

    /// The zero value of this type, the starting point for [`PackRep::from_value`].
    fn zero() -> Self;

    /// Builds a new `Self` from `value`, starting from [`PackRep::zero`].
    ///
    /// # Example
    ///
    /// ```
    /// use pack::prelude::*;
    ///
    /// let s = String::from_value(&Value::from("hi")).unwrap();
    /// assert_eq!(s, "hi");
    ///
    /// assert!(bool::from_value(&Value::from("hi")).is_err());
    /// ```
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        let mut out = Self::zero();
        out.unpack(value)?;
        Ok(out)
    }

    #[doc(hidden)]
    fn vec_rep_type() -> Type { Type::List(Box::new(Self::rep_type())) }

    #[doc(hidden)]
    fn vec_to_value(items: &[Self]) -> Result<Value, ConversionError> {
        if items.is_empty() {
            return Ok(Value::List(List::empty(Self::rep_type())));
        }
        let elems = items
            .iter()
            .enumerate()
            .map(|(i, item)| item.to_value().map_err(|e| ConversionError::element(i, e)))
            .collect::<Result<Vec<Value>, ConversionError>>()?;
        Ok(Value::List(List::new(align_empty_lists(elems))?))
    }

    #[doc(hidden)]
    fn vec_from_value(value: &Value) -> Result<Vec<Self>, ConversionError> {
        match value {
            Value::List(list) => list
                .iter()
                .enumerate()
                .map(|(i, elem)| Self::from_value(elem).map_err(|e| ConversionError::element(i, e)))
                .collect(),
            other => Err(ConversionError::unexpected(Kind::List, other.kind())),
        }
    }
}

/// Empty inner lists take the element type of their first non-empty sibling, so that
/// `vec![vec![], vec![x]]` forms one homogeneous list.
fn align_empty_lists(mut elems: Vec<Value>) -> Vec<Value> {
    let target = elems.iter().find_map(|v| match v {
        Value::List(l) if !l.is_empty() => Some(l.elem_type().clone()),
        _ => None,
    });
    if let Some(target) = target {
        for v in elems.iter_mut() {
            if let Value::List(l) = v {
                if l.is_empty() {
                    *l = List::empty(target.clone());
                }
            }
        }
    }
    elems
}

fn guarded<T, F>(f: F) -> Result<T, ConversionError>
where
    F: FnOnce() -> Result<T, ConversionError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(res) => res,
        Err(payload) => {
            let msg = panic_message(&*payload);
            warn!(panic = msg.as_str(), "recovered from panic during conversion");
            Err(ConversionError::Panicked(msg))
        }
    }
}

/// Converts a native value into a [`Value`].
///
/// Any panic raised during the conversion, such as an arithmetic overflow inside a
/// hand-written [`PackRep`] impl, is caught and reported as
/// [`ConversionError::Panicked`].
///
/// # Arguments
///
/// * `t: &T` - The value to convert.
pub fn encode_value<T: PackRep>(t: &T) -> Result<Value, ConversionError> { guarded(|| t.to_value()) }

/// Unpacks `value` into `dst`; see [`PackRep::unpack`].
///
/// Any panic raised during the conversion is caught and reported as
/// [`ConversionError::Panicked`]. `dst` may be partially updated when an error is
/// returned.
///
/// # Arguments
///
/// * `dst: &mut T` - The destination.
/// * `value: &Value` - The value to read from.
pub fn decode_value<T: PackRep>(dst: &mut T, value: &Value) -> Result<(), ConversionError> {
    guarded(|| dst.unpack(value))
}

macro_rules! rep_scalar {
    ($prim:ty, $model:ident, $zero:expr) => {
        impl PackRep for $prim {
            fn rep_type() -> Type { Type::$model }

            fn to_value(&self) -> Result<Value, ConversionError> { Ok(Value::$model(self.clone().into())) }

            fn unpack(&mut self, value: &Value) -> Result<(), ConversionError> {
                match value {
                    Value::$model(x) => {
                        *self = x.clone().into();
                        Ok(())
                    }
                    other => Err(ConversionError::unexpected(Kind::$model, other.kind())),
                }
            }

            fn zero() -> Self { $zero }
        }
    };
}

rep_scalar!(bool, Bool, false);
rep_scalar!(u16, U16, 0);
rep_scalar!(u32, U32, 0);
rep_scalar!(u64, U64, 0);
rep_scalar!(U8, U8, U8::ZERO);
rep_scalar!(U16, U16, U16::ZERO);
rep_scalar!(U32, U32, U32::ZERO);
rep_scalar!(U64, U64, U64::ZERO);
rep_scalar!(U128, U128, U128::zero());
rep_scalar!(U256, U256, U256::zero());
rep_scalar!(Bytes32, Bytes32, FixedBytes::default());
rep_scalar!(Bytes65, Bytes65, FixedBytes::default());
rep_scalar!([u8; 32], Bytes32, [0u8; 32]);
rep_scalar!([u8; 65], Bytes65, [0u8; 65]);
rep_scalar!(String, String, String::new());
rep_scalar!(::bytes::Bytes, Bytes, ::bytes::Bytes::new());

impl PackRep for u128 {
    fn rep_type() -> Type { Type::U128 }

    fn to_value(&self) -> Result<Value, ConversionError> { Ok(Value::U128(U128::from(*self))) }

    fn unpack(&mut self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::U128(x) => {
                *self = u128::from(x);
                Ok(())
            }
            other => Err(ConversionError::unexpected(Kind::U128, other.kind())),
        }
    }

    fn zero() -> Self { 0 }
}

impl PackRep for u8 {
    fn rep_type() -> Type { Type::U8 }

    fn to_value(&self) -> Result<Value, ConversionError> { Ok(Value::U8(U8::new(*self))) }

    fn unpack(&mut self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::U8(x) => {
                *self = x.get();
                Ok(())
            }
            other => Err(ConversionError::unexpected(Kind::U8, other.kind())),
        }
    }

    fn zero() -> Self { 0 }

    fn vec_rep_type() -> Type { Type::Bytes }

    fn vec_to_value(items: &[u8]) -> Result<Value, ConversionError> {
        Ok(Value::Bytes(::bytes::Bytes::copy_from_slice(items)))
    }

    fn vec_from_value(value: &Value) -> Result<Vec<u8>, ConversionError> {
        match value {
            Value::Bytes(bs) => Ok(bs.to_vec()),
            other => Err(ConversionError::unexpected(Kind::Bytes, other.kind())),
        }
    }
}

impl<T: PackRep> PackRep for Vec<T> {
    fn rep_type() -> Type { T::vec_rep_type() }

    fn to_value(&self) -> Result<Value, ConversionError> { T::vec_to_value(self) }

    fn unpack(&mut self, value: &Value) -> Result<(), ConversionError> {
        *self = T::vec_from_value(value)?;
        Ok(())
    }

    fn zero() -> Self { Vec::new() }
}

impl PackRep for Value {
    fn rep_type() -> Type { Type::Nil }

    fn to_value(&self) -> Result<Value, ConversionError> { Ok(self.clone()) }

    fn unpack(&mut self, value: &Value) -> Result<(), ConversionError> {
        *self = value.clone();
        Ok(())
    }

    fn zero() -> Self { Value::Nil }
}

impl PackRep for Struct {
    fn rep_type() -> Type { Type::Struct(StructType::default()) }

    fn to_value(&self) -> Result<Value, ConversionError> { Ok(Value::Struct(self.clone())) }

    fn unpack(&mut self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::Struct(st) => {
                *self = st.clone();
                Ok(())
            }
            other => Err(ConversionError::unexpected(Kind::Struct, other.kind())),
        }
    }

    fn zero() -> Self { Struct::default() }
}

impl PackRep for Typed {
    fn rep_type() -> Type { Struct::rep_type() }

    fn to_value(&self) -> Result<Value, ConversionError> { Ok(Value::Struct(self.as_struct().clone())) }

    fn unpack(&mut self, value: &Value) -> Result<(), ConversionError> {
        let mut st = Struct::zero();
        st.unpack(value)?;
        *self = Typed::new(st);
        Ok(())
    }

    fn zero() -> Self { Typed::default() }
}

impl PackRep for List {
    fn rep_type() -> Type { Type::List(Box::new(Type::Nil)) }

    fn to_value(&self) -> Result<Value, ConversionError> { Ok(Value::List(self.clone())) }

    fn unpack(&mut self, value: &Value) -> Result<(), ConversionError> {
        match value {
            Value::List(list) => {
                *self = list.clone();
                Ok(())
            }
            other => Err(ConversionError::unexpected(Kind::List, other.kind())),
        }
    }

    fn zero() -> Self { List::default() }
}

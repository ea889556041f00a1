use super::constants::*;
use crate::{
    fixed::FixedBytes,
    kind::Kind,
    list::List,
    scalar::{U16, U32, U64, U8},
    structure::Struct,
    typed::Typed,
    types::Type,
    uint::{U128, U256},
    Value,
};
use std::convert::TryFrom;

/// A sink for encoded bytes.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

/// Convenience methods for [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add a big-endian [`u16`] to the output value.
    fn put_u16(&mut self, u: u16);
    /// Add a big-endian [`u32`] to the output value.
    fn put_u32(&mut self, u: u32);
    /// Add a big-endian [`u64`] to the output value.
    fn put_u64(&mut self, u: u64);

    /// Add a [`bool`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `b: bool` - The value to be added.
    fn put_bool(&mut self, b: bool);

    /// Add a `u32` length or count prefix.
    ///
    /// # Panics
    ///
    /// Panics with `"overflow"` if `len` does not fit in a `u32`.
    fn put_len(&mut self, len: usize);

    /// Add length-prefixed bytes to the output value.
    ///
    /// # Arguments
    ///
    /// * `b: &[u8]` - The value to be added.
    fn put_bytes(&mut self, b: &[u8]);

    /// Add a length-prefixed UTF-8 string to the output value.
    fn put_str(&mut self, s: &str) { self.put_bytes(s.as_bytes()) }

    /// Add a kind byte to the output value.
    fn put_kind(&mut self, k: Kind) { self.put_u8(k as u8) }
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl<S: Serializer> SerializerExt for S {
    fn put_u16(&mut self, u: u16) { self.put_slice(&u.to_be_bytes()) }

    fn put_u32(&mut self, u: u32) { self.put_slice(&u.to_be_bytes()) }

    fn put_u64(&mut self, u: u64) { self.put_slice(&u.to_be_bytes()) }

    fn put_bool(&mut self, b: bool) { self.put_u8(if b { BOOL_TRUE } else { BOOL_FALSE }) }

    fn put_len(&mut self, len: usize) {
        match u32::try_from(len) {
            Ok(len) => self.put_u32(len),
            Err(_) => panic!("overflow"),
        }
    }

    fn put_bytes(&mut self, b: &[u8]) {
        self.put_len(b.len());
        self.put_slice(b);
    }
}

/// Values that can be serialized.
pub trait Ser {
    /// Write the binary encoding of `self` to `s`.
    fn ser<S: Serializer>(&self, s: &mut S);

    /// Exact size of the binary encoding, used to pre-allocate buffers.
    fn size_hint(&self) -> usize { 0 }
}

impl<'a, T: Ser + ?Sized> Ser for &'a T {
    fn ser<S: Serializer>(&self, s: &mut S) { (**self).ser(s) }

    fn size_hint(&self) -> usize { (**self).size_hint() }
}

impl Ser for Kind {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_kind(*self) }

    fn size_hint(&self) -> usize { SIZE_KIND }
}

impl Ser for Type {
    fn ser<S: Serializer>(&self, s: &mut S) {
        s.put_kind(self.kind());
        match self {
            Type::Struct(st) => {
                s.put_len(st.len());
                for field in st {
                    s.put_str(&field.name);
                    field.ty.ser(s);
                }
            }
            Type::List(elem) => Type::ser(elem, s),
            _ => (),
        }
    }

    fn size_hint(&self) -> usize { Type::size_hint(self) }
}

macro_rules! ser_scalar {
    ($name:ty, $put:ident, $size:expr) => {
        impl Ser for $name {
            fn ser<S: Serializer>(&self, s: &mut S) { s.$put(self.get()) }

            fn size_hint(&self) -> usize { $size }
        }
    };
}

ser_scalar!(U8, put_u8, 1);
ser_scalar!(U16, put_u16, 2);
ser_scalar!(U32, put_u32, 4);
ser_scalar!(U64, put_u64, 8);

impl Ser for U128 {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_slice(&self.to_bytes()) }

    fn size_hint(&self) -> usize { SIZE_U128 }
}

impl Ser for U256 {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_slice(&self.to_bytes()) }

    fn size_hint(&self) -> usize { SIZE_U256 }
}

impl<const N: usize> Ser for FixedBytes<N> {
    fn ser<S: Serializer>(&self, s: &mut S) { s.put_slice(self.as_bytes()) }

    fn size_hint(&self) -> usize { N }
}

impl Ser for Struct {
    fn ser<S: Serializer>(&self, s: &mut S) {
        for field in self {
            field.value.ser(s);
        }
    }

    fn size_hint(&self) -> usize { self.iter().map(|f| f.value.size_hint()).sum() }
}

impl Ser for List {
    fn ser<S: Serializer>(&self, s: &mut S) {
        s.put_len(self.len());
        for elem in self {
            elem.ser(s);
        }
    }

    fn size_hint(&self) -> usize { SIZE_LEN + self.iter().map(Value::size_hint).sum::<usize>() }
}

impl Ser for Typed {
    fn ser<S: Serializer>(&self, s: &mut S) {
        self.ty().ser(s);
        self.as_struct().ser(s);
    }

    fn size_hint(&self) -> usize { self.ty().size_hint() + self.as_struct().size_hint() }
}

impl Ser for Value {
    fn ser<S: Serializer>(&self, s: &mut S) {
        match self {
            Value::Nil => (),
            Value::Bool(b) => s.put_bool(*b),
            Value::U8(u) => u.ser(s),
            Value::U16(u) => u.ser(s),
            Value::U32(u) => u.ser(s),
            Value::U64(u) => u.ser(s),
            Value::U128(u) => u.ser(s),
            Value::U256(u) => u.ser(s),
            Value::String(st) => s.put_str(st),
            Value::Bytes(bs) => s.put_bytes(bs),
            Value::Bytes32(bs) => bs.ser(s),
            Value::Bytes65(bs) => bs.ser(s),
            Value::Struct(st) => st.ser(s),
            Value::List(l) => l.ser(s),
        }
    }

    fn size_hint(&self) -> usize { Value::size_hint(self) }
}

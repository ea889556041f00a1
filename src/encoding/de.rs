use super::constants::*;
use crate::{
    config::DecodeConfig,
    errors::DecodingError,
    fixed::FixedBytes,
    kind::Kind,
    list::List,
    scalar::{U16, U32, U64, U8},
    structure::{Struct, StructField},
    typed::Typed,
    types::{StructType, Type, TypeField},
    uint::{U128, U256},
    Value,
};
use std::{convert::TryInto, mem};
use tracing::{debug, trace};

/// A cursor over an encoded buffer, with a byte budget.
///
/// Every consumed byte is charged against the budget seeded from
/// [`DecodeConfig::max_bytes`]. A read that needs more than the budget has left fails
/// with [`DecodingError::QuotaExceeded`] regardless of how much of the buffer remains.
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    rem: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder over `buf`.
    ///
    /// # Arguments
    ///
    /// * `buf: &'a [u8]` - The encoded data.
    /// * `cfg: &DecodeConfig` - Supplies the byte budget.
    pub fn new(buf: &'a [u8], cfg: &DecodeConfig) -> Self {
        Decoder {
            buf,
            rem: cfg.max_bytes,
        }
    }

    /// Bytes left in the budget.
    pub fn remaining_budget(&self) -> usize { self.rem }

    /// The part of the buffer not consumed yet.
    pub fn rest(&self) -> &'a [u8] { self.buf }

    #[inline]
    fn read_many(&mut self, len: usize) -> Result<&'a [u8], DecodingError> {
        if len > self.rem {
            debug!(wanted = len, remaining = self.rem, "decode budget exhausted");
            return Err(DecodingError::QuotaExceeded {
                wanted: len,
                remaining: self.rem,
            });
        }
        if len > self.buf.len() {
            trace!(wanted = len, available = self.buf.len(), "buffer too short");
            return Err(DecodingError::UnexpectedEndOfBuffer {
                wanted: len,
                available: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        self.rem -= len;
        Ok(head)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodingError> {
        let bs = self.read_many(N)?;
        bs.try_into().map_err(|_| DecodingError::LengthMismatch {
            expected: N,
            got: bs.len(),
        })
    }

    #[inline]
    fn take_byte(&mut self) -> Result<u8, DecodingError> { Ok(self.read_many(1)?[0]) }

    /// Reads a `0x00`/`0x01` bool.
    pub fn read_bool(&mut self) -> Result<bool, DecodingError> {
        match self.take_byte()? {
            BOOL_FALSE => Ok(false),
            BOOL_TRUE => Ok(true),
            other => Err(DecodingError::InvalidBool(other)),
        }
    }

    /// Reads a [`u8`].
    pub fn read_u8(&mut self) -> Result<u8, DecodingError> { self.take_byte() }

    /// Reads a big-endian [`u16`].
    pub fn read_u16(&mut self) -> Result<u16, DecodingError> { Ok(u16::from_be_bytes(self.read_array()?)) }

    /// Reads a big-endian [`u32`].
    pub fn read_u32(&mut self) -> Result<u32, DecodingError> { Ok(u32::from_be_bytes(self.read_array()?)) }

    /// Reads a big-endian [`u64`].
    pub fn read_u64(&mut self) -> Result<u64, DecodingError> { Ok(u64::from_be_bytes(self.read_array()?)) }

    /// Reads a `u32` count prefix and charges `entry_cost` per entry to the budget up
    /// front, so entries that occupy no bytes on the wire still use up the budget.
    fn read_count(&mut self, entry_cost: usize) -> Result<usize, DecodingError> {
        let count = self.read_u32()? as usize;
        let wanted = count.saturating_mul(entry_cost);
        if wanted > self.rem {
            debug!(count, wanted, remaining = self.rem, "count prefix exceeds decode budget");
            return Err(DecodingError::QuotaExceeded {
                wanted,
                remaining: self.rem,
            });
        }
        self.rem -= wanted;
        Ok(count)
    }

    /// Capacity to reserve for `count` entries; never more than the unread input could
    /// hold.
    fn capacity_for(&self, count: usize) -> usize { count.min(self.buf.len()) }

    /// Reads length-prefixed bytes.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], DecodingError> {
        let len = self.read_u32()? as usize;
        self.read_many(len)
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, DecodingError> {
        let bs = self.read_bytes()?;
        std::str::from_utf8(bs)
            .map(str::to_owned)
            .map_err(|_| DecodingError::InvalidUtf8)
    }

    /// Reads a kind byte.
    pub fn read_kind(&mut self) -> Result<Kind, DecodingError> {
        let byte = self.take_byte()?;
        Kind::from_u8(byte).ok_or_else(|| {
            debug!(byte, "unsupported kind byte");
            DecodingError::UnsupportedKind(byte)
        })
    }

    /// Reads a type descriptor.
    pub fn read_type(&mut self) -> Result<Type, DecodingError> { self.read_type_at(0) }

    fn read_type_at(&mut self, depth: usize) -> Result<Type, DecodingError> {
        if depth > MAX_DEPTH {
            debug!(depth, "type descriptor nested too deeply");
            return Err(DecodingError::DepthExceeded(MAX_DEPTH));
        }
        let kind = self.read_kind()?;
        match kind {
            Kind::Struct => {
                let count = self.read_count(mem::size_of::<TypeField>())?;
                let mut fields = Vec::with_capacity(self.capacity_for(count));
                for _ in 0..count {
                    let name = self.read_string()?;
                    let ty = self.read_type_at(depth + 1)?;
                    fields.push(TypeField::new(name, ty));
                }
                Ok(Type::Struct(StructType::new(fields)))
            }
            Kind::List => Ok(Type::List(Box::new(self.read_type_at(depth + 1)?))),
            leaf => Type::leaf(leaf).ok_or(DecodingError::UnsupportedKind(leaf as u8)),
        }
    }

    /// Reads a value of type `ty`.
    ///
    /// # Arguments
    ///
    /// * `ty: &Type` - The type of the encoded value.
    pub fn read_value(&mut self, ty: &Type) -> Result<Value, DecodingError> {
        let value = match ty {
            Type::Nil => Value::Nil,
            Type::Bool => Value::Bool(self.read_bool()?),
            Type::U8 => Value::U8(U8::new(self.read_u8()?)),
            Type::U16 => Value::U16(U16::new(self.read_u16()?)),
            Type::U32 => Value::U32(U32::new(self.read_u32()?)),
            Type::U64 => Value::U64(U64::new(self.read_u64()?)),
            Type::U128 => Value::U128(U128::from_bytes(self.read_array()?)),
            Type::U256 => Value::U256(U256::from_bytes(self.read_array()?)),
            Type::String => Value::String(self.read_string()?),
            Type::Bytes => Value::Bytes(::bytes::Bytes::copy_from_slice(self.read_bytes()?)),
            Type::Bytes32 => Value::Bytes32(FixedBytes::new(self.read_array()?)),
            Type::Bytes65 => Value::Bytes65(FixedBytes::new(self.read_array()?)),
            Type::Struct(st) => Value::Struct(self.read_struct(st)?),
            Type::List(elem) => Value::List(self.read_list(elem)?),
        };
        Ok(value)
    }

    /// Reads the fields of a struct of type `st`.
    pub fn read_struct(&mut self, st: &StructType) -> Result<Struct, DecodingError> {
        st.iter()
            .map(|field| {
                self.read_value(&field.ty)
                    .map(|value| StructField::new(field.name.clone(), value))
                    .map_err(|e| DecodingError::field(&field.name, e))
            })
            .collect()
    }

    /// Reads a list whose elements are of type `elem`.
    ///
    /// A list of [`Type::Nil`] elements can only be empty.
    pub fn read_list(&mut self, elem: &Type) -> Result<List, DecodingError> {
        let count = self.read_count(mem::size_of::<Value>())?;
        if elem.kind() == Kind::Nil {
            return match count {
                0 => Ok(List::empty(Type::Nil)),
                _ => Err(DecodingError::UnknownElementType),
            };
        }
        let mut elems = Vec::with_capacity(self.capacity_for(count));
        for i in 0..count {
            elems.push(
                self.read_value(elem)
                    .map_err(|e| DecodingError::element(i, e))?,
            );
        }
        Ok(List::from_parts(elem.clone(), elems))
    }
}

/// Values that carry enough information to be decoded without a [`Type`].
pub trait De: Sized {
    /// Read a value of type `Self` from a [`Decoder`].
    ///
    /// # Arguments
    ///
    /// * `d` - The [`Decoder`] to be read from.
    fn de(d: &mut Decoder) -> Result<Self, DecodingError>;
}

impl De for Kind {
    fn de(d: &mut Decoder) -> Result<Self, DecodingError> { d.read_kind() }
}

impl De for Type {
    fn de(d: &mut Decoder) -> Result<Self, DecodingError> { d.read_type() }
}

impl De for Typed {
    fn de(d: &mut Decoder) -> Result<Self, DecodingError> {
        match d.read_type()? {
            Type::Struct(st) => Ok(Typed::new(d.read_struct(&st)?)),
            other => {
                debug!(kind = %other.kind(), "typed envelope is not a struct");
                Err(DecodingError::NotAStruct(other.kind()))
            }
        }
    }
}

impl<const N: usize> De for FixedBytes<N> {
    fn de(d: &mut Decoder) -> Result<Self, DecodingError> { Ok(FixedBytes::new(d.read_array()?)) }
}

macro_rules! de_scalar {
    ($name:ident, $read:ident) => {
        impl De for $name {
            fn de(d: &mut Decoder) -> Result<Self, DecodingError> { Ok($name::new(d.$read()?)) }
        }
    };
}

de_scalar!(U8, read_u8);
de_scalar!(U16, read_u16);
de_scalar!(U32, read_u32);
de_scalar!(U64, read_u64);

impl De for U128 {
    fn de(d: &mut Decoder) -> Result<Self, DecodingError> { Ok(U128::from_bytes(d.read_array()?)) }
}

impl De for U256 {
    fn de(d: &mut Decoder) -> Result<Self, DecodingError> { Ok(U256::from_bytes(d.read_array()?)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DecodeConfig { DecodeConfig::default() }

    #[test]
    fn quota_before_buffer() {
        // claims 100 bytes, has 2, budget is 50
        let data = [0, 0, 0, 100, 1, 2];
        let small = cfg().with_max_bytes(50);
        assert_eq!(
            Type::Bytes.unmarshal_value(&data, &small),
            Err(DecodingError::QuotaExceeded {
                wanted: 100,
                remaining: 46
            })
        );
        assert_eq!(
            Type::Bytes.unmarshal_value(&data, &cfg()),
            Err(DecodingError::UnexpectedEndOfBuffer {
                wanted: 100,
                available: 2
            })
        );
    }

    #[test]
    fn budget_counts_every_byte() {
        let mut d = Decoder::new(&[0, 1, 2, 3], &cfg().with_max_bytes(3));
        assert_eq!(d.read_u16(), Ok(1));
        assert_eq!(d.remaining_budget(), 1);
        assert!(d.read_u16().is_err());
    }

    #[test]
    fn invalid_bool() {
        assert_eq!(
            Type::Bool.unmarshal_value(&[2], &cfg()),
            Err(DecodingError::InvalidBool(2))
        );
    }

    #[test]
    fn invalid_utf8() {
        assert_eq!(
            Type::String.unmarshal_value(&[0, 0, 0, 1, 0xff], &cfg()),
            Err(DecodingError::InvalidUtf8)
        );
    }

    #[test]
    fn huge_list_count_rejected_up_front() {
        let ty = Type::List(Box::new(Type::U8));
        let data = [0xff, 0xff, 0xff, 0xff];
        match ty.unmarshal_value(&data, &cfg()) {
            Err(DecodingError::QuotaExceeded { wanted, .. }) => {
                assert_eq!(wanted, u32::MAX as usize * mem::size_of::<Value>())
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn nil_element_type_is_unknown() {
        let ty = Type::List(Box::new(Type::Nil));
        assert_eq!(
            ty.unmarshal_value(&[0, 0, 0, 1], &cfg()),
            Err(DecodingError::UnknownElementType)
        );
        assert_eq!(
            ty.unmarshal_value(&[0, 0, 0, 0], &cfg()),
            Ok(Value::from(List::empty(Type::Nil)))
        );
    }

    #[test]
    fn zero_width_elements_are_charged() {
        // four bytes claiming ~33M empty structs
        let ty = Type::List(Box::new(Type::Struct(StructType::default())));
        let data = [0x01, 0xff, 0xff, 0xf0];
        assert!(matches!(
            ty.unmarshal_value(&data, &cfg()),
            Err(DecodingError::QuotaExceeded { .. })
        ));

        let nested = Type::List(Box::new(ty));
        let data = [0, 0, 0, 1, 0x01, 0xff, 0xff, 0xf0];
        assert!(matches!(
            nested.unmarshal_value(&data, &cfg()).map_err(|e| e.root().clone()),
            Err(DecodingError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn entries_use_up_budget() {
        let ty = Type::List(Box::new(Type::Struct(StructType::default())));
        let budget = 4 + 3 * mem::size_of::<Value>();
        let mut d = Decoder::new(&[0, 0, 0, 3], &cfg().with_max_bytes(budget));
        assert_eq!(d.read_value(&ty).map(|v| v.as_list().map(List::len)), Ok(Some(3)));
        assert_eq!(d.remaining_budget(), 0);

        let mut d = Decoder::new(&[0, 0, 0, 3], &cfg().with_max_bytes(budget - 1));
        assert!(matches!(
            d.read_value(&ty),
            Err(DecodingError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn element_errors_carry_index() {
        let ty = Type::List(Box::new(Type::Bool));
        let err = ty.unmarshal_value(&[0, 0, 0, 2, 1, 5], &cfg()).unwrap_err();
        assert_eq!(err, DecodingError::element(1, DecodingError::InvalidBool(5)));
    }

    #[test]
    fn deep_types_are_rejected() {
        let data = vec![Kind::List as u8; MAX_DEPTH + 2];
        let mut d = Decoder::new(&data, &cfg());
        assert_eq!(d.read_type(), Err(DecodingError::DepthExceeded(MAX_DEPTH)));
    }

    #[test]
    fn rest_is_exposed() {
        let data = [5, 0, 0, 0, 0, 0, 0, 0, 1, 0xaa];
        let mut d = Decoder::new(&data, &cfg());
        let ty = d.read_type().unwrap();
        assert_eq!(d.read_value(&ty), Ok(Value::from(U64::new(1))));
        assert_eq!(d.rest(), &[0xaa]);
    }
}

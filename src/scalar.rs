//! Fixed-width unsigned scalars.
//!
//! [`U8`], [`U16`], [`U32`] and [`U64`] wrap the matching primitive. Arithmetic through
//! `+`, `-`, `+=` and `-=` is checked, and wrapping past either end of the range is a
//! fatal error: the operation panics with `"overflow"` or `"underflow"`. Use the
//! `checked_*` methods when the operands come from outside the program.
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! let x = U16::new(40);
//! let y = U16::from(U8::new(2));
//!
//! assert_eq!((x + y).get(), 42);
//! assert_eq!(U16::MAX.checked_add(y), None);
//! ```
//!
//! ```should_panic
//! use pack::prelude::*;
//!
//! // panics with "underflow"
//! let _ = U8::new(0) - U8::new(1);
//! ```

use crate::{json, kind::Kind, types::Type};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

macro_rules! scalar {
    ($(#[$meta:meta])* $name:ident, $prim:ty, $kind:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name($prim);

        impl $name {
            /// The largest representable value.
            pub const MAX: $name = $name(<$prim>::MAX);
            /// Zero.
            pub const ZERO: $name = $name(0);

            /// Wraps a primitive.
            pub const fn new(x: $prim) -> Self { $name(x) }

            /// Returns the wrapped primitive.
            pub const fn get(self) -> $prim { self.0 }

            /// The [`Kind`] of every value of this type.
            pub const fn kind(self) -> Kind { Kind::$kind }

            /// The [`Type`] of every value of this type.
            pub fn ty(self) -> Type { Type::$kind }

            /// Adds, returning `None` instead of panicking on overflow.
            pub fn checked_add(self, rhs: Self) -> Option<Self> { self.0.checked_add(rhs.0).map($name) }

            /// Subtracts, returning `None` instead of panicking on underflow.
            pub fn checked_sub(self, rhs: Self) -> Option<Self> { self.0.checked_sub(rhs.0).map($name) }

            /// Multiplies, returning `None` instead of panicking on overflow.
            pub fn checked_mul(self, rhs: Self) -> Option<Self> { self.0.checked_mul(rhs.0).map($name) }
        }

        impl Add for $name {
            type Output = $name;

            fn add(self, rhs: $name) -> $name {
                match self.checked_add(rhs) {
                    Some(sum) => sum,
                    None => panic!("overflow"),
                }
            }
        }

        impl Sub for $name {
            type Output = $name;

            fn sub(self, rhs: $name) -> $name {
                match self.checked_sub(rhs) {
                    Some(diff) => diff,
                    None => panic!("underflow"),
                }
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) { *self = *self + rhs }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: $name) { *self = *self - rhs }
        }

        from_fn!($name, $prim, $name);
        from_fn!($prim, $name, |x: $name| x.0);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<$name, D::Error> {
                let text = String::deserialize(d)?;
                json::parse_primitive::<$prim>(&text)
                    .map($name)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

scalar!(
    /// An 8-bit unsigned integer.
    U8,
    u8,
    U8
);
scalar!(
    /// A 16-bit unsigned integer.
    U16,
    u16,
    U16
);
scalar!(
    /// A 32-bit unsigned integer.
    U32,
    u32,
    U32
);
scalar!(
    /// A 64-bit unsigned integer.
    U64,
    u64,
    U64
);

from_fn!(U16, U8, |x: U8| U16(x.0.into()));
from_fn!(U32, U8, |x: U8| U32(x.0.into()));
from_fn!(U32, U16, |x: U16| U32(x.0.into()));
from_fn!(U64, U8, |x: U8| U64(x.0.into()));
from_fn!(U64, U16, |x: U16| U64(x.0.into()));
from_fn!(U64, U32, |x: U32| U64(x.0.into()));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening() {
        assert_eq!(U64::from(U8::MAX).get(), 255);
        assert_eq!(U32::from(U16::MAX).get(), 65535);
        assert_eq!(U64::from(U32::MAX).get(), u32::MAX as u64);
    }

    #[test]
    fn identities() {
        let x = U32::new(1234);
        assert_eq!(x + U32::ZERO, x);
        assert_eq!(x - U32::ZERO, x);
        assert_eq!(x + U32::new(66) - U32::new(66), x);
    }

    #[test]
    fn assign_ops() {
        let mut x = U64::new(10);
        x += U64::new(5);
        assert_eq!(x.get(), 15);
        x -= U64::new(15);
        assert_eq!(x, U64::ZERO);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn max_plus_one() { let _ = U8::MAX + U8::new(1); }

    #[test]
    #[should_panic(expected = "underflow")]
    fn zero_minus_one() { let _ = U16::ZERO - U16::new(1); }

    #[test]
    #[should_panic(expected = "overflow")]
    fn add_assign_overflow() {
        let mut x = U32::MAX;
        x += U32::new(1);
    }

    #[test]
    fn checked() {
        assert_eq!(U8::MAX.checked_add(U8::new(1)), None);
        assert_eq!(U8::ZERO.checked_sub(U8::new(1)), None);
        assert_eq!(U8::new(16).checked_mul(U8::new(16)), None);
        assert_eq!(U8::new(15).checked_mul(U8::new(17)), Some(U8::MAX));
    }

    #[test]
    fn json_is_decimal_string() {
        assert_eq!(serde_json::to_string(&U64::MAX).unwrap(), "\"18446744073709551615\"");
        let x: U16 = serde_json::from_str("\"65535\"").unwrap();
        assert_eq!(x, U16::MAX);
        assert!(serde_json::from_str::<U16>("\"65536\"").is_err());
        assert!(serde_json::from_str::<U16>("65535").is_err());
    }

    #[test]
    fn kinds() {
        assert_eq!(U8::ZERO.kind(), Kind::U8);
        assert_eq!(U64::ZERO.ty(), Type::U64);
    }
}

//! Wide unsigned integers, [`U128`] and [`U256`].
//!
//! Both are backed by an owned [`BigUint`] whose value is kept within `[0, 2^W - 1]`.
//! Every operation produces a fresh value; nothing is shared with the operands.
//!
//! As with the narrower scalars, leaving the range through the operator API is a fatal
//! error. Subtraction below zero panics with `"underflow"`, addition or multiplication
//! past the maximum panics with `"overflow"`, and division by zero panics with
//! `"division by zero"`. Decoding the same out-of-range numbers from JSON is an ordinary
//! [`DecodingError`].
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//! use std::convert::TryFrom;
//!
//! let x = U256::from(U128::max_value());
//! let y = x.clone() + U256::from(U8::new(1));
//!
//! assert!(y.greater_than(&x));
//! assert_eq!(y.to_bytes()[15], 1);
//!
//! let negative = num_bigint::BigInt::from(-1);
//! assert!(U128::try_from(negative).is_err());
//! ```

use crate::{
    errors::DecodingError,
    json,
    kind::Kind,
    scalar::{U16, U32, U64, U8},
    types::Type,
};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    convert::TryFrom,
    fmt,
    ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
};

macro_rules! binop {
    ($name:ident, $trait:ident, $method:ident, $checked:ident, $msg:expr) => {
        impl<'a, 'b> $trait<&'b $name> for &'a $name {
            type Output = $name;

            fn $method(self, rhs: &'b $name) -> $name {
                match self.$checked(rhs) {
                    Some(out) => out,
                    None => panic!($msg),
                }
            }
        }

        impl $trait for $name {
            type Output = $name;

            fn $method(self, rhs: $name) -> $name { (&self).$method(&rhs) }
        }
    };
}

macro_rules! uint {
    ($(#[$meta:meta])* $name:ident, $bits:expr, $width:expr, $kind:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(BigUint);

        impl $name {
            /// Width in bits.
            pub const BITS: u64 = $bits;
            /// Width of the binary encoding in bytes.
            pub const WIDTH: usize = $width;

            /// Zero.
            pub fn zero() -> Self { $name(BigUint::zero()) }

            /// The largest representable value, `2^W - 1`.
            pub fn max_value() -> Self { $name((BigUint::one() << $bits) - BigUint::one()) }

            /// Reads a big-endian magnitude.
            ///
            /// # Arguments
            ///
            /// * `bytes` - Exactly [`Self::WIDTH`] bytes, most significant first.
            pub fn from_bytes(bytes: [u8; $width]) -> Self { $name(BigUint::from_bytes_be(&bytes)) }

            /// Writes the value as a big-endian magnitude, zero-padded to
            /// [`Self::WIDTH`] bytes.
            pub fn to_bytes(&self) -> [u8; $width] {
                let raw = self.0.to_bytes_be();
                let mut out = [0u8; $width];
                out[$width - raw.len()..].copy_from_slice(&raw);
                out
            }

            /// Converts a signed big integer.
            ///
            /// # Panics
            ///
            /// Panics with `"underflow"` if `x` is negative and `"overflow"` if it does not
            /// fit in [`Self::BITS`] bits. See the `TryFrom<BigInt>` impl for a checked
            /// version.
            pub fn from_bigint(x: &BigInt) -> Self {
                match x.sign() {
                    Sign::Minus => panic!("underflow"),
                    _ => match Self::from_biguint(x.magnitude().clone()) {
                        Some(out) => out,
                        None => panic!("overflow"),
                    },
                }
            }

            /// Wraps `x`, or returns `None` if it does not fit.
            pub fn from_biguint(x: BigUint) -> Option<Self> {
                if x.bits() <= $bits {
                    Some($name(x))
                } else {
                    None
                }
            }

            /// Borrows the underlying magnitude.
            pub fn as_biguint(&self) -> &BigUint { &self.0 }

            /// The [`Kind`] of every value of this type.
            pub fn kind(&self) -> Kind { Kind::$kind }

            /// The [`Type`] of every value of this type.
            pub fn ty(&self) -> Type { Type::$kind }

            /// Adds, returning `None` on overflow.
            pub fn checked_add(&self, rhs: &Self) -> Option<Self> { Self::from_biguint(&self.0 + &rhs.0) }

            /// Subtracts, returning `None` on underflow.
            pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
                if self.0 < rhs.0 {
                    None
                } else {
                    Some($name(&self.0 - &rhs.0))
                }
            }

            /// Multiplies, returning `None` on overflow.
            pub fn checked_mul(&self, rhs: &Self) -> Option<Self> { Self::from_biguint(&self.0 * &rhs.0) }

            /// Divides, returning `None` when `rhs` is zero.
            pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
                if rhs.0.is_zero() {
                    None
                } else {
                    Some($name(&self.0 / &rhs.0))
                }
            }

            /// `self == other`.
            pub fn equal(&self, other: &Self) -> bool { self.0 == other.0 }

            /// `self < other`.
            pub fn less_than(&self, other: &Self) -> bool { self.0 < other.0 }

            /// `self <= other`.
            pub fn less_than_equal(&self, other: &Self) -> bool { self.0 <= other.0 }

            /// `self > other`.
            pub fn greater_than(&self, other: &Self) -> bool { self.0 > other.0 }

            /// `self >= other`.
            pub fn greater_than_equal(&self, other: &Self) -> bool { self.0 >= other.0 }
        }

        binop!($name, Add, add, checked_add, "overflow");
        binop!($name, Sub, sub, checked_sub, "underflow");
        binop!($name, Mul, mul, checked_mul, "overflow");
        binop!($name, Div, div, checked_div, "division by zero");

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) { *self = &*self + &rhs }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: $name) { *self = &*self - &rhs }
        }

        from_fn!($name, U8, |x: U8| $name(BigUint::from(x.get())));
        from_fn!($name, U16, |x: U16| $name(BigUint::from(x.get())));
        from_fn!($name, U32, |x: U32| $name(BigUint::from(x.get())));
        from_fn!($name, U64, |x: U64| $name(BigUint::from(x.get())));
        from_fn!(BigUint, $name, |x: $name| x.0);

        impl TryFrom<BigInt> for $name {
            type Error = DecodingError;

            fn try_from(x: BigInt) -> Result<$name, DecodingError> {
                json::check_bounds(&x, $bits).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> { s.collect_str(&self.0) }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<$name, D::Error> {
                let text = String::deserialize(d)?;
                json::parse_decimal(&text, $bits)
                    .map($name)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

uint!(
    /// A 128-bit unsigned integer.
    U128,
    128,
    16,
    U128
);
uint!(
    /// A 256-bit unsigned integer.
    U256,
    256,
    32,
    U256
);

from_fn!(U128, u128, |x: u128| U128(BigUint::from(x)));
from_fn!(U256, U128, |x: U128| U256(x.0));

impl From<&U128> for u128 {
    fn from(x: &U128) -> u128 { u128::from_be_bytes(x.to_bytes()) }
}

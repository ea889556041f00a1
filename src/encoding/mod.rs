//! # Binary encoder and decoder
//!
//! Values are encoded big-endian with `u32` length prefixes, and without any type
//! information: decoding a [`Value`](crate::Value) needs its [`Type`](crate::types::Type).
//! Type descriptors, kinds and [`Typed`](crate::typed::Typed) envelopes describe
//! themselves and can be decoded directly with [`decode_full`].
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! #[derive(PackRep, PartialEq, Debug, Default)]
//! struct SomeData {
//!     x: u64,
//!     y: String,
//! }
//!
//! let some_data = SomeData { x: 1, y: "two".to_owned() };
//! let value = some_data.to_value().unwrap();
//!
//! let enc_full = encode_full(&value);
//!
//! // encoding into an existing buffer is equivalent
//! let out = &mut Vec::new();
//! encode(&value, out);
//! assert_eq!(*out, enc_full);
//!
//! // decoding needs the type, which the bridge knows
//! let cfg = DecodeConfig::default();
//! let dec = SomeData::rep_type().unmarshal_value(&enc_full, &cfg).unwrap();
//! assert_eq!(SomeData::from_value(&dec).unwrap(), some_data);
//! ```

use crate::{config::DecodeConfig, errors::DecodingError};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
pub mod constants;

/// Appends the binary encoding of `t` to `out`.
///
/// # Arguments
///
/// * `t: T` - The value to be encoded.
/// * `out: &mut Vec<u8>` - The buffer the encoding is appended to.
pub fn encode<T: Ser>(t: T, out: &mut Vec<u8>) {
    out.reserve(t.size_hint());
    t.ser(out)
}

/// Encodes `t` into a new buffer, sized up front.
///
/// # Arguments
///
/// * `t: T` - The value to be encoded.
///
/// # Example
///
/// ```
/// use pack::prelude::*;
///
/// let enc: Vec<u8> = encode_full(&Value::from(U32::new(7)));
///
/// assert_eq!(enc, vec![0, 0, 0, 7]);
/// ```
pub fn encode_full<T: Ser>(t: T) -> Vec<u8> {
    let mut out = Vec::with_capacity(t.size_hint());
    t.ser(&mut out);
    out
}

/// Reads a self-describing `T` from a [`Decoder`].
pub fn decode<T: De>(d: &mut Decoder) -> Result<T, DecodingError> { T::de(d) }

/// Decodes a self-describing `T` from the start of `data`. Trailing bytes are ignored.
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
/// let bs = encode_full(&Kind::Bytes65);
///
/// let dec: Result<Kind, DecodingError> = decode_full(&bs, &DecodeConfig::default());
///
/// assert_eq!(dec, Ok(Kind::Bytes65));
/// ```
pub fn decode_full<T: De>(data: &[u8], cfg: &DecodeConfig) -> Result<T, DecodingError> {
    decode(&mut Decoder::new(data, cfg))
}

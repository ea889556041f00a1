pub use crate::{
    config::DecodeConfig,
    encoding::{decode, decode_full, encode, encode_full, Decoder},
    errors::{ConversionError, DecodingError},
    fixed::{Bytes32, Bytes65, FixedBytes},
    kind::Kind,
    list::List,
    rep::{decode_value, encode_value, PackRep},
    scalar::{U16, U32, U64, U8},
    structure::{Struct, StructField},
    typed::Typed,
    types::{marshal_type, unmarshal_type, StructType, Type, TypeField},
    uint::{U128, U256},
    Value,
};
pub use pack_derive::PackRep;
pub use std::{convert::TryFrom, iter::FromIterator, str::FromStr};

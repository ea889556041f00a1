//! Errors reported by the codecs and by the conversion bridge.
//!
//! Nothing in this module is used for arithmetic overflow. Overflow on the in-process
//! integer API is a programmer error and panics; see [`crate::scalar`] and
//! [`crate::uint`].

use crate::{kind::Kind, types::Type};
use failure::Fail;

#[derive(Debug, Clone, PartialEq, Eq, Fail)]
/// An error encountered when decoding binary or JSON data fails.
pub enum DecodingError {
    /// The buffer ran out before the value was complete.
    #[fail(
        display = "unexpected end of buffer: wanted {} bytes, {} available",
        wanted, available
    )]
    UnexpectedEndOfBuffer {
        /// Bytes needed by the read.
        wanted: usize,
        /// Bytes left in the buffer.
        available: usize,
    },
    /// The read would consume more than the remaining decode budget.
    #[fail(
        display = "max bytes exceeded: wanted {} bytes, {} remaining",
        wanted, remaining
    )]
    QuotaExceeded {
        /// Bytes needed by the read.
        wanted: usize,
        /// Budget left for this decode.
        remaining: usize,
    },
    /// A kind byte that no [`Kind`] is assigned to.
    #[fail(display = "unsupported kind {}", _0)]
    UnsupportedKind(u8),
    /// A kind name that no [`Kind`] is assigned to.
    #[fail(display = "unexpected kind {:?}", _0)]
    UnknownKind(String),
    /// A bool byte other than `0x00` or `0x01`.
    #[fail(display = "invalid bool byte {:#04x}", _0)]
    InvalidBool(u8),
    /// String data was not valid UTF-8.
    #[fail(display = "string is not valid utf-8")]
    InvalidUtf8,
    /// A fixed-width byte array decoded to the wrong number of bytes.
    #[fail(display = "expected len={}, got len={}", expected, got)]
    LengthMismatch {
        /// Width of the array.
        expected: usize,
        /// Number of bytes actually decoded.
        got: usize,
    },
    /// Malformed textual data (decimal integers, base64).
    #[fail(display = "malformed: {}", _0)]
    Malformed(String),
    /// A negative integer where an unsigned one was expected.
    #[fail(display = "underflow: {}", _0)]
    Underflow(String),
    /// An integer too wide for its kind.
    #[fail(display = "overflow: {}", _0)]
    Overflow(String),
    /// The JSON had the wrong shape, or could not be parsed at all.
    #[fail(display = "json: {}", _0)]
    Json(String),
    /// A struct field named by the type is absent from the JSON object.
    #[fail(display = "unmarshaling value {:?}: not found", _0)]
    MissingField(String),
    /// Decoding a struct field failed.
    #[fail(display = "unmarshaling value {:?}: {}", name, inner)]
    Field {
        /// Name of the field.
        name: String,
        /// What went wrong.
        inner: Box<DecodingError>,
    },
    /// Decoding a list element failed.
    #[fail(display = "unmarshaling list element {}: {}", index, inner)]
    Element {
        /// Position of the element.
        index: usize,
        /// What went wrong.
        inner: Box<DecodingError>,
    },
    /// A list was decoded without knowing the type of its elements.
    #[fail(display = "cannot unmarshal into list with unknown type")]
    UnknownElementType,
    /// A type descriptor was nested too deeply.
    #[fail(display = "type nested deeper than {} levels", _0)]
    DepthExceeded(usize),
    /// A typed envelope did not describe a struct.
    #[fail(display = "expected kind \"struct\", got kind \"{}\"", _0)]
    NotAStruct(Kind),
}

impl DecodingError {
    pub(crate) fn field(name: &str, inner: DecodingError) -> Self {
        DecodingError::Field {
            name: name.to_owned(),
            inner: Box::new(inner),
        }
    }

    pub(crate) fn element(index: usize, inner: DecodingError) -> Self {
        DecodingError::Element {
            index,
            inner: Box::new(inner),
        }
    }

    /// Strips `Field` and `Element` context, returning the error that caused the
    /// failure.
    ///
    /// # Example
    ///
    /// ```
    /// use pack::prelude::*;
    ///
    /// let ty = Struct::from_iter(vec![("foo", Value::from(true))]).ty();
    ///
    /// let err = ty.unmarshal_value(&[0x07], &DecodeConfig::default()).unwrap_err();
    ///
    /// assert_eq!(err.root(), &DecodingError::InvalidBool(0x07));
    /// ```
    pub fn root(&self) -> &DecodingError {
        match self {
            DecodingError::Field { inner, .. } | DecodingError::Element { inner, .. } => {
                inner.root()
            }
            other => other,
        }
    }
}

impl From<serde_json::Error> for DecodingError {
    fn from(e: serde_json::Error) -> Self { DecodingError::Json(e.to_string()) }
}

#[derive(Debug, Clone, PartialEq, Fail)]
/// An error encountered when building a value, or converting between a value and a
/// native Rust type, fails.
pub enum ConversionError {
    /// [`List::new`](crate::list::List::new) was given no elements, so the element
    /// type cannot be inferred.
    #[fail(display = "cannot construct list with no elements")]
    EmptyList,
    /// [`List::new`](crate::list::List::new) was given nil elements.
    #[fail(display = "cannot construct list of nil elements")]
    NilElement,
    /// List elements do not share one type.
    #[fail(display = "inconsistent list type: expected {}, got {}", expected, got)]
    InconsistentListType {
        /// Type of the first element.
        expected: Type,
        /// Type of the offending element.
        got: Type,
    },
    /// The value has the wrong kind for the destination.
    #[fail(display = "unexpected value of kind {}, expected {}", got, expected)]
    UnexpectedKind {
        /// Kind the destination accepts.
        expected: Kind,
        /// Kind of the value that was supplied.
        got: Kind,
    },
    /// Converting a struct field failed.
    #[fail(display = "decoding {:?}: {}", name, inner)]
    Field {
        /// Wire name of the field.
        name: String,
        /// What went wrong.
        inner: Box<ConversionError>,
    },
    /// Converting a list element failed.
    #[fail(display = "decoding list item {}: {}", index, inner)]
    Element {
        /// Position of the element.
        index: usize,
        /// What went wrong.
        inner: Box<ConversionError>,
    },
    /// A nested decode failed.
    #[fail(display = "{}", _0)]
    Decoding(#[fail(cause)] DecodingError),
    /// A fatal condition (such as arithmetic overflow) was raised mid-conversion.
    #[fail(display = "recovered: {}", _0)]
    Panicked(String),
}

impl ConversionError {
    /// Wraps `inner` with the wire name of the struct field it came from.
    pub fn field(name: &str, inner: ConversionError) -> Self {
        ConversionError::Field {
            name: name.to_owned(),
            inner: Box::new(inner),
        }
    }

    /// Wraps `inner` with the position of the list element it came from.
    pub fn element(index: usize, inner: ConversionError) -> Self {
        ConversionError::Element {
            index,
            inner: Box::new(inner),
        }
    }

    /// Shorthand for [`ConversionError::UnexpectedKind`].
    pub fn unexpected(expected: Kind, got: Kind) -> Self {
        ConversionError::UnexpectedKind { expected, got }
    }
}

impl From<DecodingError> for ConversionError {
    fn from(e: DecodingError) -> Self { ConversionError::Decoding(e) }
}

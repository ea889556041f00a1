//! Decode configuration.
//!
//! Binary decoding is bounded by a byte budget rather than by the size of the input
//! buffer: a short buffer whose length prefixes claim an enormous payload is rejected
//! as soon as a prefix asks for more than is left of the budget, before anything is
//! allocated for it.
//!
//! # Example
//!
//! ```
//! use pack::prelude::*;
//!
//! // a length prefix claiming 1 KiB of string data
//! let data = [0x00, 0x00, 0x04, 0x00];
//!
//! let small = DecodeConfig::default().with_max_bytes(64);
//! let err = Type::String.unmarshal_value(&data, &small).unwrap_err();
//!
//! match err {
//!     DecodingError::QuotaExceeded { .. } => (),
//!     other => panic!("unexpected error: {}", other),
//! }
//! ```

use crate::encoding::constants::DEFAULT_MAX_BYTES;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Settings threaded through every binary decode.
pub struct DecodeConfig {
    /// Total number of bytes a single decode may consume.
    pub max_bytes: usize,
}

impl DecodeConfig {
    /// Creates a configuration with the given byte budget.
    ///
    /// # Arguments
    ///
    /// * `max_bytes: usize` - The number of bytes a decode may consume.
    pub fn new(max_bytes: usize) -> Self { DecodeConfig { max_bytes } }

    /// Returns a copy of this configuration with a different byte budget.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self { DecodeConfig::new(DEFAULT_MAX_BYTES) }
}

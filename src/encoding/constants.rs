/// Default decode budget, 32 MiB.
pub const DEFAULT_MAX_BYTES: usize = 32 * 1024 * 1024;

/// Size of a kind byte.
pub(crate) const SIZE_KIND: usize = 1;
/// Size of a bool.
pub(crate) const SIZE_BOOL: usize = 1;
/// Size of a `u32` length or count prefix.
pub(crate) const SIZE_LEN: usize = 4;

/// Encoded `false`.
pub(crate) const BOOL_FALSE: u8 = 0x00;
/// Encoded `true`.
pub(crate) const BOOL_TRUE: u8 = 0x01;

/// Width of a U128 in bytes.
pub(crate) const SIZE_U128: usize = 16;
/// Width of a U256 in bytes.
pub(crate) const SIZE_U256: usize = 32;

/// Deepest nesting accepted in a decoded type descriptor.
pub const MAX_DEPTH: usize = 64;

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Errors reported by the checked entry points.
//!
//! The hot path (`encode`, `decode`, `decode_slice`) never returns an error:
//! type acceptance is enforced at build time and malformed input is a caller
//! contract violation. Only the opt-in `try_*` wrappers produce these values.

use std::fmt;

/// Errors returned by checked encode/decode operations.
///
/// # Example
///
/// ```rust
/// use streamable::{try_decode_field, Error};
///
/// // A text unit announcing 16 bytes but carrying only 2.
/// let mut bytes = 16u32.to_ne_bytes().to_vec();
/// bytes.extend_from_slice(b"hi");
///
/// match try_decode_field::<String>(&bytes) {
///     Err(Error::Truncated { offset, needed, .. }) => {
///         assert_eq!(offset, 4);
///         assert_eq!(needed, 16);
///     }
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Decode Errors
    // ========================================================================
    /// A unit asked for more bytes than the buffer holds.
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// Text payload is not valid UTF-8 (or UTF-16 for wide text).
    InvalidUtf8 { offset: usize },
    /// Fixed-layout bytes do not form a valid value (bad enum discriminant, bad char).
    InvalidValue {
        offset: usize,
        type_name: &'static str,
    },
    /// The field chain (or an embedded object) finished before the end of
    /// its bytes. Offsets are absolute in the outermost stream.
    TrailingBytes { consumed: usize, len: usize },
    /// A range announced more zero-width elements than there are bytes left.
    ExcessiveCount {
        offset: usize,
        count: usize,
        available: usize,
    },

    // ========================================================================
    // Encode Errors
    // ========================================================================
    /// Bytes written differ from the size estimate used to pre-size the buffer.
    SizeMismatch { estimated: usize, written: usize },
    /// A variable-size unit is too large for the 4-byte length prefix.
    LengthOverflow { len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Truncated {
                offset,
                needed,
                available,
            } => write!(
                f,
                "truncated stream at offset {}: needed {} bytes, {} available",
                offset, needed, available
            ),
            Error::InvalidUtf8 { offset } => write!(f, "invalid text at offset {}", offset),
            Error::InvalidValue { offset, type_name } => {
                write!(f, "invalid {} value at offset {}", type_name, offset)
            }
            Error::TrailingBytes { consumed, len } => write!(
                f,
                "trailing bytes: consumed {} of {} bytes",
                consumed, len
            ),
            Error::ExcessiveCount {
                offset,
                count,
                available,
            } => write!(
                f,
                "count {} at offset {} exceeds the {} bytes available",
                count, offset, available
            ),
            Error::SizeMismatch { estimated, written } => write!(
                f,
                "size estimate mismatch: estimated {} bytes, wrote {}",
                estimated, written
            ),
            Error::LengthOverflow { len } => {
                write!(f, "length {} does not fit the 4-byte prefix", len)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for checked results.
pub type Result<T> = core::result::Result<T, Error>;

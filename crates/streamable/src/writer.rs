// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Stream writer: append-only encoding into a single growing buffer.
//!
//! Layout of every unit appended here:
//!
//! ```text
//! fixed-layout   : raw bytes                         (no prefix)
//! text / path    : u32(byte length) raw bytes
//! range          : u32(element count) unit*
//! embedded object: u32(payload length) payload
//! ```
//!
//! The writer never reallocates when the buffer was pre-sized from a correct
//! estimate; it does not rely on that either, growth is simply `Vec` growth.

use crate::compose::Streamable;
use crate::config::{LengthPrefix, LENGTH_PREFIX_SIZE};
use crate::field::{Field, FixedLayout};

/// Append-only writer over an owned byte buffer.
#[derive(Debug, Default)]
pub struct StreamWriter {
    buffer: Vec<u8>,
    overflow: Option<usize>,
}

impl StreamWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stream with room for exactly `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            overflow: None,
        }
    }

    /// Bytes written so far (the write cursor).
    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// First length that did not fit a [`LengthPrefix`], if any.
    pub fn overflow(&self) -> Option<usize> {
        self.overflow
    }

    /// Hand the finished buffer to the caller.
    pub fn release(self) -> Vec<u8> {
        self.buffer
    }

    /// Write one accepted field.
    pub fn write<T: Field>(&mut self, value: &T) {
        value.write_field(self);
    }

    /// Write a 4-byte length prefix.
    pub fn write_prefix(&mut self, len: usize) {
        let prefix = self.prefix_for(len);
        self.buffer.extend_from_slice(&prefix.to_ne_bytes());
    }

    /// Append bytes with no prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Append a known-size value as its raw image.
    pub fn write_fixed<T: FixedLayout>(&mut self, value: &T) {
        let start = self.buffer.len();
        value.store(&mut self.buffer);
        debug_assert_eq!(
            self.buffer.len() - start,
            T::SIZE,
            "FixedLayout::store for {} wrote a different width than SIZE",
            core::any::type_name::<T>()
        );
    }

    /// Append a variable-size payload: byte length, then the bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_prefix(bytes.len());
        self.write_raw(bytes);
    }

    /// Append a range: element count, then every element in iteration order.
    ///
    /// Nested ranges recurse through their own `write_field`, each layer
    /// emitting its own count (zero included).
    pub fn write_range<'a, T, I>(&mut self, count: usize, items: I)
    where
        T: Field + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.write_prefix(count);
        for item in items {
            item.write_field(self);
        }
    }

    /// Append an embedded object: payload length, then its full encoding.
    ///
    /// The length slot is patched with the bytes actually appended.
    pub fn write_embedded<T: Streamable>(&mut self, object: &T) {
        let slot = self.buffer.len();
        self.buffer.extend_from_slice(&[0u8; LENGTH_PREFIX_SIZE]);

        let payload_start = self.buffer.len();
        object.write_stream(self);
        let payload_len = self.buffer.len() - payload_start;

        let prefix = self.prefix_for(payload_len);
        self.buffer[slot..payload_start].copy_from_slice(&prefix.to_ne_bytes());
    }

    fn prefix_for(&mut self, len: usize) -> LengthPrefix {
        match LengthPrefix::try_from(len) {
            Ok(prefix) => prefix,
            Err(_) => {
                log::warn!("[writer] length {} exceeds the 4-byte prefix", len);
                self.overflow.get_or_insert(len);
                LengthPrefix::MAX
            }
        }
    }
}

/// Write each field in argument order.
///
/// ```rust
/// use streamable::{write_all, StreamWriter};
///
/// let (id, name) = (7u16, String::from("ab"));
/// let mut writer = StreamWriter::new();
/// write_all!(&mut writer, id, name);
/// assert_eq!(writer.offset(), 2 + 4 + 2);
/// ```
#[macro_export]
macro_rules! write_all {
    ($writer:expr $(, $field:expr)* $(,)?) => {{
        let writer: &mut $crate::StreamWriter = $writer;
        $( $crate::Field::write_field(&$field, writer); )*
        let _ = writer;
    }};
}

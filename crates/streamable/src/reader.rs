// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Stream reader: sequential decoding with a monotonic cursor.
//!
//! Two modes share one code path:
//!
//! - **unchecked** (default): the caller guarantees the buffer was produced by
//!   a compatible encode. Nothing is validated; an overrun panics on the slice
//!   bound (with an offset-carrying assertion in debug builds).
//! - **checked** (opt-in, used by `try_decode`): the first overrun or invalid
//!   value is recorded as a fault, the cursor jumps to the end and every later
//!   read yields a zero/empty value so the field chain unwinds quickly.

use crate::compose::Streamable;
use crate::config::{self, LengthPrefix, StreamConfig, LENGTH_PREFIX_SIZE};
use crate::error::Error;
use crate::field::{Field, FixedLayout};

/// Cursor-tracked reader over a borrowed byte buffer.
#[derive(Debug)]
pub struct StreamReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    /// Absolute offset of `buffer[0]` in the outermost stream.
    origin: usize,
    checked: bool,
    max_reserve: usize,
    fault: Option<Error>,
}

impl<'a> StreamReader<'a> {
    /// Unchecked reader using the process-wide configuration.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_config(buffer, &config::current())
    }

    /// Checked reader using the process-wide configuration.
    pub fn checked(buffer: &'a [u8]) -> Self {
        let mut reader = Self::new(buffer);
        reader.checked = true;
        reader
    }

    pub fn with_config(buffer: &'a [u8], config: &StreamConfig) -> Self {
        Self {
            buffer,
            cursor: 0,
            origin: 0,
            checked: false,
            max_reserve: config.max_reserve,
            fault: None,
        }
    }

    /// Cursor position relative to this reader's buffer.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Cursor position in the outermost stream (differs from `offset` inside
    /// an embedded object).
    pub fn stream_offset(&self) -> usize {
        self.origin + self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    pub fn fault(&self) -> Option<&Error> {
        self.fault.as_ref()
    }

    /// Take the recorded fault, leaving the reader clean.
    pub fn take_fault(&mut self) -> Option<Error> {
        self.fault.take()
    }

    /// Drop the buffer and reset the cursor; returns the bytes left unread.
    pub fn clear(&mut self) -> usize {
        let unread = self.remaining();
        self.buffer = &[];
        self.cursor = 0;
        unread
    }

    /// Read one accepted field.
    pub fn read<T: Field>(&mut self) -> T {
        T::read_field(self)
    }

    /// Consume `len` bytes; `None` only in checked mode on overrun.
    pub fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.cursor.saturating_add(len);
        if end > self.buffer.len() {
            if self.checked {
                self.fail(Error::Truncated {
                    offset: self.origin + self.cursor,
                    needed: len,
                    available: self.remaining(),
                });
                return None;
            }
            debug_assert!(
                false,
                "read of {} bytes at offset {} overruns a {}-byte stream",
                len,
                self.origin + self.cursor,
                self.origin + self.buffer.len()
            );
        }
        let bytes = &self.buffer[self.cursor..end];
        self.cursor = end;
        Some(bytes)
    }

    /// Read a 4-byte length prefix.
    pub fn read_prefix(&mut self) -> usize {
        match self.take(LENGTH_PREFIX_SIZE) {
            Some(bytes) => {
                let mut raw = [0u8; LENGTH_PREFIX_SIZE];
                raw.copy_from_slice(bytes);
                LengthPrefix::from_ne_bytes(raw) as usize
            }
            None => 0,
        }
    }

    /// Read exactly `T::SIZE` raw bytes as a value (no prefix consumed).
    pub fn read_fixed<T: FixedLayout>(&mut self) -> T {
        let at = self.stream_offset();
        let Some(bytes) = self.take(T::SIZE) else {
            return T::zeroed();
        };
        if self.checked && !T::is_valid(bytes) {
            self.fail(Error::InvalidValue {
                offset: at,
                type_name: core::any::type_name::<T>(),
            });
            return T::zeroed();
        }
        T::load(bytes)
    }

    /// Read a length-prefixed payload, borrowed from the buffer.
    pub fn read_bytes(&mut self) -> &'a [u8] {
        let len = self.read_prefix();
        self.take(len).unwrap_or(&[])
    }

    /// Read a length-prefixed UTF-8 payload.
    pub fn read_text(&mut self) -> String {
        let at = self.stream_offset() + LENGTH_PREFIX_SIZE;
        let bytes = self.read_bytes();
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_owned(),
            Err(_) if self.checked => {
                self.fail(Error::InvalidUtf8 { offset: at });
                String::new()
            }
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Read a length-prefixed UTF-16 payload as code units.
    pub fn read_wide(&mut self) -> Vec<u16> {
        let at = self.stream_offset() + LENGTH_PREFIX_SIZE;
        let bytes = self.read_bytes();
        if bytes.len() % 2 != 0 && self.checked {
            self.fail(Error::InvalidUtf8 { offset: at });
            return Vec::new();
        }
        bytes
            .chunks_exact(2)
            .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
            .collect()
    }

    /// Read a range's element count.
    pub fn read_count(&mut self) -> usize {
        self.read_prefix()
    }

    /// Number of elements worth reserving for a range of `count`.
    pub fn reserve_hint(&self, count: usize) -> usize {
        let hint = count.min(self.max_reserve);
        if self.checked {
            hint.min(self.remaining())
        } else {
            hint
        }
    }

    /// Read `count` elements in encounter order, handing each to `insert`.
    pub fn read_elements<T: Field>(&mut self, count: usize, mut insert: impl FnMut(T)) {
        self.read_units(count, |reader| insert(T::read_field(reader)));
    }

    /// Run `unit` up to `count` times, stopping at the first fault.
    ///
    /// In checked mode a unit that consumes no input (a zero-width fixed
    /// value) cannot be repeated more times than there are bytes left, which
    /// bounds the work done for any input length.
    pub fn read_units(&mut self, count: usize, mut unit: impl FnMut(&mut Self)) {
        let start = self.stream_offset();
        let available = self.remaining();
        for index in 0..count {
            if self.is_faulted() {
                break;
            }
            let before = self.cursor;
            unit(self);
            if index == 0 && self.checked && self.cursor == before && count > available {
                self.fail(Error::ExcessiveCount {
                    offset: start,
                    count,
                    available,
                });
            }
        }
    }

    /// Read an embedded object: payload length, then the object decoded from
    /// exactly that sub-slice.
    ///
    /// A payload the object does not fully consume is skipped in unchecked
    /// mode and reported as [`Error::TrailingBytes`] (absolute offsets) in
    /// checked mode.
    pub fn read_embedded<T: Streamable>(&mut self) -> T {
        let len = self.read_prefix();
        let origin = self.origin + self.cursor;
        let Some(payload) = self.take(len) else {
            return T::read_stream(&mut self.detached());
        };

        let mut sub = StreamReader {
            buffer: payload,
            cursor: 0,
            origin,
            checked: self.checked,
            max_reserve: self.max_reserve,
            fault: None,
        };
        let object = T::read_stream(&mut sub);
        if let Some(err) = sub.fault.take() {
            self.fail(err);
        } else if sub.remaining() != 0 && self.checked {
            self.fail(Error::TrailingBytes {
                consumed: origin + sub.cursor,
                len: origin + len,
            });
        } else if sub.remaining() != 0 {
            log::debug!(
                "[reader] embedded {} left {} of {} bytes unread",
                core::any::type_name::<T>(),
                sub.remaining(),
                len
            );
        }
        object
    }

    /// Checked reader over nothing, already faulted: yields defaults.
    fn detached(&self) -> StreamReader<'a> {
        StreamReader {
            buffer: &[],
            cursor: 0,
            origin: self.origin + self.cursor,
            checked: true,
            max_reserve: 0,
            fault: Some(Error::Truncated {
                offset: self.origin + self.cursor,
                needed: 0,
                available: 0,
            }),
        }
    }

    pub(crate) fn fail(&mut self, err: Error) {
        if self.fault.is_none() {
            log::trace!("[reader] checked decode fault: {}", err);
            self.fault = Some(err);
        }
        self.cursor = self.buffer.len();
    }
}

/// Read each place in argument order from a reader.
///
/// ```rust
/// use streamable::{read_all, write_all, StreamReader, StreamWriter};
///
/// let mut writer = StreamWriter::new();
/// write_all!(&mut writer, 3u32, String::from("xyz"));
/// let bytes = writer.release();
///
/// let (mut n, mut s) = (0u32, String::new());
/// let mut reader = StreamReader::new(&bytes);
/// read_all!(&mut reader, n, s);
/// assert_eq!((n, s.as_str()), (3, "xyz"));
/// ```
#[macro_export]
macro_rules! read_all {
    ($reader:expr $(, $place:expr)* $(,)?) => {{
        let reader: &mut $crate::StreamReader<'_> = $reader;
        $( $place = $crate::Field::read_field(reader); )*
        let _ = reader;
    }};
}

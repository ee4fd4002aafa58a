// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composition protocol: hierarchy levels sharing one buffer.
//!
//! Each level of a hierarchy implements [`Streamable`] for its own fields and
//! names the level below it as `Base` (`()` at the root). The provided
//! methods chain base-first, so one encode lays out
//!
//! ```text
//! root fields ++ middle fields ++ ... ++ leaf fields
//! ```
//!
//! and one decode consumes them in the same order.
//!
//! The drivers in this module play the outer roles: [`encode`] estimates the
//! whole chain once and allocates (start), the levels append (middle), and the
//! finished buffer is handed back (end). [`decode`] assigns the buffer and a
//! zero cursor once, the levels read in order, then the reader is cleared.

use crate::config::{self, SizeCheck, StreamConfig};
use crate::error::{Error, Result};
use crate::field::Field;
use crate::reader::StreamReader;
use crate::writer::StreamWriter;

/// One level of a streamable hierarchy.
///
/// Implement it by hand or with `#[derive(Streamable)]`. The three `own`
/// hooks must agree: `write_own` appends exactly `own_size()` bytes and
/// `read_own` consumes exactly what `write_own` produced, field for field in
/// the same order.
///
/// ```rust
/// use streamable::{read_all, size_of_all, write_all, StreamReader, StreamWriter, Streamable};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Node {
///     id: u64,
///     label: String,
/// }
///
/// impl Streamable for Node {
///     type Base = ();
///
///     fn base(&self) -> &() {
///         &()
///     }
///
///     fn own_size(&self) -> usize {
///         size_of_all!(self.id, self.label)
///     }
///
///     fn write_own(&self, writer: &mut StreamWriter) {
///         write_all!(writer, self.id, self.label);
///     }
///
///     fn read_own(reader: &mut StreamReader<'_>, _base: ()) -> Self {
///         let mut node = Node::default();
///         read_all!(reader, node.id, node.label);
///         node
///     }
/// }
///
/// let node = Node { id: 7, label: "n7".into() };
/// let bytes = node.to_stream();
/// assert_eq!(bytes.len(), 8 + 4 + 2);
/// assert_eq!(Node::from_stream(bytes), node);
/// ```
pub trait Streamable: Sized {
    /// The level this one extends; `()` for a root.
    type Base: Streamable;

    fn base(&self) -> &Self::Base;

    /// Encoded length of this level's own fields.
    fn own_size(&self) -> usize;

    /// Append this level's own fields.
    fn write_own(&self, writer: &mut StreamWriter);

    /// Read this level's own fields and assemble the level around `base`.
    fn read_own(reader: &mut StreamReader<'_>, base: Self::Base) -> Self;

    /// Encoded length of the whole chain, root to this level.
    fn stream_size(&self) -> usize {
        self.base().stream_size() + self.own_size()
    }

    /// Append the whole chain, root fields first.
    fn write_stream(&self, writer: &mut StreamWriter) {
        self.base().write_stream(writer);
        self.write_own(writer);
    }

    /// Read the whole chain, root fields first.
    fn read_stream(reader: &mut StreamReader<'_>) -> Self {
        let base = Self::Base::read_stream(reader);
        Self::read_own(reader, base)
    }

    fn to_stream(&self) -> Vec<u8> {
        encode(self)
    }

    fn from_stream(bytes: Vec<u8>) -> Self {
        decode(bytes)
    }
}

/// End of every chain: contributes nothing.
impl Streamable for () {
    type Base = ();

    fn base(&self) -> &() {
        self
    }

    fn own_size(&self) -> usize {
        0
    }

    fn write_own(&self, _writer: &mut StreamWriter) {}

    fn read_own(_reader: &mut StreamReader<'_>, _base: ()) -> Self {}

    fn stream_size(&self) -> usize {
        0
    }

    fn write_stream(&self, _writer: &mut StreamWriter) {}

    fn read_stream(_reader: &mut StreamReader<'_>) -> Self {}
}

// ============================================================================
// Object drivers
// ============================================================================

/// Encoded length of `value`'s whole chain.
pub fn size_of<T: Streamable>(value: &T) -> usize {
    value.stream_size()
}

/// Encode `value` into a buffer sized once from the estimate.
///
/// A mismatch between the estimate and the bytes written is handled per the
/// process-wide [`SizeCheck`].
pub fn encode<T: Streamable>(value: &T) -> Vec<u8> {
    encode_with(value, &config::current())
}

/// [`encode`] with an explicit configuration.
pub fn encode_with<T: Streamable>(value: &T, config: &StreamConfig) -> Vec<u8> {
    let estimated = value.stream_size();
    let mut writer = StreamWriter::with_capacity(estimated);
    value.write_stream(&mut writer);
    finish_encode(
        writer,
        estimated,
        core::any::type_name::<T>(),
        config.size_check,
    )
}

/// Encode `value`, reporting an estimate mismatch or a prefix overflow as an
/// error instead of applying [`SizeCheck`].
pub fn try_encode<T: Streamable>(value: &T) -> Result<Vec<u8>> {
    let estimated = value.stream_size();
    let mut writer = StreamWriter::with_capacity(estimated);
    value.write_stream(&mut writer);
    if let Some(len) = writer.overflow() {
        return Err(Error::LengthOverflow { len });
    }
    let written = writer.offset();
    if written != estimated {
        return Err(Error::SizeMismatch { estimated, written });
    }
    Ok(writer.release())
}

/// Rebuild a `T` from bytes produced by a compatible [`encode`].
///
/// The buffer is consumed. Input is trusted: truncated bytes panic on a slice
/// bound, they are never read out of range.
pub fn decode<T: Streamable>(bytes: Vec<u8>) -> T {
    decode_slice(&bytes)
}

/// [`decode`] over a borrowed buffer.
pub fn decode_slice<T: Streamable>(bytes: &[u8]) -> T {
    let mut reader = StreamReader::new(bytes);
    let value = T::read_stream(&mut reader);
    finish_decode::<T>(&mut reader, bytes.len());
    value
}

/// Checked decode: a truncated or invalid stream yields an [`Error`], as does
/// a stream with bytes left after the last field.
pub fn try_decode<T: Streamable>(bytes: &[u8]) -> Result<T> {
    let mut reader = StreamReader::checked(bytes);
    let value = T::read_stream(&mut reader);
    check_complete(&mut reader, bytes.len())?;
    Ok(value)
}

// ============================================================================
// Field drivers
// ============================================================================

/// Encoded length of a single field.
pub fn field_size<T: Field>(value: &T) -> usize {
    value.encoded_size()
}

/// Encode a single field as a stand-alone stream.
pub fn encode_field<T: Field>(value: &T) -> Vec<u8> {
    let estimated = value.encoded_size();
    let mut writer = StreamWriter::with_capacity(estimated);
    value.write_field(&mut writer);
    finish_encode(
        writer,
        estimated,
        core::any::type_name::<T>(),
        config::current().size_check,
    )
}

/// Decode a single field from a stand-alone stream.
pub fn decode_field<T: Field>(bytes: &[u8]) -> T {
    let mut reader = StreamReader::new(bytes);
    let value = T::read_field(&mut reader);
    finish_decode::<T>(&mut reader, bytes.len());
    value
}

/// Checked [`decode_field`].
pub fn try_decode_field<T: Field>(bytes: &[u8]) -> Result<T> {
    let mut reader = StreamReader::checked(bytes);
    let value = T::read_field(&mut reader);
    check_complete(&mut reader, bytes.len())?;
    Ok(value)
}

/// Close an encode: compare the written length with the estimate and hand
/// the buffer over.
#[doc(hidden)]
pub fn finish_encode(
    writer: StreamWriter,
    estimated: usize,
    what: &str,
    check: SizeCheck,
) -> Vec<u8> {
    let written = writer.offset();
    if let Some(len) = writer.overflow() {
        match check {
            SizeCheck::Panic => panic!("{}: {}", what, Error::LengthOverflow { len }),
            SizeCheck::Warn => log::warn!("[encode] {}: {}", what, Error::LengthOverflow { len }),
            SizeCheck::Ignore => {}
        }
    }
    if written != estimated {
        let err = Error::SizeMismatch { estimated, written };
        match check {
            SizeCheck::Panic => panic!("{}: {}", what, err),
            SizeCheck::Warn => log::warn!("[encode] {}: {}", what, err),
            SizeCheck::Ignore => {}
        }
    }
    log::trace!("[encode] {} -> {} bytes", what, written);
    writer.release()
}

fn finish_decode<T>(reader: &mut StreamReader<'_>, len: usize) {
    let unread = reader.clear();
    if unread != 0 {
        log::debug!(
            "[decode] {} left {} of {} bytes unread",
            core::any::type_name::<T>(),
            unread,
            len
        );
    }
    log::trace!(
        "[decode] {} <- {} bytes",
        core::any::type_name::<T>(),
        len - unread
    );
}

fn check_complete(reader: &mut StreamReader<'_>, len: usize) -> Result<()> {
    if let Some(err) = reader.take_fault() {
        return Err(err);
    }
    let consumed = reader.offset();
    if consumed != len {
        return Err(Error::TrailingBytes { consumed, len });
    }
    reader.clear();
    Ok(())
}

/// Encode a field list as one stream, sized once.
///
/// Every argument is evaluated twice (sizing, then writing); pass fields or
/// locals rather than expressions with side effects.
///
/// ```rust
/// use streamable::{encode_all, read_all, StreamReader};
///
/// let (id, name) = (42u32, String::from("probe"));
/// let bytes = encode_all!(id, name);
/// assert_eq!(bytes.len(), 4 + 4 + 5);
///
/// let (mut id2, mut name2) = (0u32, String::new());
/// read_all!(&mut StreamReader::new(&bytes), id2, name2);
/// assert_eq!((id2, name2.as_str()), (42, "probe"));
/// ```
#[macro_export]
macro_rules! encode_all {
    ($($field:expr),* $(,)?) => {{
        let estimated = $crate::size_of_all!($($field),*);
        let mut writer = $crate::StreamWriter::with_capacity(estimated);
        $crate::write_all!(&mut writer $(, $field)*);
        $crate::compose::finish_encode(
            writer,
            estimated,
            "field list",
            $crate::config::current().size_check,
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{read_all, size_of_all, write_all};

    #[derive(Debug, Default, PartialEq)]
    struct Root {
        tag: u8,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Middle {
        root: Root,
        name: String,
    }

    #[derive(Debug, Default, PartialEq)]
    struct Leaf {
        middle: Middle,
        weight: u16,
    }

    impl Streamable for Root {
        type Base = ();

        fn base(&self) -> &() {
            &()
        }

        fn own_size(&self) -> usize {
            size_of_all!(self.tag)
        }

        fn write_own(&self, writer: &mut StreamWriter) {
            write_all!(writer, self.tag);
        }

        fn read_own(reader: &mut StreamReader<'_>, _base: ()) -> Self {
            let mut root = Root::default();
            read_all!(reader, root.tag);
            root
        }
    }

    impl Streamable for Middle {
        type Base = Root;

        fn base(&self) -> &Root {
            &self.root
        }

        fn own_size(&self) -> usize {
            size_of_all!(self.name)
        }

        fn write_own(&self, writer: &mut StreamWriter) {
            write_all!(writer, self.name);
        }

        fn read_own(reader: &mut StreamReader<'_>, root: Root) -> Self {
            Middle {
                root,
                name: reader.read(),
            }
        }
    }

    impl Streamable for Leaf {
        type Base = Middle;

        fn base(&self) -> &Middle {
            &self.middle
        }

        fn own_size(&self) -> usize {
            size_of_all!(self.weight)
        }

        fn write_own(&self, writer: &mut StreamWriter) {
            write_all!(writer, self.weight);
        }

        fn read_own(reader: &mut StreamReader<'_>, middle: Middle) -> Self {
            Leaf {
                middle,
                weight: reader.read(),
            }
        }
    }

    fn sample() -> Leaf {
        Leaf {
            middle: Middle {
                root: Root { tag: 9 },
                name: String::from("mid"),
            },
            weight: 0x0102,
        }
    }

    #[test]
    fn test_chain_writes_root_first() {
        let leaf = sample();
        let bytes = encode(&leaf);

        let mut expected = vec![9u8];
        expected.extend_from_slice(&3u32.to_ne_bytes());
        expected.extend_from_slice(b"mid");
        expected.extend_from_slice(&0x0102u16.to_ne_bytes());
        assert_eq!(bytes, expected);
        assert_eq!(size_of(&leaf), bytes.len());
    }

    #[test]
    fn test_chain_round_trip() {
        let leaf = sample();
        let decoded: Leaf = decode(encode(&leaf));
        assert_eq!(decoded, leaf);
        assert_eq!(Leaf::from_stream(leaf.to_stream()), leaf);
    }

    #[test]
    fn test_unit_contributes_nothing() {
        assert_eq!(size_of(&()), 0);
        assert!(encode(&()).is_empty());
    }

    #[test]
    fn test_try_decode_reports_trailing_bytes() {
        let mut bytes = encode(&sample());
        bytes.push(0xAA);
        let len = bytes.len();
        assert_eq!(
            try_decode::<Leaf>(&bytes),
            Err(Error::TrailingBytes {
                consumed: len - 1,
                len
            })
        );
    }

    #[test]
    fn test_try_decode_reports_truncation() {
        let bytes = encode(&sample());
        let err = try_decode::<Leaf>(&bytes[..bytes.len() - 1]).expect_err("truncated");
        assert!(matches!(err, Error::Truncated { offset: 8, .. }));
    }

    #[test]
    fn test_field_drivers() {
        let value = vec![String::from("a"), String::from("bc")];
        let bytes = encode_field(&value);
        assert_eq!(bytes.len(), field_size(&value));
        assert_eq!(decode_field::<Vec<String>>(&bytes), value);
        assert_eq!(
            try_decode_field::<Vec<String>>(&bytes).expect("decode should succeed"),
            value
        );
    }

    #[test]
    fn test_encode_all_matches_write_all() {
        let (a, b) = (5u32, String::from("xy"));
        let bytes = encode_all!(a, b);
        let mut writer = StreamWriter::new();
        write_all!(&mut writer, a, b);
        assert_eq!(bytes, writer.release());
    }
}

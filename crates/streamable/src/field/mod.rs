// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Accepted field types.
//!
//! Every type that may appear in a stream implements [`Field`]. The impl a
//! type picks up *is* its classification: there is exactly one per type, and
//! a type with none is rejected at build time.
//!
//! # Module Organization
//!
//! - [`fixed`] - known-size values (integers, floats, bool, char, arrays, POD records)
//! - [`text`] - `String`, `Box<str>`, [`WideString`], `PathBuf`
//! - [`range`] - sequences, sets and maps, at any nesting depth
//! - [`object`] - embedded [`Streamable`](crate::Streamable) objects
//!
//! # Precedence
//!
//! Text and paths are structurally ranges in other languages; here they simply
//! implement `Field` as text, so the range impls never see them. The order
//! text, path, fixed, object, range is therefore fixed by construction.

pub mod fixed;
pub mod object;
pub mod range;
pub mod text;

pub use text::WideString;

use crate::oracle::Category;
use crate::reader::StreamReader;
use crate::writer::StreamWriter;

/// An accepted field type.
///
/// The associated consts are the static classification; the methods are the
/// category's estimator, writer and reader, and must agree byte for byte:
/// `write_field` appends exactly `encoded_size()` bytes and `read_field`
/// consumes exactly what `write_field` produced.
pub trait Field: Sized {
    /// How values of this type are encoded.
    const CATEGORY: Category;

    /// Range nesting depth: 0 for non-range types, `1 + Item::LAYERS` for ranges.
    const LAYERS: usize = 0;

    /// Encoded byte length of this value, prefix included.
    fn encoded_size(&self) -> usize;

    /// Append this value to the stream.
    fn write_field(&self, writer: &mut StreamWriter);

    /// Reconstruct a value from the stream.
    fn read_field(reader: &mut StreamReader<'_>) -> Self;
}

/// A known-size type: encoded as its raw bytes, with no prefix.
///
/// The width is a property of the type alone. Byte order is the producing
/// machine's native order.
pub trait FixedLayout: Sized {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Append exactly `SIZE` bytes.
    fn store(&self, out: &mut Vec<u8>);

    /// Rebuild a value from exactly `SIZE` bytes.
    fn load(src: &[u8]) -> Self;

    /// Value produced for unreadable input in checked mode.
    fn zeroed() -> Self;

    /// Whether `src` (exactly `SIZE` bytes) is a valid image. Consulted only
    /// by the checked decoder.
    fn is_valid(src: &[u8]) -> bool {
        let _ = src;
        true
    }
}

/// Implement [`Field`] for types that already implement [`FixedLayout`].
///
/// `#[derive(FixedLayout)]` and [`pod_layout!`](crate::pod_layout) do this
/// automatically; a hand-written `FixedLayout` impl needs it explicitly.
#[macro_export]
macro_rules! fixed_field {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Field for $ty {
            const CATEGORY: $crate::Category = $crate::Category::Fixed;

            #[inline]
            fn encoded_size(&self) -> usize {
                <$ty as $crate::FixedLayout>::SIZE
            }

            #[inline]
            fn write_field(&self, writer: &mut $crate::StreamWriter) {
                writer.write_fixed(self);
            }

            #[inline]
            fn read_field(reader: &mut $crate::StreamReader<'_>) -> Self {
                reader.read_fixed::<$ty>()
            }
        }
    )+};
}

/// Stream a plain-old-data aggregate as its raw memory image.
///
/// The type must implement `bytemuck::Pod`; its width is
/// `size_of::<T>()`, padding included, exactly as the aggregate sits in
/// memory.
///
/// ```rust
/// use bytemuck::{Pod, Zeroable};
///
/// #[repr(C)]
/// #[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
/// struct Guid {
///     data1: u32,
///     data2: u16,
///     data3: u16,
///     data4: [u8; 8],
/// }
/// streamable::pod_layout!(Guid);
///
/// assert_eq!(streamable::field_size(&Guid::zeroed()), 16);
/// ```
#[macro_export]
macro_rules! pod_layout {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::FixedLayout for $ty {
            const SIZE: usize = ::core::mem::size_of::<$ty>();

            fn store(&self, out: &mut ::std::vec::Vec<u8>) {
                out.extend_from_slice($crate::__private::bytemuck::bytes_of(self));
            }

            fn load(src: &[u8]) -> Self {
                $crate::__private::bytemuck::pod_read_unaligned(src)
            }

            fn zeroed() -> Self {
                <$ty as $crate::__private::bytemuck::Zeroable>::zeroed()
            }
        }

        $crate::fixed_field!($ty);
    )+};
}

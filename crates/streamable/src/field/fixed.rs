// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Known-size values: primitives, arrays of known-size values.
//!
//! Encoded as the native-endian raw image, no prefix.

use super::{Field, FixedLayout};
use crate::oracle::Category;
use crate::reader::StreamReader;
use crate::writer::StreamWriter;

/// Generate `FixedLayout` + `Field` for numeric primitives (`to_ne_bytes` round trip).
macro_rules! impl_fixed_numeric {
    ($($ty:ty),+ $(,)?) => {$(
        impl FixedLayout for $ty {
            const SIZE: usize = core::mem::size_of::<$ty>();

            #[inline]
            fn store(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn load(src: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(src);
                <$ty>::from_ne_bytes(raw)
            }

            #[inline]
            fn zeroed() -> Self {
                0 as $ty
            }
        }

        crate::fixed_field!($ty);
    )+};
}

impl_fixed_numeric!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl FixedLayout for bool {
    const SIZE: usize = 1;

    fn store(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }

    fn load(src: &[u8]) -> Self {
        src[0] != 0
    }

    fn zeroed() -> Self {
        false
    }

    fn is_valid(src: &[u8]) -> bool {
        src[0] <= 1
    }
}

crate::fixed_field!(bool);

impl FixedLayout for char {
    const SIZE: usize = 4;

    fn store(&self, out: &mut Vec<u8>) {
        u32::from(*self).store(out);
    }

    fn load(src: &[u8]) -> Self {
        let code = u32::load(src);
        debug_assert!(
            char::from_u32(code).is_some(),
            "invalid char code point {:#x}",
            code
        );
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn zeroed() -> Self {
        '\0'
    }

    fn is_valid(src: &[u8]) -> bool {
        char::from_u32(u32::load(src)).is_some()
    }
}

crate::fixed_field!(char);

impl<T: FixedLayout, const N: usize> FixedLayout for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn store(&self, out: &mut Vec<u8>) {
        for item in self {
            item.store(out);
        }
    }

    fn load(src: &[u8]) -> Self {
        core::array::from_fn(|i| T::load(&src[i * T::SIZE..(i + 1) * T::SIZE]))
    }

    fn zeroed() -> Self {
        core::array::from_fn(|_| T::zeroed())
    }

    fn is_valid(src: &[u8]) -> bool {
        T::SIZE == 0 || src.chunks_exact(T::SIZE).all(T::is_valid)
    }
}

impl<T: FixedLayout, const N: usize> Field for [T; N] {
    const CATEGORY: Category = Category::Fixed;

    fn encoded_size(&self) -> usize {
        Self::SIZE
    }

    fn write_field(&self, writer: &mut StreamWriter) {
        writer.write_fixed(self);
    }

    fn read_field(reader: &mut StreamReader<'_>) -> Self {
        reader.read_fixed()
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Size estimator.
//!
//! Mirrors the writer category by category so the top-level encode can
//! allocate once. Per-category rules live in each `Field::encoded_size`;
//! this module holds the range rule shared by every container and the
//! field-list sum.
//!
//! # Uniform-shape rule
//!
//! A range whose elements are themselves ranges is estimated from its first
//! element only: `4 + count * size(first)`. This is exact when every inner
//! range has the same encoded length (fixed-shape matrices) and wrong
//! otherwise; the writer back-patches nothing for ranges, so a heterogeneous
//! nested range makes `encode` observe a size mismatch.

use crate::config::LENGTH_PREFIX_SIZE;
use crate::field::Field;

/// Estimated encoded length of a range holding `count` elements.
pub fn range_size<'a, T, I>(count: usize, items: I) -> usize
where
    T: Field + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut items = items.into_iter();
    if T::LAYERS > 0 {
        // Nested range: one representative element stands for the layer.
        match items.next() {
            Some(first) => LENGTH_PREFIX_SIZE + count * first.encoded_size(),
            None => LENGTH_PREFIX_SIZE,
        }
    } else {
        LENGTH_PREFIX_SIZE + items.map(|item| item.encoded_size()).sum::<usize>()
    }
}

/// Encoded length of a map (exact, entry by entry).
pub fn map_size<'a, K, V, I>(entries: I) -> usize
where
    K: Field + 'a,
    V: Field + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let payload: usize = entries
        .into_iter()
        .map(|(key, value)| key.encoded_size() + value.encoded_size())
        .sum();
    LENGTH_PREFIX_SIZE + payload
}

/// Left-to-right sum of each field's encoded length.
///
/// ```rust
/// use streamable::size_of_all;
///
/// let (id, name, tags) = (1u64, String::from("node"), vec![1u8, 2, 3]);
/// assert_eq!(size_of_all!(id, name, tags), 8 + (4 + 4) + (4 + 3));
/// assert_eq!(size_of_all!(), 0);
/// ```
#[macro_export]
macro_rules! size_of_all {
    ($($field:expr),* $(,)?) => {
        0usize $( + $crate::Field::encoded_size(&$field) )*
    };
}

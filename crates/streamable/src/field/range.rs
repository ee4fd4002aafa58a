// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ranges: sequences, sets and maps.
//!
//! ```text
//! depth 1 : u32(count) unit*
//! depth N : u32(count) (u32(count) ...)*
//! ```
//!
//! Depth falls out of the element type's own `Field` impl: a range of ranges
//! writes each element through the inner range's `write_field`, which emits
//! its own count. Maps are depth 1 (key unit, value unit per entry).

use super::Field;
use crate::oracle::Category;
use crate::reader::StreamReader;
use crate::size;
use crate::writer::StreamWriter;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Generate `Field` for a sequence/set type.
///
/// `$new` builds an empty container from the capped reserve hint, `$insert`
/// appends one element in encounter order.
macro_rules! impl_range {
    (
        $ty:ident < T $(, $extra:ident)* >
        where [$($bounds:tt)*],
        new = |$hint:ident| $new:expr,
        insert = |$coll:ident, $item:ident| $insert:expr
    ) => {
        impl<T $(, $extra)*> Field for $ty<T $(, $extra)*>
        where
            T: Field,
            $($bounds)*
        {
            const CATEGORY: Category = Category::Range;
            const LAYERS: usize = 1 + T::LAYERS;

            fn encoded_size(&self) -> usize {
                size::range_size(self.len(), self.iter())
            }

            fn write_field(&self, writer: &mut StreamWriter) {
                writer.write_range(self.len(), self.iter());
            }

            fn read_field(reader: &mut StreamReader<'_>) -> Self {
                let count = reader.read_count();
                let $hint = reader.reserve_hint(count);
                let mut $coll = $new;
                reader.read_elements::<T>(count, |$item| $insert);
                $coll
            }
        }
    };
}

impl_range!(
    Vec<T> where [],
    new = |hint| Vec::with_capacity(hint),
    insert = |items, item| items.push(item)
);

impl_range!(
    VecDeque<T> where [],
    new = |hint| VecDeque::with_capacity(hint),
    insert = |items, item| items.push_back(item)
);

impl_range!(
    LinkedList<T> where [],
    new = |_hint| LinkedList::new(),
    insert = |items, item| items.push_back(item)
);

impl_range!(
    BTreeSet<T> where [T: Ord,],
    new = |_hint| BTreeSet::new(),
    insert = |items, item| {
        items.insert(item);
    }
);

impl_range!(
    HashSet<T, S> where [T: Eq + Hash, S: BuildHasher + Default,],
    new = |hint| HashSet::with_capacity_and_hasher(hint, S::default()),
    insert = |items, item| {
        items.insert(item);
    }
);

/// Generate `Field` for a map type: count, then key and value per entry.
macro_rules! impl_map {
    (
        $ty:ident < K, V $(, $extra:ident)* >
        where [$($bounds:tt)*],
        new = |$hint:ident| $new:expr
    ) => {
        impl<K, V $(, $extra)*> Field for $ty<K, V $(, $extra)*>
        where
            K: Field,
            V: Field,
            $($bounds)*
        {
            const CATEGORY: Category = Category::Range;
            const LAYERS: usize = 1;

            fn encoded_size(&self) -> usize {
                size::map_size(self.iter())
            }

            fn write_field(&self, writer: &mut StreamWriter) {
                writer.write_prefix(self.len());
                for (key, value) in self {
                    key.write_field(writer);
                    value.write_field(writer);
                }
            }

            fn read_field(reader: &mut StreamReader<'_>) -> Self {
                let count = reader.read_count();
                let $hint = reader.reserve_hint(count);
                let mut map = $new;
                reader.read_units(count, |reader| {
                    let key = K::read_field(reader);
                    let value = V::read_field(reader);
                    map.insert(key, value);
                });
                map
            }
        }
    };
}

impl_map!(
    BTreeMap<K, V> where [K: Ord,],
    new = |_hint| BTreeMap::new()
);

impl_map!(
    HashMap<K, V, S> where [K: Eq + Hash, S: BuildHasher + Default,],
    new = |hint| HashMap::with_capacity_and_hasher(hint, S::default())
);

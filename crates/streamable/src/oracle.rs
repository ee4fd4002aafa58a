// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type oracle: the static answer to "how is a `T` encoded?".
//!
//! Classification is carried by the type's [`Field`] impl, so every helper
//! here is a `const fn` over associated consts and costs nothing at runtime.

use crate::field::Field;

/// Encoding category of an accepted field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `u32(byte length) bytes`.
    Text,
    /// Wide text form of a path, then as [`Category::Text`].
    Path,
    /// Raw image, width known from the type, no prefix.
    Fixed,
    /// `u32(payload length) payload` of an embedded streamable object.
    Object,
    /// `u32(element count) unit*`, recursively.
    Range,
}

impl Category {
    /// Whether units of this category start with a length prefix.
    pub const fn has_prefix(self) -> bool {
        !matches!(self, Category::Fixed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::Path => "path",
            Category::Fixed => "fixed",
            Category::Object => "object",
            Category::Range => "range",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of `T`.
pub const fn category_of<T: Field>() -> Category {
    T::CATEGORY
}

/// Range nesting depth of `T` (0 for anything that is not a range).
pub const fn range_layers<T: Field>() -> usize {
    T::LAYERS
}

/// Whether `T` has a width known from the type alone.
pub const fn is_known_size<T: Field>() -> bool {
    matches!(T::CATEGORY, Category::Fixed)
}

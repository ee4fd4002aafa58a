// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Embedded streamable objects.
//!
//! An object field is `u32(payload length) payload`, where the payload is
//! the object's full base-first encoding. It is one level of length-prefixed
//! embedding, whatever the object nests internally.

use super::Field;
use crate::compose::Streamable;
use crate::config::LENGTH_PREFIX_SIZE;
use crate::oracle::Category;
use crate::reader::StreamReader;
use crate::writer::StreamWriter;

impl<T: Streamable> Field for T {
    const CATEGORY: Category = Category::Object;

    fn encoded_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.stream_size()
    }

    fn write_field(&self, writer: &mut StreamWriter) {
        writer.write_embedded(self);
    }

    fn read_field(reader: &mut StreamReader<'_>) -> Self {
        reader.read_embedded()
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Example readability

/// Shapes Example
///
/// Demonstrates:
/// - A three-level hierarchy (Shape -> Rectangle -> Square) with #[derive(Streamable)]
/// - A fixed-layout enum field
/// - Embedding a derived object inside another object
use streamable::{FixedLayout, Streamable};

#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FixedLayout)]
enum ShapeKind {
    #[default]
    Unknown,
    Rectangle,
    Square,
    Circle,
}

#[derive(Debug, Default, PartialEq, Streamable)]
struct Shape {
    kind: ShapeKind,
}

#[derive(Debug, Default, PartialEq, Streamable)]
struct Rectangle {
    #[streamable(base)]
    shape: Shape,
    length: f64,
    width: f64,
}

#[derive(Debug, Default, PartialEq, Streamable)]
struct Square {
    #[streamable(base)]
    rectangle: Rectangle,
    diagonal: f64,
}

impl Square {
    fn new(side: f64) -> Self {
        Self {
            rectangle: Rectangle {
                shape: Shape {
                    kind: ShapeKind::Square,
                },
                length: side,
                width: side,
            },
            diagonal: side / std::f64::consts::SQRT_2,
        }
    }

    fn describe(&self) -> String {
        format!(
            "kind = {:?}, length = {}, width = {}, diagonal = {}",
            self.rectangle.shape.kind,
            self.rectangle.length,
            self.rectangle.width,
            self.diagonal
        )
    }
}

#[derive(Debug, Default, PartialEq, Streamable)]
struct Ints {
    ints: Vec<i32>,
}

#[derive(Debug, Default, PartialEq, Streamable)]
struct NestedInts {
    #[streamable(base)]
    inner: Ints,
}

#[derive(Debug, Default, PartialEq, Streamable)]
struct Something {
    nested: NestedInts,
}

fn main() {
    println!("=== Streamable Shapes Example ===\n");

    let start = Square::new(123.456);
    println!("[start] {}", start.describe());

    let bytes = start.to_stream();
    println!("[encode] {} bytes (estimate {})", bytes.len(), start.stream_size());

    let end = Square::from_stream(bytes);
    println!("[end]   {}", end.describe());
    assert_eq!(start, end);

    let something = Something {
        nested: NestedInts {
            inner: Ints {
                ints: vec![1, 2, 3],
            },
        },
    };
    let bytes = streamable::encode(&something);
    println!(
        "\n[embed] {:?} -> {} bytes (4-byte length + {} payload)",
        something.nested.inner.ints,
        bytes.len(),
        streamable::size_of(&something.nested)
    );
    let decoded: Something = streamable::decode(bytes);
    println!("[embed] decoded {:?}", decoded.nested.inner.ints);
}

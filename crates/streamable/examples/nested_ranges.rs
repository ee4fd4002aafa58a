// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Example readability

/// Nested Ranges Example
///
/// Demonstrates:
/// - A three-layer range (Vec of LinkedList of Vec)
/// - Per-layer element counts on the wire
/// - The oracle's view of the field types
use std::collections::LinkedList;
use streamable::oracle::{category_of, range_layers};
use streamable::Streamable;

#[derive(Debug, PartialEq, Streamable)]
struct NestedRange {
    values: Vec<LinkedList<Vec<f64>>>,
}

fn print_nested(values: &[LinkedList<Vec<f64>>]) {
    for list in values {
        for row in list {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            println!("  {}", cells.join(" "));
        }
        println!();
    }
}

fn main() {
    println!("=== Streamable Nested Ranges Example ===\n");

    println!(
        "[oracle] {} with {} layers",
        category_of::<Vec<LinkedList<Vec<f64>>>>(),
        range_layers::<Vec<LinkedList<Vec<f64>>>>()
    );

    let row = vec![1.23, 2.3, 3.0];
    let list: LinkedList<Vec<f64>> = std::iter::repeat(row).take(3).collect();
    let start = NestedRange {
        values: vec![list.clone(), list],
    };
    print_nested(&start.values);

    let bytes = start.to_stream();
    println!(
        "[encode] {} bytes: outer count {}, first list count {}, first row count {}",
        bytes.len(),
        u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        u32::from_ne_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        u32::from_ne_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
    );

    let end = NestedRange::from_stream(bytes);
    print_nested(&end.values);
    assert_eq!(start, end);
}

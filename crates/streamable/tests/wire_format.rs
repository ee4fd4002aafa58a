// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Byte-exact layouts of the reference scenarios.
//
// Every expected buffer is assembled by hand from native-endian integers, so
// these tests pin the wire format itself, not just encode/decode symmetry.

#![allow(clippy::float_cmp)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::cast_possible_truncation)]

use bytemuck::{Pod, Zeroable};
use std::path::PathBuf;
use streamable::{decode, decode_field, encode, encode_field, size_of, Streamable};

fn ne32(value: u32) -> [u8; 4] {
    value.to_ne_bytes()
}

// ============================================================================
// Scenario A: identifier + text + integer
// ============================================================================

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
struct Guid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}
streamable::pod_layout!(Guid);

const GUID: Guid = Guid {
    data1: 0x0302_0100,
    data2: 0x0504,
    data3: 0x0706,
    data4: [8, 9, 10, 0, 0, 0, 0, 0],
};

#[derive(Debug, PartialEq, Streamable)]
struct Record {
    id: Guid,
    nickname: String,
    age: i64,
}

#[test]
fn test_scenario_a_record_layout() {
    let record = Record {
        id: GUID,
        nickname: String::from("Smth"),
        age: 1_000_000_000_000,
    };

    assert_eq!(size_of(&record), 32);
    let bytes = encode(&record);
    assert_eq!(bytes.len(), 16 + (4 + 4) + 8);

    let mut expected = Vec::new();
    expected.extend_from_slice(bytemuck::bytes_of(&GUID));
    expected.extend_from_slice(&ne32(4));
    expected.extend_from_slice(b"Smth");
    expected.extend_from_slice(&1_000_000_000_000_i64.to_ne_bytes());
    assert_eq!(bytes, expected);

    assert_eq!(decode::<Record>(bytes), record);
}

#[derive(Debug, PartialEq, Streamable)]
struct PathRecord {
    id: Guid,
    nickname: String,
    path: PathBuf,
    idk: usize,
}

#[test]
fn test_scenario_a_with_path() {
    let record = PathRecord {
        id: GUID,
        nickname: String::from("Smth"),
        path: PathBuf::from("some/random.path"),
        idk: 69,
    };
    let units = "some/random.path".encode_utf16().count();
    let expected_len = 16 + (4 + 4) + (4 + 2 * units) + core::mem::size_of::<usize>();

    let bytes = encode(&record);
    assert_eq!(bytes.len(), expected_len);
    assert_eq!(size_of(&record), expected_len);

    let path_at = 16 + 8;
    assert_eq!(&bytes[path_at..path_at + 4], &ne32((2 * units) as u32));
    assert_eq!(
        &bytes[path_at + 4..path_at + 6],
        &u16::from(b's').to_ne_bytes()
    );

    assert_eq!(decode::<PathRecord>(bytes), record);
}

// ============================================================================
// Scenario B: two-layer numeric range
// ============================================================================

#[derive(Debug, PartialEq, Streamable)]
struct Matrix {
    rows: Vec<Vec<f64>>,
}

#[test]
fn test_scenario_b_nested_range_bytes() {
    let matrix = Matrix {
        rows: vec![vec![1.0, 2.0], vec![3.0]],
    };
    // Rows of different lengths make the estimate inexact (see
    // known_limitations.rs); the default config still returns the bytes.
    let bytes = encode(&matrix);

    let mut expected = Vec::new();
    expected.extend_from_slice(&ne32(2));
    expected.extend_from_slice(&ne32(2));
    expected.extend_from_slice(&1.0_f64.to_ne_bytes());
    expected.extend_from_slice(&2.0_f64.to_ne_bytes());
    expected.extend_from_slice(&ne32(1));
    expected.extend_from_slice(&3.0_f64.to_ne_bytes());
    assert_eq!(bytes, expected);

    assert_eq!(decode::<Matrix>(bytes), matrix);
}

#[test]
fn test_ragged_ranges_round_trip_with_default_config() {
    let matrix = Matrix {
        rows: vec![vec![1.0, 2.0], vec![3.0]],
    };
    assert_eq!(Matrix::from_stream(matrix.to_stream()), matrix);

    let words = vec![
        vec![String::from("a")],
        vec![String::from("bbbb"), String::from("c")],
    ];
    let bytes = encode_field(&words);
    assert_eq!(bytes.len(), 4 + (4 + 5) + (4 + 8 + 5));
    assert_eq!(decode_field::<Vec<Vec<String>>>(&bytes), words);

    let (id, rows) = (9u16, vec![vec![1u8], vec![2, 3, 4]]);
    let bytes = streamable::encode_all!(id, rows);
    assert_eq!(bytes.len(), 2 + 4 + (4 + 1) + (4 + 3));
}

#[test]
fn test_scenario_b_uniform_rows_estimate_exact() {
    let matrix = Matrix {
        rows: vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
    };
    let bytes = encode(&matrix);
    assert_eq!(bytes.len(), size_of(&matrix));
    assert_eq!(bytes.len(), 4 + 3 * (4 + 16));
    assert_eq!(decode::<Matrix>(bytes), matrix);
}

// ============================================================================
// Scenario D: embedded streamable object
// ============================================================================

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

#[test]
fn test_scenario_d_embedded_object() {
    let something = Something {
        nested: NestedInts {
            inner: Ints {
                ints: vec![1, 2, 3],
            },
        },
    };

    let inner_size = size_of(&something.nested);
    assert_eq!(inner_size, 4 + 3 * 4);
    assert_eq!(size_of(&something), 4 + inner_size);

    let bytes = encode(&something);
    let mut expected = Vec::new();
    expected.extend_from_slice(&ne32(inner_size as u32));
    expected.extend_from_slice(&ne32(3));
    for value in [1i32, 2, 3] {
        expected.extend_from_slice(&value.to_ne_bytes());
    }
    assert_eq!(bytes, expected);

    assert_eq!(decode::<Something>(bytes), something);
}

#[test]
fn test_scenario_d_empty_embedded_object() {
    let something = Something::default();
    let bytes = encode(&something);
    assert_eq!(bytes.len(), 4 + 4);
    assert_eq!(&bytes[..4], &ne32(4));
    assert_eq!(&bytes[4..], &ne32(0));
    assert_eq!(decode::<Something>(bytes), something);
}

// ============================================================================
// Empty-container law
// ============================================================================

#[derive(Debug, PartialEq, Streamable)]
struct Empties {
    flat: Vec<u8>,
    deep: Vec<Vec<Vec<Vec<u32>>>>,
    text: String,
}

#[test]
fn test_empty_containers_keep_their_count() {
    let empties = Empties {
        flat: Vec::new(),
        deep: Vec::new(),
        text: String::new(),
    };
    let bytes = encode(&empties);
    assert_eq!(bytes, [0u8; 12]);
    assert_eq!(decode::<Empties>(bytes), empties);

    let inner = Empties {
        flat: Vec::new(),
        deep: vec![vec![Vec::new(), Vec::new()]],
        text: String::new(),
    };
    let bytes = encode(&inner);
    // flat(0) | deep: 1 -> 2 -> (0, 0) | text(0)
    let expected: Vec<u8> = [0u32, 1, 2, 0, 0, 0]
        .iter()
        .flat_map(|count| count.to_ne_bytes())
        .collect();
    assert_eq!(bytes, expected);
    assert_eq!(decode::<Empties>(bytes), inner);
}

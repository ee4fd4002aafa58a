// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::cast_precision_loss)] // Synthetic sample values
#![allow(clippy::cast_possible_truncation)] // Synthetic sample values
#![allow(clippy::semicolon_if_nothing_returned)] // Benchmark code formatting

//! Encode/decode throughput.
//!
//! Measures:
//! - fixed-size records (no prefixes)
//! - variable-size records (text + depth-1 range)
//! - two-layer nested ranges
//! - a three-level hierarchy
//! - checked vs unchecked decode of the same stream

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use streamable::{decode_slice, encode, try_decode, FixedLayout, Streamable};

// ============================================================================
// Bench types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, FixedLayout)]
struct Temperature {
    value: f32,
    timestamp: i32,
}

#[derive(Debug, Clone, PartialEq, Streamable)]
struct TemperatureBatch {
    samples: Vec<Temperature>,
}

#[derive(Debug, Clone, PartialEq, Streamable)]
struct SensorData {
    sensor_id: u32,
    temperature: f64,
    humidity: f64,
    label: String,
    readings: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Streamable)]
struct Grid {
    cells: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Streamable)]
struct Base {
    id: u64,
}

#[derive(Debug, Clone, PartialEq, Streamable)]
struct Middle {
    #[streamable(base)]
    base: Base,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Streamable)]
struct Top {
    #[streamable(base)]
    middle: Middle,
    values: Vec<u32>,
}

fn temperature_batch(len: usize) -> TemperatureBatch {
    TemperatureBatch {
        samples: (0..len)
            .map(|i| Temperature {
                value: 20.0 + (i as f32) * 0.01,
                timestamp: 1_700_000_000 + i as i32,
            })
            .collect(),
    }
}

fn sensor(i: u32) -> SensorData {
    SensorData {
        sensor_id: i,
        temperature: 20.0 + f64::from(i) * 0.5,
        humidity: 50.0 + f64::from(i) * 0.1,
        label: format!("sensor_{}", i),
        readings: (0..10).map(|j| (i * 10 + j) as f32 * 0.1).collect(),
    }
}

fn grid(side: usize) -> Grid {
    Grid {
        cells: (0..side)
            .map(|row| (0..side).map(|col| (row * side + col) as f64).collect())
            .collect(),
    }
}

fn top(i: u64) -> Top {
    Top {
        middle: Middle {
            base: Base { id: i },
            name: format!("node_{}", i),
        },
        values: (0..16).collect(),
    }
}

// ============================================================================
// Encode
// ============================================================================

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for len in [16usize, 1024] {
        let batch = temperature_batch(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("temperature", len), &batch, |b, batch| {
            b.iter(|| black_box(encode(black_box(batch))))
        });
    }

    let samples: Vec<SensorData> = (0..100).map(sensor).collect();
    group.throughput(Throughput::Elements(100));
    group.bench_function("sensor_data_x100", |b| {
        b.iter(|| {
            for sample in &samples {
                black_box(encode(black_box(sample)));
            }
        })
    });

    let cells = grid(32);
    group.throughput(Throughput::Elements(32 * 32));
    group.bench_function("grid_32x32", |b| b.iter(|| black_box(encode(&cells))));

    let hierarchy = top(7);
    group.throughput(Throughput::Elements(1));
    group.bench_function("three_levels", |b| {
        b.iter(|| black_box(encode(black_box(&hierarchy))))
    });

    group.finish();
}

// ============================================================================
// Decode
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for len in [16usize, 1024] {
        let bytes = encode(&temperature_batch(len));
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("temperature", len), &bytes, |b, bytes| {
            b.iter(|| black_box(decode_slice::<TemperatureBatch>(black_box(bytes))))
        });
    }

    let encoded: Vec<Vec<u8>> = (0..100).map(|i| encode(&sensor(i))).collect();
    group.throughput(Throughput::Elements(100));
    group.bench_function("sensor_data_x100", |b| {
        b.iter(|| {
            for bytes in &encoded {
                black_box(decode_slice::<SensorData>(black_box(bytes)));
            }
        })
    });

    let bytes = encode(&grid(32));
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("grid_32x32", |b| {
        b.iter(|| black_box(decode_slice::<Grid>(black_box(&bytes))))
    });

    group.finish();
}

fn bench_checked_vs_unchecked(c: &mut Criterion) {
    let bytes = encode(&top(42));
    let mut group = c.benchmark_group("decode_mode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("unchecked", |b| {
        b.iter(|| black_box(decode_slice::<Top>(black_box(&bytes))))
    });
    group.bench_function("checked", |b| {
        b.iter(|| black_box(try_decode::<Top>(black_box(&bytes))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_checked_vs_unchecked
);
criterion_main!(benches);

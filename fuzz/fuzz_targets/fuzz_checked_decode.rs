// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, LinkedList};
use std::path::PathBuf;
use streamable::{try_decode, try_decode_field, FixedLayout, Streamable};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FixedLayout)]
enum Mode {
    Idle = 1,
    Busy = 2,
}

#[derive(Debug, PartialEq, Streamable)]
struct Inner {
    mode: Mode,
    flag: bool,
    label: String,
}

#[derive(Debug, PartialEq, Streamable)]
struct Outer {
    #[streamable(base)]
    inner: Inner,
    path: PathBuf,
    nested: Vec<LinkedList<Vec<u16>>>,
    table: BTreeMap<u32, String>,
    child: Inner,
}

fuzz_target!(|data: &[u8]| {
    // Checked decoding must reject malformed input without panicking.
    let _ = try_decode::<Inner>(data);
    let _ = try_decode::<Outer>(data);

    let _ = try_decode_field::<String>(data);
    let _ = try_decode_field::<PathBuf>(data);
    let _ = try_decode_field::<Vec<Vec<char>>>(data);
    let _ = try_decode_field::<BTreeMap<String, Vec<u8>>>(data);
    let _ = try_decode_field::<Vec<[u8; 0]>>(data);
});

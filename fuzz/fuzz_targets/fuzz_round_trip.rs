// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use streamable::{encode, size_of, try_decode, Streamable};

#[derive(Debug, PartialEq, Streamable)]
struct Message {
    id: u32,
    text: String,
    payload: Vec<u8>,
    words: Vec<String>,
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let (head, rest) = data.split_at(4);
    let text = String::from_utf8_lossy(rest).into_owned();
    let message = Message {
        id: u32::from_ne_bytes([head[0], head[1], head[2], head[3]]),
        words: text.split_whitespace().map(str::to_owned).collect(),
        text,
        payload: rest.to_vec(),
    };

    // Depth-1 ranges are sized exactly, so the estimate must hold.
    assert_eq!(size_of(&message), encode(&message).len());

    let bytes = encode(&message);
    let decoded = try_decode::<Message>(&bytes).expect("round trip should succeed");
    assert_eq!(decoded, message);
});

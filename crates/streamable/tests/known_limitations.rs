// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Known limitation: a range of ranges is estimated from its first element.
//
// Inner ranges of different encoded lengths make the estimate wrong. The
// bytes written are still correct (ranges are written element by element and
// embedded objects carry back-patched lengths), so decoding is unaffected;
// only the pre-sized capacity is off and `encode` reports the mismatch.

use streamable::{
    decode, encode_with, size_of, try_decode, try_encode, Error, SizeCheck, StreamConfig,
    Streamable,
};

#[derive(Debug, PartialEq, Streamable)]
struct Ragged {
    rows: Vec<Vec<u32>>,
}

#[derive(Debug, PartialEq, Streamable)]
struct Holder {
    before: u8,
    ragged: Ragged,
    after: String,
}

fn ragged() -> Ragged {
    Ragged {
        rows: vec![vec![1, 2, 3], vec![4]],
    }
}

fn ignoring() -> StreamConfig {
    StreamConfig {
        size_check: SizeCheck::Ignore,
        ..StreamConfig::default()
    }
}

#[test]
fn test_ragged_estimate_differs_from_written_length() {
    let value = ragged();
    // 4 + 2 * (4 + 12), from the first row only.
    assert_eq!(size_of(&value), 36);

    let bytes = encode_with(&value, &ignoring());
    // 4 + (4 + 12) + (4 + 4)
    assert_eq!(bytes.len(), 28);
    assert_ne!(bytes.len(), size_of(&value));

    assert_eq!(decode::<Ragged>(bytes), value);
}

#[test]
fn test_try_encode_reports_the_mismatch() {
    assert_eq!(
        try_encode(&ragged()),
        Err(Error::SizeMismatch {
            estimated: 36,
            written: 28
        })
    );
}

#[test]
fn test_embedded_ragged_object_still_decodes() {
    let holder = Holder {
        before: 1,
        ragged: ragged(),
        after: String::from("tail"),
    };
    let bytes = encode_with(&holder, &ignoring());

    // The embedded length is the written payload, not the estimate.
    assert_eq!(&bytes[1..5], &28u32.to_ne_bytes());
    assert_eq!(
        try_decode::<Holder>(&bytes).expect("decode should succeed"),
        holder
    );
}

#[test]
fn test_warn_mode_returns_the_buffer() {
    let cfg = StreamConfig {
        size_check: SizeCheck::Warn,
        ..StreamConfig::default()
    };
    let bytes = encode_with(&ragged(), &cfg);
    assert_eq!(decode::<Ragged>(bytes), ragged());
}

#[test]
#[should_panic(expected = "size estimate mismatch")]
fn test_panic_mode_rejects_the_mismatch() {
    let cfg = StreamConfig {
        size_check: SizeCheck::Panic,
        ..StreamConfig::default()
    };
    let _ = encode_with(&ragged(), &cfg);
}

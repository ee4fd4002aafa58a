// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Example readability

/// Record Example
///
/// Demonstrates:
/// - A raw POD identifier streamed with pod_layout!
/// - Text, path and integer fields in one record
/// - Checked decoding of a damaged copy
use bytemuck::{Pod, Zeroable};
use std::path::PathBuf;
use streamable::Streamable;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
struct Guid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}
streamable::pod_layout!(Guid);

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{{{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}}}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

#[derive(Debug, PartialEq, Streamable)]
struct Something {
    id: Guid,
    nickname: String,
    path: PathBuf,
    idk: usize,
}

impl Something {
    fn print(&self) {
        println!(
            "  id = {}, nickname = {}, path = {}, idk = {}",
            self.id,
            self.nickname,
            self.path.display(),
            self.idk
        );
    }
}

fn main() {
    println!("=== Streamable Record Example ===\n");

    let start = Something {
        id: Guid {
            data1: 0x0302_0100,
            data2: 0x0504,
            data3: 0x0706,
            data4: [8, 9, 10, 0, 0, 0, 0, 0],
        },
        nickname: String::from("Smth"),
        path: PathBuf::from("some/random.path"),
        idk: 69,
    };
    start.print();

    let bytes = start.to_stream();
    println!("[encode] {} bytes", bytes.len());

    match streamable::try_decode::<Something>(&bytes[..bytes.len() - 3]) {
        Ok(_) => println!("[checked] unexpected success on a truncated copy"),
        Err(err) => println!("[checked] truncated copy rejected: {}", err),
    }

    let end = Something::from_stream(bytes);
    end.print();
    assert_eq!(start, end);
}

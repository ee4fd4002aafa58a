// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Streamable - schema-bound binary streaming
//!
//! Converts typed values into a compact, length-prefixed byte stream and back.
//! There is no header, tag or version anywhere in the stream: the reader must
//! know the exact field types and order, which the type system provides.
//!
//! ## Quick Start
//!
//! ```rust
//! use streamable::Streamable;
//!
//! #[derive(Debug, Default, PartialEq, Streamable)]
//! struct Probe {
//!     id: u64,
//!     name: String,
//!     samples: Vec<Vec<f32>>,
//! }
//!
//! let probe = Probe {
//!     id: 3,
//!     name: "p3".into(),
//!     samples: vec![vec![0.5, 1.5], vec![2.5, 3.5]],
//! };
//! let bytes = streamable::encode(&probe);
//! assert_eq!(bytes.len(), streamable::size_of(&probe));
//! assert_eq!(streamable::decode::<Probe>(bytes), probe);
//! ```
//!
//! ## Wire Format
//!
//! ```text
//! stream := unit*
//! unit   := fixed bytes                              (no prefix)
//!         | u32(byte length) text bytes              (text, path as UTF-16)
//!         | u32(element count) unit*                 (range, recursive per layer)
//!         | u32(payload length) object bytes         (embedded streamable)
//! ```
//!
//! Fixed-layout values and prefixes use the producing machine's native byte
//! order.
//!
//! ## Modules Overview
//!
//! - [`oracle`] - static classification of field types
//! - [`size`] - size estimation
//! - [`writer`] / [`reader`] - stream engines
//! - [`compose`] - hierarchy chaining and encode/decode drivers
//! - [`field`] - accepted field types
//! - [`config`] - wire constants and runtime tunables

// Allow the derive macros to work inside this crate's tests
extern crate self as streamable;

/// Hierarchy chaining and encode/decode drivers.
pub mod compose;
/// Wire constants and runtime configuration.
pub mod config;
mod error;
/// Accepted field types.
pub mod field;
pub mod oracle;
pub mod reader;
pub mod size;
pub mod writer;

pub use compose::{
    decode, decode_field, decode_slice, encode, encode_field, encode_with, field_size, size_of,
    try_decode, try_decode_field, try_encode, Streamable,
};
pub use config::{SizeCheck, StreamConfig};
pub use error::{Error, Result};
pub use field::{Field, FixedLayout, WideString};
pub use oracle::Category;
pub use reader::StreamReader;
pub use writer::StreamWriter;

#[cfg(feature = "derive")]
pub use streamable_codegen::{FixedLayout, Streamable};

#[doc(hidden)]
pub mod __private {
    pub use bytemuck;
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

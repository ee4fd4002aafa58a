// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Streamable Global Configuration
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: wire-format constants (prefix width, byte order)
//! - **Level 2 (Dynamic)**: [`StreamConfig`], held process-wide behind an
//!   `ArcSwap` and overridable per call via `encode_with`
//!
//! # Environment
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `STREAMABLE_SIZE_CHECK` | `ignore`, `warn`, `panic` | `warn` |
//! | `STREAMABLE_MAX_RESERVE` | element count | [`DEFAULT_MAX_RESERVE`] |
//!
//! # Example
//!
//! ```rust
//! use streamable::config::{self, SizeCheck, StreamConfig};
//!
//! let cfg = StreamConfig {
//!     size_check: SizeCheck::Panic,
//!     ..StreamConfig::default()
//! };
//! config::set_global(cfg);
//! assert_eq!(config::current().size_check, SizeCheck::Panic);
//! ```

use arc_swap::ArcSwap;
use std::sync::{Arc, OnceLock};

// =======================================================================
// Wire Format Constants
// =======================================================================

/// Integer type of every length prefix (text byte length, container count,
/// embedded object payload length).
pub type LengthPrefix = u32;

/// Width in bytes of a [`LengthPrefix`] on the wire.
pub const LENGTH_PREFIX_SIZE: usize = core::mem::size_of::<LengthPrefix>();

/// Byte order used for fixed-layout values and prefixes.
///
/// The stream is an image of the producing machine's native representation;
/// there is no endianness marker anywhere in it.
pub const NATIVE_LITTLE_ENDIAN: bool = cfg!(target_endian = "little");

/// Upper bound on elements pre-reserved while reading one container.
///
/// Counts above this still decode; the container just grows on demand.
pub const DEFAULT_MAX_RESERVE: usize = 1 << 16;

/// Environment variable selecting [`SizeCheck`].
pub const ENV_SIZE_CHECK: &str = "STREAMABLE_SIZE_CHECK";

/// Environment variable overriding [`StreamConfig::max_reserve`].
pub const ENV_MAX_RESERVE: &str = "STREAMABLE_MAX_RESERVE";

// =======================================================================
// Runtime Configuration
// =======================================================================

/// What `encode` does when the bytes written differ from the size estimate.
///
/// A mismatch never corrupts the stream: the buffer grows and embedded
/// lengths are back-patched. It only means the pre-sized capacity was wrong,
/// which a range of ranges with inner ranges of different lengths always
/// produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeCheck {
    /// Accept the buffer as written.
    Ignore,
    /// Emit a `log::warn!` and return the buffer.
    #[default]
    Warn,
    /// Panic with both sizes.
    Panic,
}

impl SizeCheck {
    /// Parse the environment form (`ignore`, `warn`, `panic`), case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ignore" | "off" => Some(SizeCheck::Ignore),
            "warn" => Some(SizeCheck::Warn),
            "panic" | "strict" => Some(SizeCheck::Panic),
            _ => None,
        }
    }
}

/// Tunables consulted by the encode and decode drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Reaction to an estimate/actual size mismatch on encode.
    pub size_check: SizeCheck,
    /// Maximum number of elements reserved up front when reading a container.
    pub max_reserve: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            size_check: SizeCheck::default(),
            max_reserve: DEFAULT_MAX_RESERVE,
        }
    }
}

impl StreamConfig {
    /// Defaults overridden by [`ENV_SIZE_CHECK`] and [`ENV_MAX_RESERVE`].
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(raw) = std::env::var(ENV_SIZE_CHECK) {
            match SizeCheck::parse(&raw) {
                Some(check) => cfg.size_check = check,
                None => log::warn!("[config] ignoring {}={:?}", ENV_SIZE_CHECK, raw),
            }
        }

        if let Ok(raw) = std::env::var(ENV_MAX_RESERVE) {
            match raw.trim().parse::<usize>() {
                Ok(limit) => cfg.max_reserve = limit,
                Err(_) => log::warn!("[config] ignoring {}={:?}", ENV_MAX_RESERVE, raw),
            }
        }

        cfg
    }
}

fn runtime() -> &'static ArcSwap<StreamConfig> {
    static RUNTIME: OnceLock<ArcSwap<StreamConfig>> = OnceLock::new();
    RUNTIME.get_or_init(|| ArcSwap::from_pointee(StreamConfig::from_env()))
}

/// Snapshot of the process-wide configuration.
pub fn current() -> Arc<StreamConfig> {
    runtime().load_full()
}

/// Replace the process-wide configuration.
pub fn set_global(config: StreamConfig) {
    log::debug!("[config] global stream config set to {:?}", config);
    runtime().store(Arc::new(config));
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text-like and path-like fields.
//!
//! Both are `u32(byte length) + bytes`. Paths are first converted to their
//! wide (UTF-16) form, so a path of `n` code units occupies `4 + 2n` bytes.

use super::Field;
use crate::config::LENGTH_PREFIX_SIZE;
use crate::error::Error;
use crate::oracle::Category;
use crate::reader::StreamReader;
use crate::writer::StreamWriter;
use std::path::{Path, PathBuf};

impl Field for String {
    const CATEGORY: Category = Category::Text;

    fn encoded_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.len()
    }

    fn write_field(&self, writer: &mut StreamWriter) {
        writer.write_bytes(self.as_bytes());
    }

    fn read_field(reader: &mut StreamReader<'_>) -> Self {
        reader.read_text()
    }
}

impl Field for Box<str> {
    const CATEGORY: Category = Category::Text;

    fn encoded_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.len()
    }

    fn write_field(&self, writer: &mut StreamWriter) {
        writer.write_bytes(self.as_bytes());
    }

    fn read_field(reader: &mut StreamReader<'_>) -> Self {
        reader.read_text().into_boxed_str()
    }
}

/// Wide text: UTF-16 code units, streamed with a *byte* length prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WideString(pub Vec<u16>);

impl WideString {
    pub fn from_text(text: &str) -> Self {
        Self(text.encode_utf16().collect())
    }

    /// Wide form of a filesystem path.
    #[cfg(windows)]
    pub fn from_path(path: &Path) -> Self {
        use std::os::windows::ffi::OsStrExt;
        Self(path.as_os_str().encode_wide().collect())
    }

    /// Wide form of a filesystem path (non-UTF-8 components are replaced).
    #[cfg(not(windows))]
    pub fn from_path(path: &Path) -> Self {
        Self::from_text(&path.to_string_lossy())
    }

    /// Number of UTF-16 code units.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.0.len() * 2
    }

    /// Decode, failing on unpaired surrogates.
    pub fn to_string_checked(&self) -> Option<String> {
        String::from_utf16(&self.0).ok()
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    #[cfg(windows)]
    fn to_path_buf(&self) -> Option<PathBuf> {
        use std::os::windows::ffi::OsStringExt;
        Some(PathBuf::from(std::ffi::OsString::from_wide(&self.0)))
    }

    #[cfg(not(windows))]
    fn to_path_buf(&self) -> Option<PathBuf> {
        self.to_string_checked().map(PathBuf::from)
    }

    fn write_units(&self, writer: &mut StreamWriter) {
        writer.write_prefix(self.byte_len());
        for unit in &self.0 {
            writer.write_raw(&unit.to_ne_bytes());
        }
    }
}

impl From<&str> for WideString {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl Field for WideString {
    const CATEGORY: Category = Category::Text;

    fn encoded_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + self.byte_len()
    }

    fn write_field(&self, writer: &mut StreamWriter) {
        self.write_units(writer);
    }

    fn read_field(reader: &mut StreamReader<'_>) -> Self {
        Self(reader.read_wide())
    }
}

impl Field for PathBuf {
    const CATEGORY: Category = Category::Path;

    fn encoded_size(&self) -> usize {
        LENGTH_PREFIX_SIZE + WideString::from_path(self).byte_len()
    }

    fn write_field(&self, writer: &mut StreamWriter) {
        WideString::from_path(self).write_units(writer);
    }

    fn read_field(reader: &mut StreamReader<'_>) -> Self {
        let at = reader.stream_offset() + LENGTH_PREFIX_SIZE;
        let wide = WideString(reader.read_wide());
        match wide.to_path_buf() {
            Some(path) => path,
            None if reader.is_checked() => {
                reader.fail(Error::InvalidUtf8 { offset: at });
                PathBuf::new()
            }
            None => PathBuf::from(wide.to_string_lossy()),
        }
    }
}

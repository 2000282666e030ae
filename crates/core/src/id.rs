// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Machine identifier: a stable 32-byte random id rendered as lowercase hex.
//!
//! The canonical (full) form is 64 hex characters; the short form is a
//! 12-character prefix. Equality is always byte-equal on the canonical
//! form. The empty string is the null id (see [`MachineId::is_null`]).

use std::fmt;

/// Full hex-rendered length of a [`MachineId`].
pub const ID_FULL_LEN: usize = 64;
/// Length of the short (prefix) form used for display and lookup.
pub const ID_SHORT_LEN: usize = 12;

/// Fixed-size id buffer: exactly `ID_FULL_LEN` ASCII hex bytes, or empty (null).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MachineId {
    len: u8,
    buf: [u8; ID_FULL_LEN],
}

/// Error returned when a string does not parse as a [`MachineId`].
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("id must be hex, got {0:?}")]
    NotHex(String),
    #[error("id length {0} exceeds {ID_FULL_LEN} bytes")]
    TooLong(usize),
}

impl MachineId {
    /// The null id: the empty string.
    pub const fn null() -> Self {
        Self { len: 0, buf: [0u8; ID_FULL_LEN] }
    }

    /// Generate a fresh random id.
    ///
    /// Built from two random UUIDs (32 bytes) hex-encoded into the 64-char
    /// canonical form; there is no reserved structure beyond "random bytes".
    pub fn new() -> Self {
        let a = uuid::Uuid::new_v4();
        let b = uuid::Uuid::new_v4();
        let mut s = String::with_capacity(ID_FULL_LEN);
        for byte in a.as_bytes().iter().chain(b.as_bytes()) {
            s.push_str(&format!("{byte:02x}"));
        }
        // Safe to unwrap: exactly 64 lowercase hex chars by construction.
        Self::from_str(&s).unwrap_or(Self::null())
    }

    /// Parse a full or short hex id. Accepts the empty string as the null id.
    pub fn from_str(s: &str) -> Result<Self, IdParseError> {
        if s.is_empty() {
            return Ok(Self::null());
        }
        if s.len() > ID_FULL_LEN {
            return Err(IdParseError::TooLong(s.len()));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(IdParseError::NotHex(s.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        let mut buf = [0u8; ID_FULL_LEN];
        buf[..lower.len()].copy_from_slice(lower.as_bytes());
        Ok(Self { len: lower.len() as u8, buf })
    }

    pub fn as_str(&self) -> &str {
        // Invariant: only ever constructed from validated ASCII hex.
        std::str::from_utf8(&self.buf[..self.len as usize]).unwrap_or("")
    }

    pub fn is_null(&self) -> bool {
        self.len == 0
    }

    /// True when this id is in full (64-char) canonical form.
    pub fn is_full(&self) -> bool {
        self.len as usize == ID_FULL_LEN
    }

    /// The short (12-char) display form. If the id is already shorter than
    /// `ID_SHORT_LEN` (e.g. null, or a short id parsed directly), returns it
    /// unchanged.
    pub fn short(&self) -> &str {
        let s = self.as_str();
        if s.len() <= ID_SHORT_LEN {
            s
        } else {
            &s[..ID_SHORT_LEN]
        }
    }

    /// Whether `self` could refer to `full` under the short-id matching rule:
    /// exact match, or `self` is a non-empty prefix of `full`.
    pub fn matches(&self, full: &MachineId) -> bool {
        if self.is_null() {
            return false;
        }
        full.as_str().starts_with(self.as_str())
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MachineId({:?})", self.as_str())
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::borrow::Borrow<str> for MachineId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl std::str::FromStr for MachineId {
    type Err = IdParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MachineId::from_str(s)
    }
}

impl From<&str> for MachineId {
    fn from(s: &str) -> Self {
        MachineId::from_str(s).unwrap_or(MachineId::null())
    }
}

impl From<String> for MachineId {
    fn from(s: String) -> Self {
        MachineId::from(s.as_str())
    }
}

impl serde::Serialize for MachineId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for MachineId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        MachineId::from_str(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

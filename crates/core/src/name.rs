// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Machine name validation (spec §3, §8).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// A human label for a machine, distinct from its [`crate::MachineId`].
///
/// Non-empty, characters `[A-Za-z0-9_+\-.]`, not equal to `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineName(String);

impl MachineName {
    pub fn parse(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if s.is_empty() {
            return Err(CoreError::InvalidInput("machine name must not be empty".into()));
        }
        if s == "." || s == ".." {
            return Err(CoreError::InvalidInput(format!(
                "machine name must not be {s:?}"
            )));
        }
        if let Some(bad) = s.chars().find(|c| !is_name_char(*c)) {
            return Err(CoreError::InvalidInput(format!(
                "machine name {s:?} contains invalid character {bad:?}"
            )));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.')
}

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for MachineName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MachineName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for MachineName {
    type Error = CoreError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MachineName {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names() {
        for s in ["hello", "hello-world_1.2+3", "ABC123"] {
            assert!(MachineName::parse(s).is_ok(), "{s} should be valid");
        }
    }

    #[test]
    fn rejects_empty_and_dot_forms() {
        assert!(MachineName::parse("").is_err());
        assert!(MachineName::parse(".").is_err());
        assert!(MachineName::parse("..").is_err());
    }

    #[test]
    fn rejects_path_separators() {
        assert!(MachineName::parse("a/b").is_err());
    }

    #[test]
    fn rejects_other_invalid_characters() {
        for s in ["a b", "a!", "a/b", "a:b"] {
            assert!(MachineName::parse(s).is_err(), "{s} should be rejected");
        }
    }
}

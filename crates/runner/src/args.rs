// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-supplied arguments a [`crate::runner::Runner`] is evaluated
//! against (spec §4.5).

use std::path::PathBuf;

use uk_core::{Architecture, Platform};

#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// First positional argument and anything after it (kernel args, or
    /// the package reference, depending on which runner matches).
    pub positional: Vec<String>,
    pub arch: Option<Architecture>,
    pub plat: Option<Platform>,
    pub target: Option<String>,
    /// Directory runners materialize packaged/extracted artifacts into.
    pub state_dir: PathBuf,
    /// Disallow interactive prompting (spec §4.5 `AmbiguousTarget`).
    pub no_prompt: bool,
}

impl RunArgs {
    pub fn first(&self) -> Option<&str> {
        self.positional.first().map(String::as_str)
    }

    pub fn rest(&self) -> Vec<String> {
        self.positional.iter().skip(1).cloned().collect()
    }
}

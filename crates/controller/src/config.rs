// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime directory discovery (spec §6: `UK_STATE_DIR` override, else
//! `$XDG_STATE_HOME/unikraft-toolkit` or `~/.local/state/unikraft-toolkit`).

use std::path::PathBuf;

use crate::error::ControllerError;

#[derive(Debug, Clone)]
pub struct Config {
    pub runtime_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, ControllerError> {
        if let Ok(dir) = std::env::var("UK_STATE_DIR") {
            return Ok(Self { runtime_dir: PathBuf::from(dir) });
        }
        let state_dir =
            dirs::state_dir().or_else(dirs::home_dir).ok_or(ControllerError::NoRuntimeDir)?;
        Ok(Self { runtime_dir: state_dir.join("unikraft-toolkit") })
    }
}

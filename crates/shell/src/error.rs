// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-spawn error types.

use uk_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("failed to spawn `{program}`: {source}")]
    SpawnFailed { program: String, source: std::io::Error },

    #[error("failed to signal pid {pid}: {source}")]
    SignalFailed { pid: u32, source: nix::Error },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ShellError> for CoreError {
    fn from(e: ShellError) -> Self {
        CoreError::BackendFailure(e.to_string())
    }
}

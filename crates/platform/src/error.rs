// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use uk_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("{0} hypervisor not available on this host")]
    HypervisorUnavailable(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("failed to spawn guest process: {0}")]
    Spawn(#[from] uk_shell::ShellError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize platform config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<PlatformError> for CoreError {
    fn from(e: PlatformError) -> Self {
        match e {
            PlatformError::HypervisorUnavailable(_) | PlatformError::Unsupported(_) => {
                CoreError::InvalidInput(e.to_string())
            }
            other => CoreError::BackendFailure(other.to_string()),
        }
    }
}

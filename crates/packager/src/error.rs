// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use uk_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum PackagerError {
    #[error("no packager could handle this build context")]
    NoPackagerMatched,

    #[error("package conflict: {0}")]
    Conflict(String),

    #[error("ambiguous package match: {0:?}")]
    Ambiguous(Vec<String>),

    #[error("package already exists: {0}")]
    AlreadyExists(String),

    #[error("prompting is disabled and this operation requires a choice")]
    PromptDisabled,

    #[error("package manager error: {0}")]
    Manager(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_yaml::Error),
}

impl From<PackagerError> for CoreError {
    fn from(e: PackagerError) -> Self {
        match e {
            PackagerError::Ambiguous(matches) => CoreError::Ambiguous(matches),
            PackagerError::AlreadyExists(id) => CoreError::AlreadyExists(id),
            PackagerError::Conflict(m) => CoreError::Conflict(m),
            other => CoreError::BackendFailure(other.to_string()),
        }
    }
}

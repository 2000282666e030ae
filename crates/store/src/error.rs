// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store-local error type; folds into [`uk_core::CoreError`] at the API
//! boundary.

use uk_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("machine {0} not found")]
    NotFound(String),

    #[error("machine {0} already exists")]
    AlreadyExists(String),

    #[error("ambiguous reference matches {0:?}")]
    Ambiguous(Vec<String>),

    #[error("store at {0} unavailable: {1}")]
    Unavailable(String, String),

    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("write conflict on {0}")]
    Conflict(String),
}

impl From<StoreError> for CoreError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => CoreError::NotFound(id),
            StoreError::AlreadyExists(id) => CoreError::AlreadyExists(id),
            StoreError::Ambiguous(matches) => CoreError::Ambiguous(matches),
            StoreError::Unavailable(path, reason) => {
                CoreError::StoreUnavailable(format!("{path}: {reason}"))
            }
            StoreError::Io(e) => CoreError::BackendFailure(e.to_string()),
            StoreError::Encoding(e) => CoreError::BackendFailure(format!("corrupt record: {e}")),
            StoreError::Conflict(id) => CoreError::Conflict(id),
        }
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use uk_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("no runner could handle these arguments")]
    NoRunnerMatched,

    #[error("ambiguous target: {0:?}")]
    AmbiguousTarget(Vec<String>),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Packager(#[from] uk_packager::PackagerError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RunnerError> for CoreError {
    fn from(e: RunnerError) -> Self {
        match e {
            RunnerError::AmbiguousTarget(matches) => CoreError::Ambiguous(matches),
            RunnerError::Invalid(e) => e,
            RunnerError::Packager(e) => e.into(),
            other => CoreError::BackendFailure(other.to_string()),
        }
    }
}

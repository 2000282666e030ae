// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events PID file (spec §4.4 protocol step 1): written on start, removed
//! on exit. Unlike the store's advisory lock, this file is advisory-only —
//! a pre-existing file is logged and ignored, not treated as exclusive
//! ownership, since multiple supervisors are permitted to run concurrently.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::SupervisorError;

const PID_FILE_DIR_MODE: u32 = 0o755;

pub struct PidFileGuard {
    path: PathBuf,
}

impl PidFileGuard {
    pub fn create(path: &Path) -> Result<Self, SupervisorError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            std::fs::set_permissions(parent, std::fs::Permissions::from_mode(PID_FILE_DIR_MODE))?;
        }
        if path.exists() {
            warn!(path = %path.display(), "events pid file already exists, continuing anyway");
        }
        std::fs::write(path, format!("{}\n", std::process::id()))?;
        Ok(Self { path: path.to_path_buf() })
    }
}

impl Drop for PidFileGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_writes_pid_and_removes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.pid");
        {
            let _guard = PidFileGuard::create(&path).unwrap();
            let contents = std::fs::read_to_string(&path).unwrap();
            assert_eq!(contents.trim(), std::process::id().to_string());
        }
        assert!(!path.exists());
    }

    #[test]
    fn create_tolerates_preexisting_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.pid");
        std::fs::write(&path, "99999\n").unwrap();
        assert!(PidFileGuard::create(&path).is_ok());
    }
}

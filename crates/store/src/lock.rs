// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory exclusive lock over the store directory, with bounded
//! open-timeout backoff (spec §4.1, §5: concurrent opens serialize; a
//! second opener that can't acquire the lock within `open_timeout` gets
//! `StoreUnavailable` rather than blocking forever).

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::StoreError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Holds `machines.lock` exclusively for the lifetime of the value;
/// dropping it releases the lock for the next opener.
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    pub fn acquire(path: &Path, open_timeout: Duration) -> Result<Self, StoreError> {
        let file = OpenOptions::new().create(true).write(true).open(path)?;
        let deadline = Instant::now() + open_timeout;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(Self { file }),
                Err(_) if Instant::now() < deadline => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    return Err(StoreError::Unavailable(
                        path.display().to_string(),
                        format!("lock held by another process: {e}"),
                    ))
                }
            }
        }
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_times_out_while_first_held() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machines.lock");
        let _first = StoreLock::acquire(&path, Duration::from_millis(50)).unwrap();
        let err = StoreLock::acquire(&path, Duration::from_millis(80));
        assert!(err.is_err());
    }

    #[test]
    fn acquire_succeeds_after_prior_holder_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machines.lock");
        {
            let _first = StoreLock::acquire(&path, Duration::from_millis(50)).unwrap();
        }
        let second = StoreLock::acquire(&path, Duration::from_millis(50));
        assert!(second.is_ok());
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-machine state directory layout: `kernel`, `initrd`, `console.log`,
//! `pid`, `spec.json` (spec §6).

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use uk_core::MachineSpec;

use crate::error::ControllerError;

/// `rwxrwsr-x`: group-writable and setgid so sibling processes sharing
/// the runtime group can read console logs without a umask dance.
const STATE_DIR_MODE: u32 = 0o2775;

pub fn create(state_dir: &Path, spec: &MachineSpec) -> Result<(), ControllerError> {
    std::fs::create_dir_all(state_dir)?;
    std::fs::set_permissions(state_dir, std::fs::Permissions::from_mode(STATE_DIR_MODE))?;

    let spec_json = serde_json::to_vec_pretty(spec)
        .map_err(|e| ControllerError::Io(std::io::Error::other(e)))?;
    std::fs::write(state_dir.join("spec.json"), spec_json)?;

    // Touch the console log up front so `logs -f` can open it immediately
    // even before the guest has written anything.
    let console_log = state_dir.join("console.log");
    if !console_log.exists() {
        std::fs::File::create(&console_log)?;
    }
    Ok(())
}

pub fn remove(state_dir: &Path) -> Result<(), ControllerError> {
    if state_dir.exists() {
        std::fs::remove_dir_all(state_dir)?;
    }
    Ok(())
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Platform Strategy trait (spec §4.5): one implementation per
//! hypervisor/backend, selected by [`uk_core::Platform`].

use async_trait::async_trait;
use uk_core::{MachineSpec, Platform};

use crate::error::PlatformError;

/// Strategy for launching and stopping guests under a specific platform.
#[async_trait]
pub trait PlatformController: Send + Sync + 'static {
    fn platform(&self) -> Platform;

    /// Whether this platform's hypervisor/runtime binary is present and
    /// usable on this host. Called during `Detect` (spec §4.5) to narrow
    /// an unspecified `--platform` down to one candidate.
    async fn is_host_hypervisor_available(&self) -> bool;

    /// Spawn `spec` under this platform, returning the guest's pid.
    async fn launch(&self, spec: &MachineSpec) -> Result<u32, PlatformError>;

    /// Request a graceful shutdown of a running guest.
    async fn stop(&self, pid: u32, force: bool) -> Result<(), PlatformError>;

    /// Whether the guest at `pid` is still running.
    fn is_alive(&self, pid: u32) -> bool {
        uk_shell::is_alive(pid)
    }
}

/// Try each known controller's `is_host_hypervisor_available` in a fixed
/// order and return the first that claims the host, used when the CLI is
/// not given an explicit `--platform` (spec §4.5 `Detect`).
pub async fn detect(
    candidates: &[Box<dyn PlatformController>],
) -> Result<Platform, PlatformError> {
    for c in candidates {
        if c.is_host_hypervisor_available().await {
            return Ok(c.platform());
        }
    }
    Err(PlatformError::HypervisorUnavailable(
        "no supported hypervisor detected on this host".into(),
    ))
}

/// Look up the controller registered for `platform`.
pub fn controller_for<'a>(
    candidates: &'a [Box<dyn PlatformController>],
    platform: Platform,
) -> Result<&'a dyn PlatformController, PlatformError> {
    candidates
        .iter()
        .find(|c| c.platform() == platform)
        .map(|c| c.as_ref())
        .ok_or_else(|| PlatformError::Unsupported(format!("no controller for {platform}")))
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `linuxu` platform controller: the kernel image is a Unikraft binary
//! linked against the Linux userspace platform, so "launching" it is
//! just executing it as an ordinary process.

use async_trait::async_trait;
use uk_core::{MachineSpec, Platform};
use uk_shell::ProcessSpec;

use crate::controller::PlatformController;
use crate::error::PlatformError;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxuController;

impl LinuxuController {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlatformController for LinuxuController {
    fn platform(&self) -> Platform {
        Platform::Linuxu
    }

    async fn is_host_hypervisor_available(&self) -> bool {
        // No hypervisor required; always usable on Linux hosts.
        cfg!(target_os = "linux")
    }

    async fn launch(&self, spec: &MachineSpec) -> Result<u32, PlatformError> {
        let mut process = ProcessSpec::new(&spec.kernel_path, &spec.log_file)
            .args(spec.args.clone());
        for env in &spec.envs {
            process = process.env(env.key.clone(), env.value.clone());
        }
        Ok(uk_shell::spawn_detached(&process).await?)
    }

    async fn stop(&self, pid: u32, force: bool) -> Result<(), PlatformError> {
        if force {
            uk_shell::kill(pid)?;
        } else {
            uk_shell::terminate(pid)?;
        }
        Ok(())
    }
}

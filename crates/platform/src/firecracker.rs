// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Firecracker platform controller: writes a microVM config JSON file and
//! spawns `firecracker --no-api --config-file <path>`.

use async_trait::async_trait;
use serde_json::json;
use uk_core::{MachineSpec, Platform};
use uk_shell::ProcessSpec;

use crate::controller::PlatformController;
use crate::error::PlatformError;

#[derive(Debug, Clone, Copy, Default)]
pub struct FirecrackerController;

impl FirecrackerController {
    pub fn new() -> Self {
        Self
    }

    fn config(spec: &MachineSpec) -> serde_json::Value {
        json!({
            "boot-source": {
                "kernel_image_path": spec.kernel_path,
                "boot_args": spec.args.join(" "),
            },
            "machine-config": {
                "vcpu_count": spec.vcpus,
                "mem_size_mib": spec.mem_mib,
                "smt": false,
            },
        })
    }

    fn config_path(spec: &MachineSpec) -> std::path::PathBuf {
        spec.state_dir.join("firecracker-config.json")
    }
}

#[async_trait]
impl PlatformController for FirecrackerController {
    fn platform(&self) -> Platform {
        Platform::Firecracker
    }

    async fn is_host_hypervisor_available(&self) -> bool {
        which::which("firecracker").is_ok() && std::path::Path::new("/dev/kvm").exists()
    }

    async fn launch(&self, spec: &MachineSpec) -> Result<u32, PlatformError> {
        let program = which::which("firecracker")
            .map_err(|e| PlatformError::HypervisorUnavailable(e.to_string()))?;
        let config_path = Self::config_path(spec);
        std::fs::create_dir_all(&spec.state_dir)?;
        std::fs::write(&config_path, serde_json::to_vec_pretty(&Self::config(spec))?)?;

        let process = ProcessSpec::new(program, &spec.log_file)
            .arg("--no-api")
            .arg("--config-file")
            .arg(config_path.display().to_string());
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

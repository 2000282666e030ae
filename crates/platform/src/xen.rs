// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Xen platform controller: writes an `xl` domain config file and runs
//! `xl create <cfg>`.

use async_trait::async_trait;
use uk_core::{MachineSpec, Platform};
use uk_shell::ProcessSpec;

use crate::controller::PlatformController;
use crate::error::PlatformError;

#[derive(Debug, Clone, Copy, Default)]
pub struct XenController;

impl XenController {
    pub fn new() -> Self {
        Self
    }

    fn config_path(spec: &MachineSpec) -> std::path::PathBuf {
        spec.state_dir.join("domain.cfg")
    }

    fn config(spec: &MachineSpec) -> String {
        format!(
            "name = \"{}\"\nkernel = \"{}\"\nmemory = {}\nvcpus = {}\nextra = \"{}\"\n",
            spec.name,
            spec.kernel_path.display(),
            spec.mem_mib,
            spec.vcpus,
            spec.args.join(" "),
        )
    }
}

#[async_trait]
impl PlatformController for XenController {
    fn platform(&self) -> Platform {
        Platform::Xen
    }

    async fn is_host_hypervisor_available(&self) -> bool {
        which::which("xl").is_ok() && std::path::Path::new("/proc/xen").exists()
    }

    async fn launch(&self, spec: &MachineSpec) -> Result<u32, PlatformError> {
        let program =
            which::which("xl").map_err(|e| PlatformError::HypervisorUnavailable(e.to_string()))?;
        let config_path = Self::config_path(spec);
        std::fs::create_dir_all(&spec.state_dir)?;
        std::fs::write(&config_path, Self::config(spec))?;

        let process = ProcessSpec::new(program, &spec.log_file)
            .arg("create")
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_includes_machine_name_and_kernel() {
        let spec = MachineSpec::builder().build();
        let cfg = XenController::config(&spec);
        assert!(cfg.contains(&spec.name.to_string()));
        assert!(cfg.contains("kernel ="));
    }
}

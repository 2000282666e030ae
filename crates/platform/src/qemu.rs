// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! QEMU platform controller.

use async_trait::async_trait;
use uk_core::{MachineSpec, Platform, PortProtocol};
use uk_shell::ProcessSpec;

use crate::controller::PlatformController;
use crate::error::PlatformError;

#[derive(Debug, Clone, Copy, Default)]
pub struct QemuController;

impl QemuController {
    pub fn new() -> Self {
        Self
    }

    fn binary(spec: &MachineSpec) -> String {
        format!("qemu-system-{}", spec.architecture)
    }

    fn build_args(spec: &MachineSpec) -> Vec<String> {
        let mut args = vec![
            "-kernel".into(),
            spec.kernel_path.display().to_string(),
            "-m".into(),
            format!("{}M", spec.mem_mib),
            "-smp".into(),
            spec.vcpus.to_string(),
            "-nographic".into(),
            "-serial".into(),
            format!("file:{}", spec.log_file.display()),
        ];

        if spec.hw_acceleration {
            args.push("-enable-kvm".into());
        }

        if let Some(initrd) = &spec.initrd_path {
            args.push("-initrd".into());
            args.push(initrd.display().to_string());
        }

        if !spec.args.is_empty() {
            args.push("-append".into());
            args.push(spec.args.join(" "));
        }

        for net in &spec.networks {
            args.push("-netdev".into());
            args.push(format!("user,id={}", net.driver));
            args.push("-device".into());
            args.push(format!("virtio-net-pci,netdev={}", net.driver));
        }

        for port in &spec.ports {
            let proto = match port.protocol {
                PortProtocol::Tcp => "tcp",
                PortProtocol::Udp => "udp",
            };
            args.push("-netdev".into());
            args.push(format!(
                "user,id=fwd{0},hostfwd={proto}::{1}-:{2}",
                port.host_port, port.host_port, port.guest_port
            ));
        }

        args
    }
}

#[async_trait]
impl PlatformController for QemuController {
    fn platform(&self) -> Platform {
        Platform::Qemu
    }

    async fn is_host_hypervisor_available(&self) -> bool {
        which::which("qemu-system-x86_64").is_ok()
    }

    async fn launch(&self, spec: &MachineSpec) -> Result<u32, PlatformError> {
        let program = which::which(Self::binary(spec))
            .map_err(|e| PlatformError::HypervisorUnavailable(e.to_string()))?;
        let process = ProcessSpec::new(program, &spec.log_file).args(Self::build_args(spec));
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
    fn build_args_includes_kernel_and_memory() {
        let spec = MachineSpec::builder().mem_mib(128).vcpus(2).build();
        let args = QemuController::build_args(&spec);
        assert!(args.windows(2).any(|w| w[0] == "-m" && w[1] == "128M"));
        assert!(args.windows(2).any(|w| w[0] == "-smp" && w[1] == "2"));
    }

    #[test]
    fn build_args_adds_enable_kvm_when_requested() {
        let spec = MachineSpec::builder().hw_acceleration(true).build();
        assert!(QemuController::build_args(&spec).contains(&"-enable-kvm".to_string()));
    }
}

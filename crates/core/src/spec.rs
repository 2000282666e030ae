// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The canonical, platform-agnostic machine description (spec §3).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::CoreError;
use crate::id::MachineId;
use crate::name::MachineName;
use crate::simple_display;

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    X86_64,
    Arm,
    Arm64,
}

simple_display! {
    Architecture {
        X86_64 => "x86_64",
        Arm => "arm",
        Arm64 => "arm64",
    }
}

impl std::str::FromStr for Architecture {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" | "amd64" => Ok(Architecture::X86_64),
            "arm" => Ok(Architecture::Arm),
            "arm64" | "aarch64" => Ok(Architecture::Arm64),
            other => Err(CoreError::InvalidInput(format!("unsupported architecture {other:?}"))),
        }
    }
}

/// Target virtualization platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Qemu,
    Firecracker,
    Xen,
    Kraftcloud,
    Linuxu,
}

simple_display! {
    Platform {
        Qemu => "qemu",
        Firecracker => "firecracker",
        Xen => "xen",
        Kraftcloud => "kraftcloud",
        Linuxu => "linuxu",
    }
}

impl std::str::FromStr for Platform {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qemu" => Ok(Platform::Qemu),
            "firecracker" | "fc" => Ok(Platform::Firecracker),
            "xen" => Ok(Platform::Xen),
            "kraftcloud" => Ok(Platform::Kraftcloud),
            "linuxu" => Ok(Platform::Linuxu),
            other => Err(CoreError::InvalidInput(format!("unsupported platform {other:?}"))),
        }
    }
}

/// Scheme of the URI a kernel image was materialized from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelSource {
    Kernel(String),
    Project(String),
    Oci(String),
}

impl KernelSource {
    pub fn uri(&self) -> String {
        match self {
            KernelSource::Kernel(p) => format!("kernel://{p}"),
            KernelSource::Project(p) => format!("project://{p}"),
            KernelSource::Oci(p) => format!("oci://{p}"),
        }
    }
}

/// One network interface attachment on a given driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAttachment {
    pub driver: String,
    pub interfaces: Vec<String>,
}

/// Host:guest port forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub host_port: u16,
    pub guest_port: u16,
    pub protocol: PortProtocol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortProtocol {
    Tcp,
    Udp,
}

simple_display! {
    PortProtocol {
        Tcp => "tcp",
        Udp => "udp",
    }
}

/// `KEY=VALUE` environment entry, keys unique within a [`MachineSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.split_once('=') {
            Some((k, v)) if !k.is_empty() => {
                Ok(Self { key: k.to_string(), value: v.to_string() })
            }
            _ => Err(CoreError::InvalidInput(format!("invalid env entry {s:?}, expected KEY=VALUE"))),
        }
    }
}

/// The canonical, platform-agnostic description of a guest (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSpec {
    pub id: MachineId,
    pub name: MachineName,
    pub architecture: Architecture,
    pub platform: Platform,
    pub driver: String,
    pub kernel_path: PathBuf,
    pub kernel_source_uri: String,
    #[serde(default)]
    pub initrd_path: Option<PathBuf>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub envs: Vec<EnvVar>,
    pub mem_mib: u32,
    pub vcpus: u32,
    #[serde(default)]
    pub hw_acceleration: bool,
    #[serde(default)]
    pub destroy_on_exit: bool,
    #[serde(default)]
    pub networks: Vec<NetworkAttachment>,
    #[serde(default)]
    pub ports: Vec<PortMapping>,
    pub state_dir: PathBuf,
    pub log_file: PathBuf,
    /// Epoch milliseconds; set once at create and never mutated.
    pub created_at_ms: u64,
}

/// Default memory, per spec §3 ("default 64").
pub const DEFAULT_MEM_MIB: u32 = 64;
/// Default vcpu count, per spec §3 ("default 1").
pub const DEFAULT_VCPUS: u32 = 1;

impl MachineSpec {
    /// Construct a spec for a freshly-resolved machine. Callers set
    /// optional fields afterward via the setter methods below; `id` is
    /// freshly generated and `created_at_ms` is taken from the caller's
    /// clock rather than computed here, since this crate has no clock
    /// dependency of its own.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: MachineName,
        architecture: Architecture,
        platform: Platform,
        driver: impl Into<String>,
        kernel_path: PathBuf,
        kernel_source_uri: impl Into<String>,
        state_dir: PathBuf,
        log_file: PathBuf,
        created_at_ms: u64,
    ) -> Self {
        Self {
            id: MachineId::new(),
            name,
            architecture,
            platform,
            driver: driver.into(),
            kernel_path,
            kernel_source_uri: kernel_source_uri.into(),
            initrd_path: None,
            args: Vec::new(),
            envs: Vec::new(),
            mem_mib: DEFAULT_MEM_MIB,
            vcpus: DEFAULT_VCPUS,
            hw_acceleration: false,
            destroy_on_exit: false,
            networks: Vec::new(),
            ports: Vec::new(),
            state_dir,
            log_file,
            created_at_ms,
        }
    }

    crate::setters! {
        set {
            args: Vec<String>,
            envs: Vec<EnvVar>,
            mem_mib: u32,
            vcpus: u32,
            hw_acceleration: bool,
            destroy_on_exit: bool,
            networks: Vec<NetworkAttachment>,
            ports: Vec<PortMapping>,
        }
        option {
            initrd_path: PathBuf,
        }
    }

    /// Validate invariants that don't require filesystem access:
    /// non-empty env keys are unique, mem/vcpus are positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.mem_mib == 0 {
            return Err(CoreError::InvalidInput("mem_mib must be positive".into()));
        }
        if self.vcpus == 0 {
            return Err(CoreError::InvalidInput("vcpus must be positive".into()));
        }
        if self.kernel_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput("kernel_path must not be empty".into()));
        }
        if !self.kernel_path.is_absolute() {
            return Err(CoreError::InvalidInput("kernel_path must be absolute".into()));
        }
        let mut seen = BTreeSet::new();
        for env in &self.envs {
            if !seen.insert(env.key.as_str()) {
                return Err(CoreError::InvalidInput(format!(
                    "duplicate env key {:?}",
                    env.key
                )));
            }
        }
        Ok(())
    }
}

crate::builder! {
    pub struct MachineSpecBuilder => MachineSpec {
        into {
            driver: String = "test-driver",
            kernel_source_uri: String = "kernel:///tmp/test-kernel",
        }
        set {
            architecture: Architecture = Architecture::X86_64,
            platform: Platform = Platform::Qemu,
            kernel_path: PathBuf = PathBuf::from("/tmp/test-kernel"),
            args: Vec<String> = Vec::new(),
            envs: Vec<EnvVar> = Vec::new(),
            mem_mib: u32 = DEFAULT_MEM_MIB,
            vcpus: u32 = DEFAULT_VCPUS,
            hw_acceleration: bool = false,
            destroy_on_exit: bool = false,
            networks: Vec<NetworkAttachment> = Vec::new(),
            ports: Vec<PortMapping> = Vec::new(),
            state_dir: PathBuf = PathBuf::from("/tmp/test-state-dir"),
            log_file: PathBuf = PathBuf::from("/tmp/test-state-dir/console.log"),
            created_at_ms: u64 = 0,
        }
        option {
            initrd_path: PathBuf = None,
        }
        computed {
            id: MachineId = MachineId::new(),
            name: MachineName = MachineName::parse("test-machine").unwrap_or(MachineName::parse("m").expect("fallback name is valid")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn architecture_roundtrips_through_display_and_parse() {
        for a in [Architecture::X86_64, Architecture::Arm, Architecture::Arm64] {
            let parsed: Architecture = a.to_string().parse().unwrap();
            assert_eq!(parsed, a);
        }
    }

    #[test]
    fn platform_rejects_unknown_names() {
        assert!("bhyve".parse::<Platform>().is_err());
    }

    #[test]
    fn env_var_parses_key_value() {
        let e = EnvVar::parse("FOO=bar").unwrap();
        assert_eq!(e.key, "FOO");
        assert_eq!(e.value, "bar");
    }

    #[test]
    fn env_var_rejects_missing_equals() {
        assert!(EnvVar::parse("FOO").is_err());
    }

    #[test]
    fn env_var_allows_value_with_equals() {
        let e = EnvVar::parse("FOO=a=b").unwrap();
        assert_eq!(e.value, "a=b");
    }

    #[test]
    fn validate_rejects_zero_mem_or_vcpus() {
        let mut spec = MachineSpec::builder().mem_mib(0).build();
        assert!(spec.validate().is_err());
        spec = MachineSpec::builder().vcpus(0).build();
        assert!(spec.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_env_keys() {
        let spec = MachineSpec::builder()
            .envs(vec![EnvVar::parse("A=1").unwrap(), EnvVar::parse("A=2").unwrap()])
            .build();
        assert!(spec.validate().is_err());
    }

    #[test]
    fn validate_accepts_well_formed_spec() {
        let spec = MachineSpec::builder().build();
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn new_applies_setter_defaults() {
        let spec = MachineSpec::new(
            MachineName::parse("m").unwrap(),
            Architecture::X86_64,
            Platform::Qemu,
            "qemu",
            PathBuf::from("/tmp/k"),
            "kernel:///tmp/k",
            PathBuf::from("/tmp/state"),
            PathBuf::from("/tmp/state/console.log"),
            0,
        )
        .mem_mib(256)
        .vcpus(2)
        .initrd_path(PathBuf::from("/tmp/initrd"));
        assert_eq!(spec.mem_mib, 256);
        assert_eq!(spec.vcpus, 2);
        assert_eq!(spec.initrd_path, Some(PathBuf::from("/tmp/initrd")));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn kernel_source_uri_scheme() {
        assert_eq!(KernelSource::Kernel("/a".into()).uri(), "kernel:///a");
        assert_eq!(KernelSource::Project("/b".into()).uri(), "project:///b");
        assert_eq!(KernelSource::Oci("img".into()).uri(), "oci://img");
    }
}

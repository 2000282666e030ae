// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner #1 (spec §4.5): the first positional argument names a
//! Linux-userspace ELF built from Unikraft.

use std::path::Path;

use async_trait::async_trait;
use uk_core::{elf, MachineSpec, Platform};

use crate::args::RunArgs;
use crate::error::RunnerError;
use crate::runner::Runner;

pub struct LinuxuRunner;

#[async_trait]
impl Runner for LinuxuRunner {
    fn name(&self) -> &'static str {
        "linuxu"
    }

    async fn runnable(&self, args: &RunArgs) -> Result<bool, RunnerError> {
        let Some(first) = args.first() else { return Ok(false) };
        if args.plat.is_some() && args.plat != Some(Platform::Linuxu) {
            return Ok(false);
        }
        Ok(elf::sanity_check(Path::new(first)).is_ok() && args.plat == Some(Platform::Linuxu))
    }

    async fn prepare(&self, args: &RunArgs, machine: &mut MachineSpec) -> Result<(), RunnerError> {
        let path = Path::new(args.first().expect("runnable checked first()"));
        let arch = args.arch.unwrap_or(elf::sanity_check(path)?);
        machine.architecture = arch;
        machine.platform = Platform::Linuxu;
        machine.kernel_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        machine.kernel_source_uri = format!("kernel://{}", machine.kernel_path.display());
        machine.initrd_path = None;
        machine.args = args.rest();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fake_elf(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("app.linuxu");
        let mut f = std::fs::File::create(&path).unwrap();
        let mut header = [0u8; 20];
        header[0..4].copy_from_slice(&[0x7f, b'E', b'L', b'F']);
        header[18..20].copy_from_slice(&62u16.to_le_bytes()); // EM_X86_64
        f.write_all(&header).unwrap();
        path
    }

    #[tokio::test]
    async fn runnable_only_when_platform_pinned_to_linuxu() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fake_elf(&dir);
        let runner = LinuxuRunner;

        let args = RunArgs { positional: vec![path.display().to_string()], ..Default::default() };
        assert!(!runner.runnable(&args).await.unwrap());

        let args =
            RunArgs { positional: vec![path.display().to_string()], plat: Some(Platform::Linuxu), ..Default::default() };
        assert!(runner.runnable(&args).await.unwrap());
    }

    #[tokio::test]
    async fn prepare_fills_kernel_path_and_architecture() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fake_elf(&dir);
        let runner = LinuxuRunner;
        let args = RunArgs {
            positional: vec![path.display().to_string(), "--verbose".into()],
            plat: Some(Platform::Linuxu),
            ..Default::default()
        };
        let mut machine = MachineSpec::builder().build();
        runner.prepare(&args, &mut machine).await.unwrap();
        assert_eq!(machine.platform, Platform::Linuxu);
        assert_eq!(machine.args, vec!["--verbose".to_string()]);
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner #3 (spec §4.5): the first positional argument (or CWD) is an
//! initialized project directory; targets are filtered by
//! `--arch`/`--plat`/`--target`; exactly one survivor is selected, else
//! `AmbiguousTarget`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uk_core::{MachineSpec, Platform};
use uk_packager::ProjectManifest;

use crate::args::RunArgs;
use crate::error::RunnerError;
use crate::runner::Runner;

pub struct ProjectRunner;

impl ProjectRunner {
    fn project_dir(args: &RunArgs) -> PathBuf {
        match args.first() {
            Some(first) if Path::new(first).is_dir() => PathBuf::from(first),
            _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

#[async_trait]
impl Runner for ProjectRunner {
    fn name(&self) -> &'static str {
        "project"
    }

    async fn runnable(&self, args: &RunArgs) -> Result<bool, RunnerError> {
        Ok(ProjectManifest::load(&Self::project_dir(args)).is_ok())
    }

    async fn prepare(&self, args: &RunArgs, machine: &mut MachineSpec) -> Result<(), RunnerError> {
        let project_dir = Self::project_dir(args);
        let manifest = ProjectManifest::load(&project_dir)?;
        let targets = manifest.filter_targets(args.arch, args.plat, args.target.as_deref());

        let target = match targets.len() {
            1 => targets[0],
            0 => return Err(RunnerError::AmbiguousTarget(Vec::new())),
            _ if args.no_prompt => {
                return Err(RunnerError::AmbiguousTarget(
                    targets.iter().map(|t| t.name.clone()).collect(),
                ))
            }
            _ => targets[0],
        };

        machine.architecture =
            target.architecture.ok_or_else(|| RunnerError::Io(missing_field("architecture")))?;
        machine.platform = target.platform.unwrap_or(Platform::Qemu);
        let kernel_path = target
            .kernel
            .clone()
            .ok_or_else(|| RunnerError::Io(missing_field("kernel")))?;
        machine.kernel_path = project_dir.join(&kernel_path);
        machine.kernel_source_uri = format!("project://{}", project_dir.display());
        machine.initrd_path = None;
        machine.args = args.rest();
        Ok(())
    }
}

fn missing_field(field: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, format!("target missing {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uk_core::Architecture;

    fn write_manifest(dir: &tempfile::TempDir, yaml: &str) {
        std::fs::write(dir.path().join("Kraftfile"), yaml).unwrap();
    }

    #[tokio::test]
    async fn runnable_when_directory_has_a_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(&dir, "name: app\ntargets:\n  - name: a\n    architecture: x86_64\n    platform: qemu\n    kernel: kernel.elf\n");
        let runner = ProjectRunner;
        let args = RunArgs { positional: vec![dir.path().display().to_string()], ..Default::default() };
        assert!(runner.runnable(&args).await.unwrap());
    }

    #[tokio::test]
    async fn prepare_selects_sole_surviving_target() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(&dir, "name: app\ntargets:\n  - name: a\n    architecture: x86_64\n    platform: qemu\n    kernel: kernel.elf\n");
        let runner = ProjectRunner;
        let args = RunArgs { positional: vec![dir.path().display().to_string()], ..Default::default() };
        let mut machine = MachineSpec::builder().build();
        runner.prepare(&args, &mut machine).await.unwrap();
        assert_eq!(machine.architecture, Architecture::X86_64);
    }

    #[tokio::test]
    async fn prepare_fails_ambiguous_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            &dir,
            "name: app\ntargets:\n  - name: a\n    architecture: x86_64\n    platform: qemu\n    kernel: k\n  - name: b\n    architecture: arm64\n    platform: qemu\n    kernel: k\n",
        );
        let runner = ProjectRunner;
        let args = RunArgs {
            positional: vec![dir.path().display().to_string()],
            no_prompt: true,
            ..Default::default()
        };
        let mut machine = MachineSpec::builder().build();
        assert!(matches!(
            runner.prepare(&args, &mut machine).await,
            Err(RunnerError::AmbiguousTarget(_))
        ));
    }
}

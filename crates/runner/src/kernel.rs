// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner #2 (spec §4.5): the first positional argument is a path to a
//! file passing the unikernel-ELF sanity check; remaining args become
//! kernel args; architecture is inferred from the ELF when `--arch` is
//! unset.

use std::path::Path;

use async_trait::async_trait;
use uk_core::{elf, MachineSpec, Platform};

use crate::args::RunArgs;
use crate::error::RunnerError;
use crate::runner::Runner;

pub struct KernelRunner;

#[async_trait]
impl Runner for KernelRunner {
    fn name(&self) -> &'static str {
        "kernel"
    }

    async fn runnable(&self, args: &RunArgs) -> Result<bool, RunnerError> {
        let Some(first) = args.first() else { return Ok(false) };
        Ok(elf::sanity_check(Path::new(first)).is_ok())
    }

    async fn prepare(&self, args: &RunArgs, machine: &mut MachineSpec) -> Result<(), RunnerError> {
        let path = Path::new(args.first().expect("runnable checked first()"));
        let inferred = elf::sanity_check(path)?;
        machine.architecture = args.arch.unwrap_or(inferred);
        machine.platform = args.plat.unwrap_or(Platform::Qemu);
        machine.kernel_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        machine.kernel_source_uri = format!("kernel://{}", machine.kernel_path.display());
        machine.initrd_path = None;
        machine.args = args.rest();
        Ok(())
    }
}

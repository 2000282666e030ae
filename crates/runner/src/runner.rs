// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Runner Dispatch trait and ordered selection (spec §4.5).

use async_trait::async_trait;
use uk_core::MachineSpec;

use crate::args::RunArgs;
use crate::error::RunnerError;

#[async_trait]
pub trait Runner: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Whether this runner can handle `args`. The first runner (in the
    /// fixed order returned by [`crate::registry::all`]) to answer `true`
    /// wins; no fall-through if its `prepare` then errors.
    async fn runnable(&self, args: &RunArgs) -> Result<bool, RunnerError>;

    /// Fill in `machine`'s `architecture`, `platform`, `kernel_path`,
    /// `kernel_source_uri`, `initrd_path`, and `args` fields.
    async fn prepare(&self, args: &RunArgs, machine: &mut MachineSpec) -> Result<(), RunnerError>;
}

/// Try each runner's `runnable` in order; the first match prepares the
/// spec. No fall-through to the next runner if `prepare` errors.
pub async fn dispatch(
    runners: &[Box<dyn Runner>],
    args: &RunArgs,
    machine: &mut MachineSpec,
) -> Result<&'static str, RunnerError> {
    for runner in runners {
        if runner.runnable(args).await? {
            runner.prepare(args, machine).await?;
            return Ok(runner.name());
        }
    }
    Err(RunnerError::NoRunnerMatched)
}

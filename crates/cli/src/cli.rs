// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The top-level command surface (spec §6).

use clap::{Parser, Subcommand};
use uk_core::{Architecture, Platform};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "uk", version = env!("BUILD_GIT_HASH"), styles = crate::color::styles())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Materialize a kernel/project/package into a machine and start it
    Run(RunArgs),
    /// List machines
    Ps(PsArgs),
    /// Stream or dump a machine's console log
    Logs(LogsArgs),
    /// Gracefully stop one or more machines
    Stop(StopArgs),
    /// Destroy one or more machines
    Rm(RmArgs),
    /// Run the event supervisor
    Events(EventsArgs),
    #[command(subcommand)]
    Pkg(PkgCommand),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Project directory, kernel path, or package reference
    pub target: String,
    /// Kernel/program arguments, passed after `--`
    #[arg(last = true)]
    pub args: Vec<String>,
    #[arg(long)]
    pub plat: Option<Platform>,
    #[arg(long)]
    pub arch: Option<Architecture>,
    #[arg(long, default_value_t = uk_core::DEFAULT_MEM_MIB)]
    pub mem: u32,
    #[arg(long, default_value_t = uk_core::DEFAULT_VCPUS)]
    pub vcpus: u32,
    /// Destroy the machine once it exits
    #[arg(long)]
    pub rm: bool,
    /// Start detached (do not wait on the guest)
    #[arg(long)]
    pub detach: bool,
    /// Build/run target name (for multi-target projects)
    #[arg(long)]
    pub target_name: Option<String>,
    /// `host:guest[/proto]` port forward, repeatable
    #[arg(long = "port")]
    pub ports: Vec<String>,
    /// Network driver to attach, repeatable
    #[arg(long = "network")]
    pub networks: Vec<String>,
    /// `KEY=VALUE` environment entry, repeatable
    #[arg(short = 'e', long = "env")]
    pub envs: Vec<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct PsArgs {
    /// Include terminal (exited/dead) machines
    #[arg(long)]
    pub all: bool,
    #[arg(long)]
    pub plat: Option<Platform>,
    /// Show extended columns
    #[arg(long)]
    pub long: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
    #[arg(long, conflicts_with = "limit")]
    pub no_limit: bool,
}

#[derive(clap::Args)]
pub struct LogsArgs {
    /// Machine id or name (prefix match)
    pub reference: String,
    #[arg(long, short)]
    pub follow: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct StopArgs {
    #[arg(required = true)]
    pub references: Vec<String>,
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct RmArgs {
    pub references: Vec<String>,
    /// Destroy every machine in the store
    #[arg(long, conflicts_with = "references")]
    pub all: bool,
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct EventsArgs {
    /// Restrict observation to a single id/short id
    #[arg(long)]
    pub id: Option<String>,
    /// Exit once the observed id-set drains to empty
    #[arg(long)]
    pub quit_together: bool,
    /// Polling granularity in milliseconds
    #[arg(long, default_value = "1000")]
    pub poll_granularity: u64,
}

#[derive(Subcommand)]
pub enum PkgCommand {
    /// Produce a package from the current project/kernel
    Pack(PkgPackArgs),
    /// Fetch a package from a remote source
    Pull { reference: String },
    /// Publish a package to a remote source
    Push { reference: String },
    /// List packages in the local catalog
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Remove a package from the local catalog
    Rm { reference: String },
    /// Add a remote catalog source
    Source { uri: String },
    /// Remove a remote catalog source
    Unsource { uri: String },
    /// Refresh remote catalog metadata
    Update,
}

#[derive(clap::Args)]
pub struct PkgPackArgs {
    /// Package manager to target (auto-detected when unset)
    #[arg(long = "as")]
    pub as_manager: Option<String>,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub arch: Option<Architecture>,
    #[arg(long)]
    pub plat: Option<Platform>,
    #[arg(long)]
    pub rootfs: Option<std::path::PathBuf>,
    #[arg(long, value_enum, default_value_t = MergeStrategyArg::Overwrite)]
    pub strategy: MergeStrategyArg,
    #[arg(long = "kconfig")]
    pub kconfig: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum MergeStrategyArg {
    Overwrite,
    Merge,
    Abort,
    Prompt,
}

impl From<MergeStrategyArg> for uk_packager::MergeStrategy {
    fn from(v: MergeStrategyArg) -> Self {
        match v {
            MergeStrategyArg::Overwrite => uk_packager::MergeStrategy::Overwrite,
            MergeStrategyArg::Merge => uk_packager::MergeStrategy::Merge,
            MergeStrategyArg::Abort => uk_packager::MergeStrategy::Abort,
            MergeStrategyArg::Prompt => uk_packager::MergeStrategy::Prompt,
        }
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod cli;
mod color;
mod commands;
mod context;
mod exit_error;
mod output;

use clap::Parser;

use cli::{Cli, Command};
use context::AppContext;
use exit_error::ExitError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("UK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .init();

    // No update-check probe is implemented; read-and-ignore so scripts
    // that already export this stay forward-compatible.
    let _ = std::env::var("UK_NO_CHECK_UPDATES");

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        std::process::exit(err.code);
    }
}

async fn run(cli: Cli) -> Result<(), ExitError> {
    let ctx = AppContext::load()?;

    match cli.command {
        Command::Run(args) => commands::run::handle(&ctx, args).await,
        Command::Ps(args) => commands::ps::handle(&ctx, args).await,
        Command::Logs(args) => commands::logs::handle(&ctx, args).await,
        Command::Stop(args) => commands::stop::handle(&ctx, args).await,
        Command::Rm(args) => commands::rm::handle(&ctx, args).await,
        Command::Events(args) => commands::events::handle(&ctx, args).await,
        Command::Pkg(cmd) => commands::pkg::handle(&ctx, cmd).await,
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk events` — run the event supervisor in the foreground (spec §4.4).

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uk_supervisor::Supervisor;

use crate::cli::EventsArgs;
use crate::context::AppContext;
use crate::exit_error::ExitError;

pub async fn handle(ctx: &AppContext, args: EventsArgs) -> Result<(), ExitError> {
    let supervisor = Supervisor::new(ctx.config.runtime_dir.clone(), ctx.controller.clone())
        .with_granularity(Duration::from_millis(args.poll_granularity))
        .with_id_filter(args.id)
        .with_quit_together(args.quit_together);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    supervisor.run(shutdown).await?;
    Ok(())
}

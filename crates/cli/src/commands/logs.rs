// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk logs` — dump or stream a machine's console log.

use crate::cli::LogsArgs;
use crate::context::AppContext;
use crate::exit_error::ExitError;
use crate::output;

pub async fn handle(ctx: &AppContext, args: LogsArgs) -> Result<(), ExitError> {
    let log_path = ctx.controller.log_path(&args.reference)?;
    let content = std::fs::read_to_string(&log_path).unwrap_or_default();
    output::display_log(&log_path, &content, args.follow, args.output).await?;
    Ok(())
}

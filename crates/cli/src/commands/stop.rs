// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk stop` — gracefully stop one or more machines (spec §4.3).

use crate::cli::StopArgs;
use crate::context::AppContext;
use crate::exit_error::ExitError;

pub async fn handle(ctx: &AppContext, args: StopArgs) -> Result<(), ExitError> {
    let mut first_err: Option<ExitError> = None;

    for reference in &args.references {
        match ctx.controller.stop(reference, args.force).await {
            Ok(stopped) => println!("{} stopped", stopped.spec.name),
            Err(e) => {
                let err = ExitError::from(e);
                eprintln!("{reference}: {err}");
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk rm` — destroy one or more machines (spec §4.3).

use crate::cli::RmArgs;
use crate::context::AppContext;
use crate::exit_error::ExitError;

pub async fn handle(ctx: &AppContext, args: RmArgs) -> Result<(), ExitError> {
    let references = if args.all {
        ctx.controller.list(None)?.into_iter().map(|m| m.spec.id.as_str().to_string()).collect()
    } else {
        if args.references.is_empty() {
            return Err(ExitError::usage("rm requires at least one reference, or --all"));
        }
        args.references.clone()
    };

    let mut first_err: Option<ExitError> = None;

    for reference in &references {
        match ctx.controller.destroy(reference, args.force).await {
            Ok(()) => println!("{reference} removed"),
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

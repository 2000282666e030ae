// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk ps` — list machines (spec §4.2 `List`).

use uk_store::StoredMachine;

use crate::cli::PsArgs;
use crate::context::AppContext;
use crate::exit_error::ExitError;
use crate::output::{self, apply_limit, handle_list_with_limit};

pub async fn handle(ctx: &AppContext, args: PsArgs) -> Result<(), ExitError> {
    let mut machines = ctx.controller.list(None)?;

    if !args.all {
        machines.retain(|m| !m.status.state.is_terminal());
    }
    if let Some(plat) = args.plat {
        machines.retain(|m| m.spec.platform == plat);
    }
    machines.sort_by(|a, b| b.spec.created_at_ms.cmp(&a.spec.created_at_ms));

    let truncation = apply_limit(&mut machines, args.limit, args.no_limit);
    let long = args.long;

    handle_list_with_limit(args.output, &machines, "No machines found", truncation, |items, w| {
        print_table(items, w, long)
    })?;
    Ok(())
}

fn print_table(items: &[StoredMachine], w: &mut dyn std::io::Write, long: bool) {
    if long {
        let _ = writeln!(w, "{:<14}{:<20}{:<10}{:<10}{:<10}{:<8}AGE", "ID", "NAME", "STATE", "ARCH", "PLAT", "PID");
    } else {
        let _ = writeln!(w, "{:<14}{:<20}{:<10}AGE", "ID", "NAME", "STATE");
    }
    for m in items {
        let age = output::format_time_ago(m.spec.created_at_ms);
        if long {
            let pid = m.status.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".into());
            let _ = writeln!(
                w,
                "{:<14}{:<20}{:<10}{:<10}{:<10}{:<8}{}",
                m.spec.id.short(),
                m.spec.name,
                m.status.state,
                m.spec.architecture,
                m.spec.platform,
                pid,
                age,
            );
        } else {
            let _ = writeln!(w, "{:<14}{:<20}{:<10}{}", m.spec.id.short(), m.spec.name, m.status.state, age);
        }
    }
}

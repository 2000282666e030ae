// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk pkg` — the Packager/Resolver Pipeline surface (spec §4.6), with
//! `pack` driven through the progress engine (spec §4.7) since a pack can
//! span a build step plus the packaging call itself.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use uk_packager::{
    catalog_local_then_remote, MergeStrategy, Package, PackContext, PackOptions, PackageQuery,
    ProjectManifest,
};
use uk_progress::{Engine, Mode, ProgressError, Unit};

use crate::cli::{PkgCommand, PkgPackArgs};
use crate::context::AppContext;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

pub async fn handle(ctx: &AppContext, cmd: PkgCommand) -> Result<(), ExitError> {
    match cmd {
        PkgCommand::Pack(args) => pack(ctx, args).await,
        PkgCommand::List { output } => list(ctx, output).await,
        PkgCommand::Rm { reference } => rm(ctx, reference).await,
        PkgCommand::Pull { reference } => unsupported("pull", &reference),
        PkgCommand::Push { reference } => unsupported("push", &reference),
        PkgCommand::Source { uri } => unsupported("source", &uri),
        PkgCommand::Unsource { uri } => unsupported("unsource", &uri),
        PkgCommand::Update => unsupported("update", ""),
    }
}

/// Remote catalog sources and OCI-registry transfer are out of scope: the
/// core only calls into a packaging driver, never produces registry bytes
/// itself. The local driver has nothing to pull from or push to.
fn unsupported(verb: &str, reference: &str) -> Result<(), ExitError> {
    Err(ExitError::usage(format!(
        "pkg {verb}: no remote catalog source is configured{}",
        if reference.is_empty() { String::new() } else { format!(" for {reference:?}") }
    )))
}

async fn pack(ctx: &AppContext, args: PkgPackArgs) -> Result<(), ExitError> {
    let project_dir = std::env::current_dir()?;
    let manifest = ProjectManifest::load(&project_dir).ok();

    let pack_ctx = PackContext {
        project_dir: Some(project_dir),
        has_unikraft_core: manifest.as_ref().is_some_and(|m| m.has_unikraft_core()),
        runtime_ref: manifest.as_ref().and_then(|m| m.runtime.clone()),
        cli_kernel: args.rootfs.clone().filter(|_| manifest.is_none()),
        arch: args.arch,
        plat: args.plat,
        rootfs_dockerfile: args.rootfs.clone(),
    };

    let options = PackOptions {
        name: args.name.clone(),
        args: Vec::new(),
        initrd: None,
        kconfig: args.kconfig.clone(),
        envs: Vec::new(),
        labels: Vec::new(),
        output: ctx.config.runtime_dir.join("packages").join(&args.name),
        merge_strategy: MergeStrategy::from(args.strategy),
        kernel_version: None,
    };

    let manager = ctx.package_manager.clone();
    let result: Arc<Mutex<Vec<Package>>> = Arc::new(Mutex::new(Vec::new()));
    let result_slot = result.clone();

    let unit = Unit::new("pack", move |unit_ctx, _progress| {
        let manager = manager.clone();
        let pack_ctx = pack_ctx.clone();
        let options = options.clone();
        let result_slot = result_slot.clone();
        async move {
            unit_ctx.log(format!("resolving packager for {}", options.name));
            let packagers = uk_packager::registry::all();
            match uk_packager::dispatch(&packagers, &pack_ctx, &options, manager.as_ref()).await {
                Ok(packages) => {
                    *result_slot.lock() = packages;
                    Ok(())
                }
                Err(e) => Err(ProgressError::Failed(e.to_string())),
            }
        }
    });

    let engine = Engine::new(Mode::Sequential, true);
    let report = engine.run(vec![unit], CancellationToken::new()).await;
    if let Some(err) = report.first_error {
        return Err(ExitError::from(err));
    }

    for p in result.lock().iter() {
        println!("packed {} ({} {})", p.name, p.arch, p.plat);
    }
    Ok(())
}

async fn list(ctx: &AppContext, output: OutputFormat) -> Result<(), ExitError> {
    let packages = catalog_local_then_remote(ctx.package_manager.as_ref(), PackageQuery::default()).await?;
    output::handle_list(output, &packages, "No packages found", |items, w| {
        let _ = writeln!(w, "{:<24}{:<10}{:<10}{:<10}VERSION", "NAME", "ARCH", "PLAT", "LOCAL");
        for p in items {
            let _ = writeln!(
                w,
                "{:<24}{:<10}{:<10}{:<10}{}",
                p.name, p.arch, p.plat, p.local, p.version
            );
        }
    })?;
    Ok(())
}

async fn rm(ctx: &AppContext, reference: String) -> Result<(), ExitError> {
    ctx.package_manager.delete(&PackageQuery::named(reference.clone())).await?;
    println!("{reference} removed");
    Ok(())
}

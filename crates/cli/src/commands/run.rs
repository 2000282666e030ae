// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `uk run` — materialize a kernel/project/package into a machine, via
//! Runner Dispatch (spec §4.5), then Create+Start it (spec §4.2).

use std::path::PathBuf;

use uk_core::{EnvVar, MachineName, MachineSpec, NetworkAttachment, PortMapping, PortProtocol};

use crate::cli::RunArgs;
use crate::context::AppContext;
use crate::exit_error::ExitError;
use crate::output;

pub async fn handle(ctx: &AppContext, cli_args: RunArgs) -> Result<(), ExitError> {
    let name = derive_name(&cli_args.target);
    let state_dir = ctx.config.runtime_dir.join("machines-state").join(name.as_str());
    let log_file = state_dir.join("console.log");

    let plat = ctx.resolve_platform(cli_args.plat).await?;

    let mut positional = vec![cli_args.target.clone()];
    positional.extend(cli_args.args.clone());

    let run_args = uk_runner::RunArgs {
        positional,
        arch: cli_args.arch,
        plat: Some(plat),
        target: cli_args.target_name.clone(),
        state_dir: state_dir.clone(),
        no_prompt: std::env::var("UK_NO_PROMPT").is_ok(),
    };

    let mut machine = MachineSpec::new(
        MachineName::parse(name)?,
        cli_args.arch.unwrap_or(uk_core::Architecture::X86_64),
        plat,
        "unikraft-toolkit",
        PathBuf::new(),
        "",
        state_dir,
        log_file,
        now_ms(),
    )
    .mem_mib(cli_args.mem)
    .vcpus(cli_args.vcpus)
    .destroy_on_exit(cli_args.rm)
    .envs(parse_envs(&cli_args.envs)?)
    .networks(parse_networks(&cli_args.networks))
    .ports(parse_ports(&cli_args.ports)?);

    let runners = uk_runner::all(ctx.package_manager.clone());
    let matched = uk_runner::dispatch(&runners, &run_args, &mut machine).await?;
    tracing::info!(runner = matched, target = %cli_args.target, "dispatched run target");

    let created = ctx.controller.create(machine)?;
    let started = ctx.controller.start(created.id.as_str()).await?;

    println!("{} started ({})", started.spec.name, started.spec.id.short());

    if !cli_args.detach && cli_args.output == crate::output::OutputFormat::Text {
        for _ in 0..50 {
            if started.spec.log_file.exists() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        output::tail_file(&started.spec.log_file).await?;
    }
    Ok(())
}

fn derive_name(target: &str) -> String {
    let base = std::path::Path::new(target)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("machine");
    let sanitized: String =
        base.chars().map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' }).collect();
    format!("{sanitized}-{}", &uk_core::MachineId::new().short()[..6])
}

fn parse_envs(entries: &[String]) -> Result<Vec<EnvVar>, ExitError> {
    entries.iter().map(|s| EnvVar::parse(s).map_err(ExitError::from)).collect()
}

fn parse_networks(entries: &[String]) -> Vec<NetworkAttachment> {
    entries.iter().map(|driver| NetworkAttachment { driver: driver.clone(), interfaces: Vec::new() }).collect()
}

fn parse_ports(entries: &[String]) -> Result<Vec<PortMapping>, ExitError> {
    entries.iter().map(|s| parse_port(s)).collect()
}

fn parse_port(s: &str) -> Result<PortMapping, ExitError> {
    let (ports, protocol) = match s.split_once('/') {
        Some((p, "udp")) => (p, PortProtocol::Udp),
        Some((p, "tcp")) => (p, PortProtocol::Tcp),
        Some((p, other)) => {
            return Err(ExitError::usage(format!("unknown port protocol {other:?} in {s:?}")))
        }
        None => (s, PortProtocol::Tcp),
    };
    let (host, guest) = ports
        .split_once(':')
        .ok_or_else(|| ExitError::usage(format!("invalid port mapping {s:?}, expected host:guest")))?;
    let host_port: u16 =
        host.parse().map_err(|_| ExitError::usage(format!("invalid host port in {s:?}")))?;
    let guest_port: u16 =
        guest.parse().map_err(|_| ExitError::usage(format!("invalid guest port in {s:?}")))?;
    Ok(PortMapping { host_port, guest_port, protocol })
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_name_sanitizes_and_suffixes() {
        let name = derive_name("/tmp/hello world.elf");
        assert!(name.starts_with("hello-world-"));
    }

    #[test]
    fn parse_port_defaults_to_tcp() {
        let p = parse_port("8080:80").unwrap();
        assert_eq!(p.host_port, 8080);
        assert_eq!(p.guest_port, 80);
        assert_eq!(p.protocol, PortProtocol::Tcp);
    }

    #[test]
    fn parse_port_rejects_missing_colon() {
        assert!(parse_port("8080").is_err());
    }

    #[test]
    fn parse_port_accepts_udp_suffix() {
        let p = parse_port("53:53/udp").unwrap();
        assert_eq!(p.protocol, PortProtocol::Udp);
    }
}

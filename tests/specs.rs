// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level end-to-end scenarios (spec §8), driven against the
//! built `uk` binary with an isolated `UK_STATE_DIR` per test.

use std::process::Command;

use assert_cmd::cargo::CommandCargoExt;
use serial_test::serial;
use tempfile::TempDir;

fn uk(state_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("uk").expect("uk binary is built by the workspace");
    cmd.env("UK_STATE_DIR", state_dir.path());
    cmd.env("UK_NO_PROMPT", "1");
    cmd
}

#[test]
#[serial]
fn help_shows_usage() {
    let state_dir = TempDir::new().unwrap();
    let output = uk(&state_dir).arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
}

#[test]
#[serial]
fn ps_on_empty_store_reports_no_machines() {
    let state_dir = TempDir::new().unwrap();
    let output = uk(&state_dir).arg("ps").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No machines found"));
}

#[test]
#[serial]
fn pkg_list_on_empty_catalog_reports_no_packages() {
    let state_dir = TempDir::new().unwrap();
    let output = uk(&state_dir).args(["pkg", "list"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No packages found"));
}

/// Scenario 4 (spec §8): with no machines in the store and
/// `--quit-together`, `events` exits 0 within one poll interval and its
/// PID file is removed.
#[test]
#[serial]
fn events_quit_together_exits_cleanly_on_empty_store() {
    let state_dir = TempDir::new().unwrap();
    let output =
        uk(&state_dir).args(["events", "--quit-together", "--poll-granularity", "50"]).output().unwrap();
    assert!(output.status.success());
    assert!(!state_dir.path().join("events.pid").exists());
}

/// Scenario 3 (spec §8, generalized to a non-ELF input): a target that
/// can't be dispatched to any runner fails with a non-zero, non-panicking
/// exit rather than creating a machine.
#[test]
#[serial]
fn run_on_unrunnable_target_fails_without_creating_a_machine() {
    let state_dir = TempDir::new().unwrap();
    let target = state_dir.path().join("not-a-kernel.txt");
    std::fs::write(&target, b"not an ELF file").unwrap();

    let output = uk(&state_dir).args(["run", "--plat", "qemu", "--arch", "x86_64"]).arg(&target).output().unwrap();
    assert!(!output.status.success());

    let ps_output = uk(&state_dir).args(["ps", "--all"]).output().unwrap();
    assert!(String::from_utf8_lossy(&ps_output.stdout).contains("No machines found"));
}

/// Scenario 6 (spec §8): packing over an existing package with `abort`
/// returns a non-zero exit and leaves the existing artifact untouched.
#[test]
#[serial]
fn pkg_pack_abort_strategy_rejects_existing_package() {
    let state_dir = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    std::fs::write(project_dir.path().join("hello.elf"), b"\x7fELF-stub").unwrap();

    let first = uk(&state_dir)
        .current_dir(project_dir.path())
        .args([
            "pkg", "pack", "--name", "acme/nginx:latest", "--rootfs", "hello.elf", "--arch", "x86_64",
            "--plat", "qemu",
        ])
        .output()
        .unwrap();
    assert!(first.status.success());

    let second = uk(&state_dir)
        .current_dir(project_dir.path())
        .args([
            "pkg", "pack", "--name", "acme/nginx:latest", "--rootfs", "hello.elf", "--arch", "x86_64",
            "--plat", "qemu", "--strategy", "abort",
        ])
        .output()
        .unwrap();
    assert!(!second.status.success());

    let list_output = uk(&state_dir).args(["pkg", "list"]).output().unwrap();
    assert!(String::from_utf8_lossy(&list_output.stdout).contains("acme/nginx:latest"));
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning and signaling unikernel guest processes.
//!
//! Unlike a shell job, a guest process must outlive the CLI invocation
//! that started it: `spawn_detached` starts a new session (`setsid`) so
//! it isn't killed by a signal sent to the CLI's process group, redirects
//! stdout/stderr to the machine's console log, and never waits on the
//! child — once the CLI process exits the guest is reparented to init
//! and reaped normally on its own exit.

use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use crate::error::ShellError;

/// A platform-built argv ready to spawn, plus where its console output
/// should land.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
    pub console_log: PathBuf,
}

impl ProcessSpec {
    pub fn new(program: impl Into<PathBuf>, console_log: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
            console_log: console_log.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// Spawn `spec` detached from the calling process, returning its pid.
pub async fn spawn_detached(spec: &ProcessSpec) -> Result<u32, ShellError> {
    let spec = spec.clone();
    tokio::task::spawn_blocking(move || spawn_detached_blocking(&spec))
        .await
        .map_err(|e| ShellError::SpawnFailed {
            program: spec_program_lossy(&spec),
            source: std::io::Error::other(e),
        })?
}

fn spec_program_lossy(spec: &ProcessSpec) -> String {
    spec.program.display().to_string()
}

fn spawn_detached_blocking(spec: &ProcessSpec) -> Result<u32, ShellError> {
    let log = open_console_log(&spec.console_log)?;
    let log_err = log.try_clone()?;

    let mut cmd = std::process::Command::new(&spec.program);
    cmd.args(&spec.args);
    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }
    for (k, v) in &spec.envs {
        cmd.env(k, v);
    }
    cmd.stdin(std::process::Stdio::null());
    cmd.stdout(std::process::Stdio::from(log));
    cmd.stderr(std::process::Stdio::from(log_err));

    // SAFETY: setsid() is async-signal-safe and the only thing this hook
    // does between fork and exec.
    unsafe {
        cmd.pre_exec(|| {
            nix::unistd::setsid().map_err(std::io::Error::from).map(|_| ())
        });
    }

    tracing::info!(program = %spec.program.display(), args = ?spec.args, "spawning guest process");
    let child = cmd.spawn().map_err(|source| ShellError::SpawnFailed {
        program: spec.program.display().to_string(),
        source,
    })?;
    Ok(child.id())
}

fn open_console_log(path: &Path) -> Result<std::fs::File, std::io::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

/// `true` if a process with `pid` exists and is reachable (`kill(pid, 0)`).
pub fn is_alive(pid: u32) -> bool {
    signal::kill(Pid::from_raw(pid as i32), None).is_ok()
}

/// Send `sig` to `pid`. Succeeds silently (returns `Ok`) if the process is
/// already gone (`ESRCH`), matching idempotent-stop semantics.
pub fn send_signal(pid: u32, sig: Signal) -> Result<(), ShellError> {
    match signal::kill(Pid::from_raw(pid as i32), sig) {
        Ok(()) => Ok(()),
        Err(nix::errno::Errno::ESRCH) => Ok(()),
        Err(source) => Err(ShellError::SignalFailed { pid, source }),
    }
}

/// Request a graceful shutdown (`SIGTERM`).
pub fn terminate(pid: u32) -> Result<(), ShellError> {
    send_signal(pid, Signal::SIGTERM)
}

/// Force-kill (`SIGKILL`).
pub fn kill(pid: u32) -> Result<(), ShellError> {
    send_signal(pid, Signal::SIGKILL)
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Concurrent Progress Engine (spec §4.7): runs a declared tree of
//! [`Unit`]s with structured concurrency, per-unit ring-buffer log
//! capture, fail-fast cancellation, and per-unit timeouts.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::UnitContext;
use crate::error::ProgressError;
use crate::mode::Mode;
use crate::ring_buffer::{RingBuffer, DEFAULT_CAPACITY};
use crate::status::{StatusBoard, UnitStatus};
use crate::unit::Unit;

/// Completed execution record for one unit, including its subtree.
#[derive(Debug, Clone)]
pub struct UnitReport {
    pub name: String,
    pub status: UnitStatus,
    pub logs: Vec<String>,
    pub children: Vec<UnitReport>,
}

/// Outcome of a full [`Engine::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    pub units: Vec<UnitReport>,
    pub first_error: Option<ProgressError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.first_error.is_none()
    }
}

pub struct Engine {
    mode: Mode,
    fail_fast: bool,
    ring_capacity: usize,
    status: StatusBoard,
}

impl Engine {
    pub fn new(mode: Mode, fail_fast: bool) -> Self {
        Self { mode, fail_fast, ring_capacity: DEFAULT_CAPACITY, status: StatusBoard::new() }
    }

    pub fn with_ring_capacity(mut self, capacity: usize) -> Self {
        self.ring_capacity = capacity;
        self
    }

    /// Live status board, readable by a progress reporter while `run` is
    /// still in flight.
    pub fn status(&self) -> StatusBoard {
        self.status.clone()
    }

    pub async fn run(&self, units: Vec<Unit>, cancel: CancellationToken) -> RunReport {
        let (units, first_error) =
            run_children(units, self.mode, self.fail_fast, self.ring_capacity, &self.status, cancel).await;
        RunReport { units, first_error }
    }
}

fn run_unit(
    unit: Unit,
    fail_fast: bool,
    ring_capacity: usize,
    status: StatusBoard,
    cancel: CancellationToken,
) -> crate::unit::BoxFuture<'static, (UnitReport, Option<ProgressError>)> {
    Box::pin(async move {
        status.set(&unit.name, UnitStatus::Pending);

        if cancel.is_cancelled() {
            status.set(&unit.name, UnitStatus::Failed);
            return (
                UnitReport { name: unit.name, status: UnitStatus::Failed, logs: Vec::new(), children: Vec::new() },
                Some(ProgressError::Cancelled),
            );
        }

        let ring = Arc::new(Mutex::new(RingBuffer::new(ring_capacity)));

        let (child_reports, child_error) = if unit.children.is_empty() {
            (Vec::new(), None)
        } else {
            run_children(
                unit.children,
                unit.children_mode,
                fail_fast,
                ring_capacity,
                &status,
                cancel.clone(),
            )
            .await
        };

        if let Some(err) = child_error {
            status.set(&unit.name, UnitStatus::Failed);
            return (
                UnitReport {
                    name: unit.name,
                    status: UnitStatus::Failed,
                    logs: ring.lock().lines(),
                    children: child_reports,
                },
                Some(err),
            );
        }

        if cancel.is_cancelled() {
            status.set(&unit.name, UnitStatus::Failed);
            return (
                UnitReport {
                    name: unit.name,
                    status: UnitStatus::Failed,
                    logs: ring.lock().lines(),
                    children: child_reports,
                },
                Some(ProgressError::Cancelled),
            );
        }

        status.set(&unit.name, UnitStatus::Running);
        let ctx = UnitContext::new(unit.name.clone(), ring.clone(), cancel.clone());
        let progress: crate::context::ProgressFn = Arc::new(|_fraction: f32| {});
        let work_fut = (unit.work)(ctx, progress);

        let result = match unit.timeout {
            Some(duration) => {
                tokio::select! {
                    _ = cancel.cancelled() => Err(ProgressError::Cancelled),
                    outcome = tokio::time::timeout(duration, work_fut) => match outcome {
                        Ok(inner) => inner,
                        Err(_elapsed) => Err(ProgressError::Timeout),
                    },
                }
            }
            None => {
                tokio::select! {
                    _ = cancel.cancelled() => Err(ProgressError::Cancelled),
                    outcome = work_fut => outcome,
                }
            }
        };

        let status_value = if result.is_ok() { UnitStatus::Success } else { UnitStatus::Failed };
        status.set(&unit.name, status_value);
        let err = result.err();

        (
            UnitReport { name: unit.name, status: status_value, logs: ring.lock().lines(), children: child_reports },
            err,
        )
    })
}

fn run_children(
    children: Vec<Unit>,
    mode: Mode,
    fail_fast: bool,
    ring_capacity: usize,
    status: &StatusBoard,
    cancel: CancellationToken,
) -> crate::unit::BoxFuture<'static, (Vec<UnitReport>, Option<ProgressError>)> {
    let status = status.clone();
    Box::pin(async move {
        match mode {
            Mode::Sequential => {
                let mut reports = Vec::new();
                let mut first_error = None;
                for child in children {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let (report, err) =
                        run_unit(child, fail_fast, ring_capacity, status.clone(), cancel.clone()).await;
                    let failed = report.status == UnitStatus::Failed;
                    reports.push(report);
                    if failed {
                        if first_error.is_none() {
                            first_error = err;
                        }
                        if fail_fast {
                            cancel.cancel();
                        }
                        break;
                    }
                }
                (reports, first_error)
            }
            Mode::Parallel => {
                let child_cancel = cancel.child_token();
                let mut set = JoinSet::new();
                for child in children {
                    let cancel = child_cancel.clone();
                    let status = status.clone();
                    set.spawn(run_unit(child, fail_fast, ring_capacity, status, cancel));
                }

                let mut reports = Vec::new();
                let mut first_error = None;
                while let Some(joined) = set.join_next().await {
                    match joined {
                        Ok((report, err)) => {
                            if report.status == UnitStatus::Failed {
                                if first_error.is_none() {
                                    first_error = err;
                                }
                                if fail_fast {
                                    child_cancel.cancel();
                                }
                            }
                            reports.push(report);
                        }
                        Err(join_err) => {
                            tracing::error!(error = %join_err, "progress unit task panicked");
                        }
                    }
                }
                (reports, first_error)
            }
        }
    })
}

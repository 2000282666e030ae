// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-unit execution context handed to a unit's `work` closure: log
//! capture and cancellation observation. The ring buffer is the "writer
//! the engine owns" (spec §4.7); routing a unit's log lines through it
//! (rather than the process-wide subscriber) means the surrounding
//! application's logger is never touched, so there is nothing to restore.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::ring_buffer::RingBuffer;

/// Callback a unit calls to report a fractional progress update (spec
/// §4.7 ParaProgress view); `0.0..=1.0`.
pub type ProgressFn = Arc<dyn Fn(f32) + Send + Sync>;

#[derive(Clone)]
pub struct UnitContext {
    name: String,
    ring: Arc<Mutex<RingBuffer>>,
    cancel: CancellationToken,
}

impl UnitContext {
    pub(crate) fn new(name: String, ring: Arc<Mutex<RingBuffer>>, cancel: CancellationToken) -> Self {
        Self { name, ring, cancel }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a log line to this unit's ring buffer and forward it
    /// through the normal tracing pipeline, tagged with the unit's name.
    pub fn log(&self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(unit = %self.name, "{}", line);
        self.ring.lock().push(line);
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_lines_land_in_the_ring_buffer() {
        let ring = Arc::new(Mutex::new(RingBuffer::new(5)));
        let ctx = UnitContext::new("build".into(), ring.clone(), CancellationToken::new());
        ctx.log("compiling");
        assert_eq!(ring.lock().lines(), vec!["compiling"]);
    }
}

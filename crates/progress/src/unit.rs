// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declared unit of work (spec §4.7): a name, async work closure, optional
//! timeout, and child units (empty for a flat ParaProgress list, populated
//! for a ProcessTree).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::context::{ProgressFn, UnitContext};
use crate::error::ProgressError;
use crate::mode::Mode;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type WorkFn = Arc<
    dyn Fn(UnitContext, ProgressFn) -> BoxFuture<'static, Result<(), ProgressError>> + Send + Sync,
>;

pub struct Unit {
    pub(crate) name: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) work: WorkFn,
    pub(crate) children: Vec<Unit>,
    pub(crate) children_mode: Mode,
}

impl Unit {
    pub fn new<F, Fut>(name: impl Into<String>, work: F) -> Self
    where
        F: Fn(UnitContext, ProgressFn) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ProgressError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            timeout: None,
            work: Arc::new(move |ctx, progress| Box::pin(work(ctx, progress))),
            children: Vec::new(),
            children_mode: Mode::Parallel,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_children(mut self, mode: Mode, children: Vec<Unit>) -> Self {
        self.children_mode = mode;
        self.children = children;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_unit_has_no_timeout_and_no_children() {
        let unit = Unit::new("leaf", |_ctx, _progress| async { Ok(()) });
        assert!(unit.timeout.is_none());
        assert!(unit.children.is_empty());
    }

    #[test]
    fn with_children_attaches_a_mode_and_subtree() {
        let child = Unit::new("child", |_ctx, _progress| async { Ok(()) });
        let parent = Unit::new("parent", |_ctx, _progress| async { Ok(()) })
            .with_children(Mode::Sequential, vec![child]);
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children_mode, Mode::Sequential);
    }
}

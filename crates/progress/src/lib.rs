// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! uk-progress: the Concurrent Progress Engine (spec §4.7). A single
//! abstraction serves both the hierarchical ProcessTree view (a unit's
//! children all complete before the unit itself runs) and the flat
//! ParaProgress view (no children, just a list run in one mode).

pub mod context;
pub mod engine;
pub mod error;
pub mod mode;
pub mod ring_buffer;
pub mod status;
pub mod unit;

pub use context::{ProgressFn, UnitContext};
pub use engine::{Engine, RunReport, UnitReport};
pub use error::ProgressError;
pub use mode::Mode;
pub use ring_buffer::RingBuffer;
pub use status::{derive_display_status, DisplayStatus, StatusBoard, UnitStatus};
pub use unit::Unit;

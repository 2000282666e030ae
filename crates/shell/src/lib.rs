// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! uk-shell: subprocess spawning and signaling primitives for guest
//! processes (spec §4.3, §4.5).

pub mod error;
pub mod process;

pub use error::ShellError;
pub use process::{is_alive, kill, send_signal, spawn_detached, terminate, ProcessSpec};
pub use nix::sys::signal::Signal;

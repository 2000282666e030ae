// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! uk-core: shared data model for the unikraft-toolkit CLI core.

pub mod macros;

pub mod clock;
pub mod elf;
pub mod error;
pub mod id;
pub mod name;
pub mod spec;
pub mod state;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{CoreError, ExitCode};
pub use id::{IdParseError, MachineId, ID_FULL_LEN, ID_SHORT_LEN};
pub use name::MachineName;
pub use spec::{
    Architecture, EnvVar, KernelSource, MachineSpec, NetworkAttachment, PortMapping,
    PortProtocol, DEFAULT_MEM_MIB, DEFAULT_VCPUS,
};
pub use spec::Platform;
pub use state::MachineState;

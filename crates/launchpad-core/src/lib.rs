// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Launchpad — Core types, launch protocol, and error definitions shared
// across all crates.

pub mod config;
pub mod error;
pub mod notices;
pub mod protocol;
pub mod types;

pub use config::LaunchpadConfig;
pub use error::LaunchpadError;
pub use protocol::{LaunchIntent, LaunchPlan, LaunchRequest};
pub use types::*;

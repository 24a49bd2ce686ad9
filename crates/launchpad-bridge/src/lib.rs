// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Launchpad — native platform bridge.
//!
//! Defines the traits the shell uses to reach the native sample runtime and
//! the handful of platform services around it (storage directories, screen
//! orientation, activity launch, permissions, notices), plus the per-target
//! implementations.

pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

/// Returns the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: the runtime's native methods live on the hosting activity.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // Desktop/CI: no sample runtime, so the shell degrades to an empty picker.
        Box::new(stub::StubBridge)
    }
}

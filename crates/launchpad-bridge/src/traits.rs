// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use std::path::{Path, PathBuf};

use launchpad_core::error::Result;
use launchpad_core::notices::Notice;
use launchpad_core::types::{Orientation, PermissionStatus, Sample, StoragePermission};

/// Unified bridge that groups every native capability the shell needs.
pub trait PlatformBridge:
    NativeSampleRuntime + NativeStorage + NativeDisplay + NativeActivity + NativePermissions + NativeNotify
{
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// The process-wide native library that owns the samples.
///
/// Calls are synchronous and short: they register state with the runtime,
/// they never run a workload.
pub trait NativeSampleRuntime {
    /// Load the runtime library. Called once per process.
    fn load_runtime(&self, library: &str) -> Result<()>;

    /// Every sample the runtime currently knows about, in runtime order.
    fn enumerate_samples(&self) -> Result<Vec<Sample>>;

    /// Register the command line for the next launch.
    fn dispatch_arguments(&self, args: &[String]) -> Result<()>;

    /// Tell the runtime where to persist outputs and stage temporary files.
    fn init_storage_paths(&self, durable: &Path, temp: &Path) -> Result<()>;
}

/// Application storage directories.
pub trait NativeStorage {
    /// Durable, app-private external storage. `None` if the platform has none.
    fn external_files_dir(&self) -> Result<Option<PathBuf>>;

    /// Volatile cache directory. `None` if the platform has none.
    fn cache_dir(&self) -> Result<Option<PathBuf>>;
}

/// Screen configuration.
pub trait NativeDisplay {
    fn request_orientation(&self, orientation: Orientation) -> Result<()>;
}

/// Starting the activity that hosts sample execution.
pub trait NativeActivity {
    /// Start the activity named by its JNI class path.
    fn start_native_activity(&self, class: &str) -> Result<()>;
}

/// Runtime permission checks for storage access.
pub trait NativePermissions {
    fn check_permission(&self, permission: StoragePermission) -> Result<PermissionStatus>;

    /// Ask the user for `permission`. The answer arrives later through the
    /// host's permission-result callback.
    fn request_permission(&self, permission: StoragePermission) -> Result<()>;
}

/// Transient user notifications (toasts).
pub trait NativeNotify {
    fn show_notice(&self, notice: &Notice) -> Result<()>;
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where no native sample runtime exists.
//
// The runtime never loads, so the shell shows an empty picker. Storage
// directories follow XDG conventions, permissions are always granted, and
// notices go to the log.

use std::path::{Path, PathBuf};

use launchpad_core::error::{LaunchpadError, Result};
use launchpad_core::notices::Notice;
use launchpad_core::types::{Orientation, PermissionStatus, Sample, StoragePermission};

use crate::traits::*;

/// No-op bridge returned on non-Android platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeSampleRuntime for StubBridge {
    fn load_runtime(&self, library: &str) -> Result<()> {
        tracing::warn!(library, "NativeSampleRuntime::load_runtime called on stub bridge");
        Err(LaunchpadError::RuntimeLoad {
            library: library.to_owned(),
            reason: "no native sample runtime on this platform".into(),
        })
    }

    fn enumerate_samples(&self) -> Result<Vec<Sample>> {
        Err(LaunchpadError::PlatformUnavailable)
    }

    fn dispatch_arguments(&self, _args: &[String]) -> Result<()> {
        tracing::warn!("NativeSampleRuntime::dispatch_arguments called on stub bridge");
        Err(LaunchpadError::PlatformUnavailable)
    }

    fn init_storage_paths(&self, _durable: &Path, _temp: &Path) -> Result<()> {
        Err(LaunchpadError::PlatformUnavailable)
    }
}

impl NativeStorage for StubBridge {
    fn external_files_dir(&self) -> Result<Option<PathBuf>> {
        Ok(xdg_data_home().map(|base| base.join("launchpad")))
    }

    fn cache_dir(&self) -> Result<Option<PathBuf>> {
        Ok(Some(std::env::temp_dir().join("launchpad")))
    }
}

impl NativeDisplay for StubBridge {
    fn request_orientation(&self, orientation: Orientation) -> Result<()> {
        tracing::debug!(?orientation, "orientation request ignored on desktop");
        Ok(())
    }
}

impl NativeActivity for StubBridge {
    fn start_native_activity(&self, _class: &str) -> Result<()> {
        Err(LaunchpadError::PlatformUnavailable)
    }
}

impl NativePermissions for StubBridge {
    fn check_permission(&self, _permission: StoragePermission) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    fn request_permission(&self, _permission: StoragePermission) -> Result<()> {
        Ok(())
    }
}

impl NativeNotify for StubBridge {
    fn show_notice(&self, notice: &Notice) -> Result<()> {
        tracing::warn!(message = %notice.message, "notice");
        Ok(())
    }
}

fn xdg_data_home() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg));
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("share"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_never_loads() {
        let err = StubBridge.load_runtime("vulkan_best_practice").expect_err("stub");
        assert!(matches!(err, LaunchpadError::RuntimeLoad { .. }));
    }

    #[test]
    fn permissions_are_granted() {
        for perm in StoragePermission::check_order() {
            assert_eq!(
                StubBridge.check_permission(*perm).expect("check"),
                PermissionStatus::Granted
            );
        }
    }

    #[test]
    fn cache_dir_is_under_temp() {
        let dir = StubBridge.cache_dir().expect("cache").expect("some");
        assert!(dir.starts_with(std::env::temp_dir()));
    }
}

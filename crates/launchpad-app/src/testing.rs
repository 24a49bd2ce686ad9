// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording bridge for shell tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use launchpad_bridge::traits::*;
use launchpad_core::error::{LaunchpadError, Result};
use launchpad_core::notices::Notice;
use launchpad_core::types::{Orientation, PermissionStatus, Sample, StoragePermission};

/// One call made through the bridge, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load(String),
    Enumerate,
    Dispatch(Vec<String>),
    InitStorage { durable: PathBuf, temp: PathBuf },
    Orientation(Orientation),
    StartActivity(String),
    RequestPermission(StoragePermission),
    Notice(String),
}

pub struct FakeBridge {
    /// `None` makes `load_runtime` fail.
    samples: Option<Vec<Sample>>,
    denied: Vec<StoragePermission>,
    cache_dir: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeBridge {
    pub fn with_samples(samples: Vec<Sample>) -> Self {
        Self {
            samples: Some(samples),
            denied: Vec::new(),
            cache_dir: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_runtime() -> Self {
        Self {
            samples: None,
            ..Self::with_samples(Vec::new())
        }
    }

    pub fn deny(mut self, permission: StoragePermission) -> Self {
        self.denied.push(permission);
        self
    }

    pub fn without_cache_dir(mut self) -> Self {
        self.cache_dir = false;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn dispatched(&self) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Dispatch(args) => Some(args.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Notice(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl PlatformBridge for FakeBridge {
    fn platform_name(&self) -> &str {
        "Fake"
    }
}

impl NativeSampleRuntime for FakeBridge {
    fn load_runtime(&self, library: &str) -> Result<()> {
        self.record(Call::Load(library.to_owned()));
        match self.samples {
            Some(_) => Ok(()),
            None => Err(LaunchpadError::RuntimeLoad {
                library: library.to_owned(),
                reason: "UnsatisfiedLinkError".into(),
            }),
        }
    }

    fn enumerate_samples(&self) -> Result<Vec<Sample>> {
        self.record(Call::Enumerate);
        self.samples.clone().ok_or(LaunchpadError::RuntimeUnavailable)
    }

    fn dispatch_arguments(&self, args: &[String]) -> Result<()> {
        self.record(Call::Dispatch(args.to_vec()));
        Ok(())
    }

    fn init_storage_paths(&self, durable: &Path, temp: &Path) -> Result<()> {
        self.record(Call::InitStorage {
            durable: durable.to_path_buf(),
            temp: temp.to_path_buf(),
        });
        Ok(())
    }
}

impl NativeStorage for FakeBridge {
    fn external_files_dir(&self) -> Result<Option<PathBuf>> {
        Ok(Some(PathBuf::from("/sdcard/Android/data/launchpad/files")))
    }

    fn cache_dir(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .cache_dir
            .then(|| PathBuf::from("/data/data/launchpad/cache")))
    }
}

impl NativeDisplay for FakeBridge {
    fn request_orientation(&self, orientation: Orientation) -> Result<()> {
        self.record(Call::Orientation(orientation));
        Ok(())
    }
}

impl NativeActivity for FakeBridge {
    fn start_native_activity(&self, class: &str) -> Result<()> {
        self.record(Call::StartActivity(class.to_owned()));
        Ok(())
    }
}

impl NativePermissions for FakeBridge {
    fn check_permission(&self, permission: StoragePermission) -> Result<PermissionStatus> {
        Ok(if self.denied.contains(&permission) {
            PermissionStatus::Denied
        } else {
            PermissionStatus::Granted
        })
    }

    fn request_permission(&self, permission: StoragePermission) -> Result<()> {
        self.record(Call::RequestPermission(permission));
        Ok(())
    }
}

impl NativeNotify for FakeBridge {
    fn show_notice(&self, notice: &Notice) -> Result<()> {
        self.record(Call::Notice(notice.message.clone()));
        Ok(())
    }
}

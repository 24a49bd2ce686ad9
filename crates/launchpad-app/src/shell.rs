// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sample shell: the activity logic as an explicit event handler.
//
// Each public method corresponds to one host callback (create, item click,
// menu action, permission result). Every launch builds a fresh
// `LaunchRequest` from the trigger and the current mode; nothing is
// buffered between launches.
//
// No launch is dispatched while storage permission is outstanding. An
// external trigger that arrives early is held and fires once permission is
// granted.

use std::path::PathBuf;

use launchpad_bridge::traits::PlatformBridge;
use launchpad_core::error::{LaunchpadError, Result};
use launchpad_core::notices::notice_for;
use launchpad_core::protocol::{self, LaunchMode, LaunchPlan, LaunchRequest, Trigger};
use launchpad_core::types::{
    IntentExtras, Orientation, PermissionStatus, SampleCatalog, StoragePermission,
};
use launchpad_core::LaunchpadConfig;
use tracing::{debug, info, warn};

use crate::view::PickerView;

/// Native runtime lifecycle as seen by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeState {
    /// `create` has not run yet.
    Unloaded,
    /// The library failed to load; every launch is refused.
    Failed,
    /// Loaded. `storage` is set once paths have been handed to the runtime.
    Loaded { storage: Option<StoragePaths> },
}

/// Directories handed to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub durable: PathBuf,
    pub temp: PathBuf,
}

/// Where the storage permission flow stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Unchecked,
    Requested(StoragePermission),
    Granted,
    Denied,
}

pub struct SampleShell<B: PlatformBridge + ?Sized> {
    bridge: Box<B>,
    config: LaunchpadConfig,
    runtime: RuntimeState,
    permission: PermissionState,
    view: PickerView,
    benchmark: bool,
    pending: Option<Trigger>,
}

impl<B: PlatformBridge + ?Sized> SampleShell<B> {
    pub fn new(bridge: Box<B>, config: LaunchpadConfig) -> Self {
        let config = config.sanitized();
        let benchmark = config.benchmark_on_start;
        Self {
            bridge,
            config,
            runtime: RuntimeState::Unloaded,
            permission: PermissionState::Unchecked,
            view: PickerView::new(),
            benchmark,
            pending: None,
        }
    }

    // -- Accessors -----------------------------------------------------------

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn view(&self) -> &PickerView {
        &self.view
    }

    pub fn runtime(&self) -> &RuntimeState {
        &self.runtime
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn benchmark_enabled(&self) -> bool {
        self.benchmark
    }

    pub fn pending_trigger(&self) -> Option<&Trigger> {
        self.pending.as_ref()
    }

    fn mode(&self) -> LaunchMode {
        if self.benchmark {
            LaunchMode::benchmark(self.config.benchmark_iterations)
        } else {
            LaunchMode::standard()
        }
    }

    // -- Lifecycle -----------------------------------------------------------

    /// Host `onCreate`: load the runtime, build the picker, check
    /// permissions, then act on any launch extras.
    ///
    /// Returns the request dispatched for the extras, if one was.
    pub fn create(&mut self, extras: IntentExtras) -> Result<Option<LaunchRequest>> {
        info!(platform = self.bridge.platform_name(), "sample shell starting");

        let catalog = match self.bridge.load_runtime(&self.config.native_library) {
            Ok(()) => {
                self.runtime = RuntimeState::Loaded { storage: None };
                let samples = self.bridge.enumerate_samples().unwrap_or_else(|e| {
                    warn!(error = %e, "sample enumeration failed");
                    Vec::new()
                });
                self.init_storage();
                SampleCatalog::categorize(samples)
            }
            Err(e) => {
                warn!(error = %e, "native runtime unavailable; picker will be empty");
                self.runtime = RuntimeState::Failed;
                self.notify(&e);
                SampleCatalog::default()
            }
        };
        info!(
            samples = catalog.sample_count(),
            tabs = catalog.tabs().len(),
            "sample catalog ready"
        );
        self.view.set_catalog(catalog);

        self.check_permissions()?;

        if extras.is_empty() {
            return Ok(None);
        }
        self.handle(Trigger::External(extras))
    }

    /// Hand storage paths to the runtime, once. Skipped when either
    /// directory is unavailable.
    fn init_storage(&mut self) {
        let durable = self.bridge.external_files_dir().unwrap_or_else(|e| {
            warn!(error = %e, "external files directory lookup failed");
            None
        });
        let temp = self.bridge.cache_dir().unwrap_or_else(|e| {
            warn!(error = %e, "cache directory lookup failed");
            None
        });

        let (Some(durable), Some(temp)) = (durable, temp) else {
            warn!("storage directories unavailable; runtime keeps its defaults");
            return;
        };

        match self.bridge.init_storage_paths(&durable, &temp) {
            Ok(()) => {
                self.runtime = RuntimeState::Loaded {
                    storage: Some(StoragePaths { durable, temp }),
                };
            }
            Err(e) => warn!(error = %e, "runtime rejected storage paths"),
        }
    }

    // -- Permissions ---------------------------------------------------------

    /// Check WRITE then READ storage permission; request the first one
    /// missing, or show the picker when both are held.
    ///
    /// Also backs the permission prompt's retry button.
    pub fn check_permissions(&mut self) -> Result<Option<LaunchRequest>> {
        for permission in StoragePermission::check_order() {
            if self.bridge.check_permission(*permission)? == PermissionStatus::Denied {
                debug!(?permission, "requesting storage permission");
                self.bridge.request_permission(*permission)?;
                self.permission = PermissionState::Requested(*permission);
                return Ok(None);
            }
        }
        self.grant()
    }

    /// Host `onRequestPermissionsResult`.
    ///
    /// An empty result (the request was cancelled) counts as a denial.
    /// Results for request codes the shell never issued are ignored.
    pub fn permissions_result(
        &mut self,
        request_code: i32,
        grants: &[PermissionStatus],
    ) -> Result<Option<LaunchRequest>> {
        let Some(permission) = StoragePermission::from_request_code(request_code) else {
            debug!(request_code, "ignoring unrelated permission result");
            return Ok(None);
        };

        match grants.first() {
            Some(PermissionStatus::Granted) => {
                info!(?permission, "storage permission granted");
                self.grant()
            }
            Some(PermissionStatus::Denied) | None => {
                warn!(?permission, "storage permission denied");
                self.permission = PermissionState::Denied;
                self.view.show_permission_prompt();
                Ok(None)
            }
        }
    }

    fn grant(&mut self) -> Result<Option<LaunchRequest>> {
        self.permission = PermissionState::Granted;
        self.view.show_samples();
        match self.pending.take() {
            Some(trigger) => {
                debug!(?trigger, "dispatching held trigger");
                self.handle(trigger)
            }
            None => Ok(None),
        }
    }

    // -- User actions --------------------------------------------------------

    /// A sample was tapped in the picker.
    pub fn select_sample(&mut self, id: &str) -> Result<Option<LaunchRequest>> {
        if self.view.catalog().find(id).is_none() {
            let err = LaunchpadError::UnknownSample(id.to_owned());
            self.notify(&err);
            return Err(err);
        }
        self.handle(Trigger::ItemSelected(id.to_owned()))
    }

    /// "Run samples" menu action: batch over the tab in front, or every
    /// sample when there are no tabs.
    pub fn run_samples(&mut self) -> Result<Option<LaunchRequest>> {
        let current_category = self.view.current_category().map(str::to_owned);
        self.handle(Trigger::RunSamples { current_category })
    }

    /// Batch run over an explicit category (empty runs every sample).
    pub fn run_batch(&mut self, category: &str) -> Result<Option<LaunchRequest>> {
        self.handle(Trigger::RunSamples {
            current_category: Some(category.to_owned()),
        })
    }

    /// "Benchmark mode" menu toggle. Returns the new state.
    pub fn toggle_benchmark(&mut self) -> bool {
        self.benchmark = !self.benchmark;
        info!(enabled = self.benchmark, "benchmark mode toggled");
        self.benchmark
    }

    pub fn select_tab(&mut self, index: usize) -> Result<()> {
        self.view.select_tab(index)
    }

    /// An intent arrived while the shell was already running.
    pub fn new_intent(&mut self, extras: IntentExtras) -> Result<Option<LaunchRequest>> {
        if extras.is_empty() {
            return Ok(None);
        }
        self.handle(Trigger::External(extras))
    }

    // -- Dispatch ------------------------------------------------------------

    fn handle(&mut self, trigger: Trigger) -> Result<Option<LaunchRequest>> {
        let result = self.try_handle(trigger);
        if let Err(e) = &result {
            self.notify(e);
        }
        result
    }

    fn try_handle(&mut self, trigger: Trigger) -> Result<Option<LaunchRequest>> {
        // The load failure was already reported; extras cannot run without
        // the runtime, so they are dropped rather than reported again.
        if matches!(trigger, Trigger::External(_)) && self.runtime == RuntimeState::Failed {
            debug!(?trigger, "dropping external trigger, native runtime unavailable");
            return Ok(None);
        }

        if self.permission != PermissionState::Granted {
            if let Trigger::External(_) = trigger {
                // Newest first so it wins ties with the held one.
                let held = protocol::select_trigger([trigger].into_iter().chain(self.pending.take()));
                debug!(?held, "holding external trigger until permission is granted");
                self.pending = held;
                return Ok(None);
            }
            return Err(LaunchpadError::PermissionDenied);
        }

        match protocol::resolve(&trigger, self.mode())? {
            Some(plan) => self.launch(plan).map(Some),
            None => Ok(None),
        }
    }

    /// Prepare the platform, register the command line, start the native
    /// activity. Exactly one dispatch per call.
    fn launch(&mut self, plan: LaunchPlan) -> Result<LaunchRequest> {
        match &self.runtime {
            RuntimeState::Loaded { storage } => {
                if storage.is_none() && self.config.require_storage_paths {
                    return Err(LaunchpadError::StoragePathsMissing);
                }
            }
            RuntimeState::Unloaded | RuntimeState::Failed => {
                return Err(LaunchpadError::RuntimeUnavailable);
            }
        }

        if plan.orientation != Orientation::Unspecified {
            self.bridge.request_orientation(plan.orientation)?;
        }

        let request = plan.request;
        self.bridge.dispatch_arguments(&request.arguments())?;
        self.bridge
            .start_native_activity(&self.config.native_activity_class)?;

        info!(command = %request, "launch dispatched");
        Ok(request)
    }

    fn notify(&self, err: &LaunchpadError) {
        if let Err(e) = self.bridge.show_notice(&notice_for(err)) {
            warn!(error = %e, "failed to show notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeBridge};
    use launchpad_core::types::Sample;

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new("afbc", "performance"),
            Sample::new("render_passes", "performance"),
            Sample::new("surface_rotation", "advanced"),
        ]
    }

    fn shell(bridge: FakeBridge) -> SampleShell<FakeBridge> {
        SampleShell::new(Box::new(bridge), LaunchpadConfig::default())
    }

    fn started(extras: IntentExtras) -> SampleShell<FakeBridge> {
        let mut shell = shell(FakeBridge::with_samples(samples()));
        shell.create(extras).expect("create");
        shell
    }

    #[test]
    fn create_builds_tabs_and_configures_storage() {
        let shell = started(IntentExtras::default());
        assert_eq!(shell.bridge().calls()[0], Call::Load("vulkan_best_practice".into()));
        assert_eq!(shell.view().tabs().len(), 2);
        assert!(shell.view().visibility().picker);
        assert!(matches!(
            shell.runtime(),
            RuntimeState::Loaded { storage: Some(_) }
        ));
        assert_eq!(shell.bridge().count(|c| matches!(c, Call::InitStorage { .. })), 1);
        assert!(shell.bridge().dispatched().is_empty());
    }

    #[test]
    fn item_click_dispatches_exactly_its_tokens() {
        let mut shell = started(IntentExtras::default());
        shell.select_sample("afbc").expect("launch");
        shell.select_sample("surface_rotation").expect("launch");

        assert_eq!(
            shell.bridge().dispatched(),
            [
                vec!["--sample".to_owned(), "afbc".to_owned()],
                vec!["--sample".to_owned(), "surface_rotation".to_owned()],
            ]
        );
        assert_eq!(shell.bridge().count(|c| matches!(c, Call::StartActivity(_))), 2);
    }

    #[test]
    fn benchmark_mode_appends_pair_until_disabled() {
        let mut shell = started(IntentExtras::default());
        assert!(shell.toggle_benchmark());
        shell.select_sample("afbc").expect("launch");
        shell.run_samples().expect("batch");
        assert!(!shell.toggle_benchmark());
        shell.select_sample("afbc").expect("launch");

        let dispatched = shell.bridge().dispatched();
        assert_eq!(dispatched[0], ["--sample", "afbc", "--benchmark", "2000"]);
        assert_eq!(dispatched[1], ["--batch", "advanced", "--benchmark", "2000"]);
        assert_eq!(dispatched[2], ["--sample", "afbc"]);
    }

    #[test]
    fn run_samples_uses_current_tab() {
        let mut shell = started(IntentExtras::default());
        shell.select_tab(1).expect("tab");
        let request = shell.run_samples().expect("batch").expect("dispatched");
        assert_eq!(request.arguments(), ["--batch", "performance"]);
    }

    #[test]
    fn sample_extra_beats_test_extra() {
        let shell = started(IntentExtras {
            sample: Some("afbc".into()),
            test: Some("bonza".into()),
        });
        assert_eq!(shell.bridge().dispatched(), [vec!["--sample", "afbc"]]);
        assert_eq!(shell.bridge().count(|c| matches!(c, Call::Orientation(_))), 0);
    }

    #[test]
    fn test_extra_requests_landscape_before_dispatch() {
        let shell = started(IntentExtras {
            sample: None,
            test: Some("bonza".into()),
        });
        let calls = shell.bridge().calls();
        let orientation = calls
            .iter()
            .position(|c| *c == Call::Orientation(Orientation::Landscape))
            .expect("orientation requested");
        let dispatch = calls
            .iter()
            .position(|c| matches!(c, Call::Dispatch(_)))
            .expect("dispatched");
        assert!(orientation < dispatch);
        assert_eq!(shell.bridge().dispatched(), [vec!["--test", "bonza"]]);
    }

    #[test]
    fn load_failure_leaves_empty_picker() {
        let mut shell = shell(FakeBridge::failing_runtime());
        shell.create(IntentExtras::default()).expect("create");

        assert_eq!(shell.runtime(), &RuntimeState::Failed);
        assert!(shell.view().catalog().is_empty());
        assert_eq!(shell.bridge().count(|c| *c == Call::Enumerate), 0);
        assert_eq!(
            shell.bridge().notices(),
            ["Native code library failed to load."]
        );

        let err = shell.run_samples().expect_err("no runtime");
        assert!(matches!(err, LaunchpadError::RuntimeUnavailable));
        assert!(shell.bridge().dispatched().is_empty());
    }

    #[test]
    fn load_failure_reports_once_when_extras_present() {
        let mut shell = shell(FakeBridge::failing_runtime());
        let dispatched = shell
            .create(IntentExtras {
                sample: Some("afbc".into()),
                test: None,
            })
            .expect("create");
        assert!(dispatched.is_none());
        assert!(shell.pending_trigger().is_none());

        let later = shell
            .new_intent(IntentExtras {
                sample: None,
                test: Some("bonza".into()),
            })
            .expect("new intent");
        assert!(later.is_none());
        assert_eq!(shell.bridge().notices().len(), 1);
        assert!(shell.bridge().dispatched().is_empty());
    }

    #[test]
    fn denied_permission_hides_picker_and_blocks_dispatch() {
        let bridge = FakeBridge::with_samples(samples()).deny(StoragePermission::Write);
        let mut shell = shell(bridge);
        shell.create(IntentExtras::default()).expect("create");
        assert_eq!(
            shell.permission(),
            PermissionState::Requested(StoragePermission::Write)
        );
        assert_eq!(
            shell
                .bridge()
                .count(|c| *c == Call::RequestPermission(StoragePermission::Write)),
            1
        );

        shell
            .permissions_result(StoragePermission::Write.request_code(), &[PermissionStatus::Denied])
            .expect("result");
        assert!(!shell.view().visibility().picker);
        assert!(shell.view().visibility().permission_prompt);

        let err = shell.run_samples().expect_err("blocked");
        assert!(matches!(err, LaunchpadError::PermissionDenied));
        assert!(shell.bridge().dispatched().is_empty());

        shell
            .permissions_result(StoragePermission::Write.request_code(), &[PermissionStatus::Granted])
            .expect("result");
        assert!(shell.view().visibility().picker);
        assert!(!shell.view().visibility().permission_prompt);
        shell.select_sample("afbc").expect("launch");
        assert_eq!(shell.bridge().dispatched().len(), 1);
    }

    #[test]
    fn cancelled_permission_request_counts_as_denied() {
        let bridge = FakeBridge::with_samples(samples()).deny(StoragePermission::Read);
        let mut shell = shell(bridge);
        shell.create(IntentExtras::default()).expect("create");
        assert_eq!(
            shell.permission(),
            PermissionState::Requested(StoragePermission::Read)
        );
        shell
            .permissions_result(StoragePermission::Read.request_code(), &[])
            .expect("result");
        assert_eq!(shell.permission(), PermissionState::Denied);
        assert!(shell.view().visibility().permission_prompt);
    }

    #[test]
    fn held_extra_fires_once_on_grant() {
        let bridge = FakeBridge::with_samples(samples()).deny(StoragePermission::Write);
        let mut shell = shell(bridge);
        let dispatched = shell
            .create(IntentExtras {
                sample: None,
                test: Some("bonza".into()),
            })
            .expect("create");
        assert!(dispatched.is_none());
        assert!(shell.pending_trigger().is_some());
        assert!(shell.bridge().dispatched().is_empty());

        let request = shell
            .permissions_result(StoragePermission::Write.request_code(), &[PermissionStatus::Granted])
            .expect("result")
            .expect("held trigger dispatched");
        assert_eq!(request.arguments(), ["--test", "bonza"]);
        assert!(shell.pending_trigger().is_none());

        shell.check_permissions().expect("recheck");
        assert_eq!(shell.bridge().dispatched().len(), 1);
    }

    #[test]
    fn later_sample_extra_replaces_held_test_extra() {
        let bridge = FakeBridge::with_samples(samples()).deny(StoragePermission::Write);
        let mut shell = shell(bridge);
        shell
            .create(IntentExtras {
                sample: None,
                test: Some("bonza".into()),
            })
            .expect("create");
        shell
            .new_intent(IntentExtras {
                sample: Some("afbc".into()),
                test: None,
            })
            .expect("held");
        shell
            .new_intent(IntentExtras {
                sample: None,
                test: Some("other".into()),
            })
            .expect("held");

        shell
            .permissions_result(StoragePermission::Write.request_code(), &[PermissionStatus::Granted])
            .expect("result");
        assert_eq!(shell.bridge().dispatched(), [vec!["--sample", "afbc"]]);
    }

    #[test]
    fn missing_storage_proceeds_by_default() {
        let mut shell = shell(FakeBridge::with_samples(samples()).without_cache_dir());
        shell.create(IntentExtras::default()).expect("create");
        assert_eq!(shell.runtime(), &RuntimeState::Loaded { storage: None });
        assert_eq!(shell.bridge().count(|c| matches!(c, Call::InitStorage { .. })), 0);
        shell.select_sample("afbc").expect("launch");
        assert_eq!(shell.bridge().dispatched().len(), 1);
    }

    #[test]
    fn missing_storage_refused_in_strict_mode() {
        let config = LaunchpadConfig {
            require_storage_paths: true,
            ..LaunchpadConfig::default()
        };
        let bridge = FakeBridge::with_samples(samples()).without_cache_dir();
        let mut shell = SampleShell::new(Box::new(bridge), config);
        shell.create(IntentExtras::default()).expect("create");

        let err = shell.select_sample("afbc").expect_err("refused");
        assert!(matches!(err, LaunchpadError::StoragePathsMissing));
        assert!(shell.bridge().dispatched().is_empty());
        assert_eq!(shell.bridge().notices().len(), 1);
    }

    #[test]
    fn unknown_sample_is_not_dispatched() {
        let mut shell = started(IntentExtras::default());
        let err = shell.select_sample("missing").expect_err("unknown");
        assert!(matches!(err, LaunchpadError::UnknownSample(_)));
        assert!(shell.bridge().dispatched().is_empty());
    }

    #[test]
    fn benchmark_on_start_comes_from_config() {
        let config = LaunchpadConfig {
            benchmark_on_start: true,
            benchmark_iterations: 50,
            ..LaunchpadConfig::default()
        };
        let mut shell = SampleShell::new(Box::new(FakeBridge::with_samples(samples())), config);
        shell.create(IntentExtras::default()).expect("create");
        assert!(shell.benchmark_enabled());
        let request = shell.select_sample("afbc").expect("launch").expect("dispatched");
        assert_eq!(request.arguments(), ["--sample", "afbc", "--benchmark", "50"]);
    }

    #[test]
    fn activity_callback_sequence() {
        let bridge = FakeBridge::with_samples(samples()).deny(StoragePermission::Read);
        let mut shell = shell(bridge);
        let write = StoragePermission::Write.request_code();
        let read = StoragePermission::Read.request_code();

        shell.create(IntentExtras::default()).expect("onCreate");
        shell
            .permissions_result(read, &[PermissionStatus::Denied])
            .expect("denied");
        assert!(shell.view().visibility().permission_prompt);

        shell.check_permissions().expect("retry button");
        assert_eq!(
            shell.permission(),
            PermissionState::Requested(StoragePermission::Read)
        );
        shell
            .permissions_result(write, &[PermissionStatus::Granted, PermissionStatus::Granted])
            .expect("granted");
        assert!(shell.view().visibility().picker);

        shell.select_tab(1).expect("tab");
        assert!(shell.toggle_benchmark());
        shell.run_samples().expect("menu run");
        shell
            .new_intent(IntentExtras {
                sample: Some("surface_rotation".into()),
                test: None,
            })
            .expect("onNewIntent");

        assert_eq!(
            shell.bridge().dispatched(),
            [
                vec!["--batch", "performance", "--benchmark", "2000"],
                vec!["--sample", "surface_rotation", "--benchmark", "2000"],
            ]
        );
    }

    #[test]
    fn zero_iteration_config_still_dispatches_a_parseable_line() {
        let config = LaunchpadConfig {
            benchmark_on_start: true,
            benchmark_iterations: 0,
            ..LaunchpadConfig::default()
        };
        let mut shell = SampleShell::new(Box::new(FakeBridge::with_samples(samples())), config);
        shell.create(IntentExtras::default()).expect("create");
        shell.select_sample("afbc").expect("launch");

        let dispatched = shell.bridge().dispatched();
        assert_eq!(dispatched, [vec!["--sample", "afbc", "--benchmark", "2000"]]);
        let parsed = protocol::parse_arguments(dispatched[0].as_slice()).expect("runtime parses it");
        assert_eq!(parsed.benchmark(), Some(2000));
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JNI entry points called by the hosting sample activity.
//
// The activity (`com.arm.vulkan_best_practice.BPSampleActivity`) declares
// these as `native` methods and loads `liblaunchpad_app.so`:
//
//   void    nativeOnCreate(String sample, String test);
//   void    nativeOnNewIntent(String sample, String test);
//   void    nativeOnSampleSelected(String id);
//   void    nativeOnRunSamples();
//   boolean nativeOnToggleBenchmark();
//   void    nativeOnTabSelected(int index);
//   void    nativeOnRequestPermissionsResult(int requestCode, int[] grantResults);
//   void    nativeOnPermissionRetry();
//   boolean nativeIsPickerVisible();
//   void    nativeOnDestroy();
//
// The underscores in the package name are escaped as `_1` in the symbol
// names. All callbacks arrive on the UI thread; one shell lives between
// `nativeOnCreate` and `nativeOnDestroy`.

#![cfg(target_os = "android")]

use std::sync::{Mutex, PoisonError};

use jni::JNIEnv;
use jni::objects::{JIntArray, JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint};
use tracing::{debug, info, warn};

use launchpad_bridge::android::{self as host, AndroidBridge};
use launchpad_bridge::traits::NativeStorage;
use launchpad_core::error::Result;
use launchpad_core::protocol::LaunchRequest;
use launchpad_core::types::{IntentExtras, PermissionStatus};
use launchpad_core::LaunchpadConfig;

use crate::services::config_store;
use crate::shell::SampleShell;

static SHELL: Mutex<Option<SampleShell<AndroidBridge>>> = Mutex::new(None);

fn with_shell<R>(event: &str, f: impl FnOnce(&mut SampleShell<AndroidBridge>) -> R) -> Option<R> {
    let mut shell = SHELL.lock().unwrap_or_else(PoisonError::into_inner);
    match shell.as_mut() {
        Some(shell) => Some(f(shell)),
        None => {
            warn!(event, "no shell; nativeOnCreate has not run");
            None
        }
    }
}

fn log_outcome(event: &str, outcome: Option<Result<Option<LaunchRequest>>>) {
    match outcome {
        Some(Ok(Some(request))) => info!(event, command = %request, "launch dispatched"),
        Some(Ok(None)) => debug!(event, "nothing dispatched"),
        Some(Err(e)) => warn!(event, error = %e, "event failed"),
        None => {}
    }
}

/// Nullable `java.lang.String` argument.
fn optional_string(env: &mut JNIEnv, value: &JString) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match env.get_string(value) {
        Ok(s) => Some(s.into()),
        Err(e) => {
            let _ = env.exception_clear();
            warn!(error = %e, "unreadable string argument");
            None
        }
    }
}

fn extras(env: &mut JNIEnv, sample: &JString, test: &JString) -> IntentExtras {
    IntentExtras {
        sample: optional_string(env, sample),
        test: optional_string(env, test),
    }
}

fn grant_results(env: &mut JNIEnv, grants: &JIntArray) -> Vec<PermissionStatus> {
    if grants.is_null() {
        return Vec::new();
    }
    let len = env.get_array_length(grants).unwrap_or(0);
    let mut codes = vec![0; usize::try_from(len).unwrap_or(0)];
    if let Err(e) = env.get_int_array_region(grants, 0, &mut codes) {
        let _ = env.exception_clear();
        warn!(error = %e, "unreadable grant results");
        return Vec::new();
    }
    codes.into_iter().map(PermissionStatus::from_android_code).collect()
}

/// Config stored next to the runtime's files, or defaults.
fn load_config(bridge: &AndroidBridge) -> LaunchpadConfig {
    match bridge.external_files_dir() {
        Ok(Some(dir)) => config_store::load_config(&dir),
        Ok(None) => LaunchpadConfig::default(),
        Err(e) => {
            warn!(error = %e, "no config directory, using defaults");
            LaunchpadConfig::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnCreate<'local>(
    mut env: JNIEnv<'local>,
    activity: JObject<'local>,
    sample: JString<'local>,
    test: JString<'local>,
) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    if let Err(e) = host::attach_host(&mut env, &activity) {
        warn!(error = %e, "could not attach host activity");
        return;
    }
    let extras = extras(&mut env, &sample, &test);

    let bridge = AndroidBridge::new();
    let config = load_config(&bridge);
    let mut shell = SampleShell::new(Box::new(bridge), config);
    let outcome = shell.create(extras);

    *SHELL.lock().unwrap_or_else(PoisonError::into_inner) = Some(shell);
    log_outcome("create", Some(outcome));
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnNewIntent<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    sample: JString<'local>,
    test: JString<'local>,
) {
    let extras = extras(&mut env, &sample, &test);
    log_outcome("new_intent", with_shell("new_intent", |shell| shell.new_intent(extras)));
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnDestroy<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) {
    SHELL.lock().unwrap_or_else(PoisonError::into_inner).take();
    host::detach_host();
}

// ---------------------------------------------------------------------------
// Picker and menu
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnSampleSelected<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    id: JString<'local>,
) {
    let Some(id) = optional_string(&mut env, &id) else {
        warn!("sample selected without an id");
        return;
    };
    log_outcome("select_sample", with_shell("select_sample", |shell| shell.select_sample(&id)));
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnRunSamples<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) {
    log_outcome("run_samples", with_shell("run_samples", |shell| shell.run_samples()));
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnToggleBenchmark<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) -> jboolean {
    match with_shell("toggle_benchmark", |shell| shell.toggle_benchmark()) {
        Some(true) => JNI_TRUE,
        Some(false) | None => JNI_FALSE,
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnTabSelected<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
    index: jint,
) {
    let Ok(index) = usize::try_from(index) else {
        warn!(index, "negative tab index");
        return;
    };
    if let Some(Err(e)) = with_shell("select_tab", |shell| shell.select_tab(index)) {
        warn!(index, error = %e, "tab selection rejected");
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeIsPickerVisible<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) -> jboolean {
    match with_shell("is_picker_visible", |shell| shell.view().visibility().picker) {
        Some(true) => JNI_TRUE,
        Some(false) | None => JNI_FALSE,
    }
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnRequestPermissionsResult<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    request_code: jint,
    grants: JIntArray<'local>,
) {
    let grants = grant_results(&mut env, &grants);
    log_outcome(
        "permissions_result",
        with_shell("permissions_result", |shell| {
            shell.permissions_result(request_code, &grants)
        }),
    );
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_arm_vulkan_1best_1practice_BPSampleActivity_nativeOnPermissionRetry<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) {
    log_outcome(
        "check_permissions",
        with_shell("check_permissions", |shell| shell.check_permissions()),
    );
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. The hosting activity registers itself through
// [`attach_host`] from its `onCreate` entry point; that initialises
// `ndk_context` and keeps a global reference to the activity until
// [`detach_host`]. Every bridge call made while no host is attached fails
// with a bridge error instead of touching JNI.
//
// ## Architecture notes
//
// The sample runtime is a C++ library whose entry points are declared as
// `native` methods on the hosting activity:
//
//   Sample[] getSamples();
//   void sendArgumentsToPlatform(String[] args);
//   void initFilePath(String externalDir, String tempPath);
//
// Once `System.loadLibrary` has bound them, this bridge reaches the runtime
// by calling those methods on the activity. Application classes are
// resolved through the activity's class loader because `FindClass` on a
// natively attached thread only sees system classes.
//
// Toasts and orientation changes must be issued from the UI thread; the
// host calls into the shell from its lifecycle and click callbacks, which
// already run there.

#![cfg(target_os = "android")]

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use jni::objects::{GlobalRef, JObject, JObjectArray, JString, JValue};
use jni::sys::jsize;
use jni::{JNIEnv, JavaVM};

use launchpad_core::error::{LaunchpadError, Result};
use launchpad_core::notices::Notice;
use launchpad_core::types::{Orientation, PermissionStatus, Sample, StoragePermission};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// JNI descriptor of the runtime's `Sample` class.
const SAMPLE_ARRAY_SIG: &str = "()[Lcom/arm/vulkan_best_practice/Sample;";

/// `ActivityInfo.SCREEN_ORIENTATION_*`.
const SCREEN_ORIENTATION_UNSPECIFIED: i32 = -1;
const SCREEN_ORIENTATION_LANDSCAPE: i32 = 0;

/// Process-wide `JavaVM`, recorded by the first [`attach_host`].
static VM: OnceLock<JavaVM> = OnceLock::new();

/// Global reference to the attached host activity.
static HOST: Mutex<Option<GlobalRef>> = Mutex::new(None);

/// Register the hosting activity. Replaces a previously attached one.
///
/// Must be called from a JNI entry point before any bridge method.
pub fn attach_host(env: &mut JNIEnv, activity: &JObject) -> Result<()> {
    let global = env
        .new_global_ref(activity)
        .map_err(|e| jni_err(env, "new_global_ref(activity)", e))?;
    if VM.get().is_none() {
        let vm = env.get_java_vm().map_err(|e| jni_err(env, "get_java_vm", e))?;
        let _ = VM.set(vm);
    }
    let vm = java_vm()?;

    let mut host = HOST.lock().unwrap_or_else(PoisonError::into_inner);
    if host.take().is_some() {
        // SAFETY: a context was registered by the previous attach.
        unsafe { ndk_context::release_android_context() };
    }
    // SAFETY: the VM lives for the whole process and `global` keeps the
    // activity alive until `detach_host` releases the context.
    unsafe {
        ndk_context::initialize_android_context(
            vm.get_java_vm_pointer().cast(),
            global.as_obj().as_raw().cast(),
        );
    }
    *host = Some(global);
    tracing::info!("Android: host activity attached");
    Ok(())
}

/// Release the hosting activity registered by [`attach_host`].
pub fn detach_host() {
    let mut host = HOST.lock().unwrap_or_else(PoisonError::into_inner);
    if host.take().is_some() {
        // SAFETY: paired with the initialisation in `attach_host`.
        unsafe { ndk_context::release_android_context() };
        tracing::info!("Android: host activity detached");
    }
}

fn host_attached() -> bool {
    HOST.lock().unwrap_or_else(PoisonError::into_inner).is_some()
}

fn java_vm() -> Result<&'static JavaVM> {
    VM.get()
        .ok_or_else(|| LaunchpadError::Bridge("no JavaVM; host activity never attached".into()))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| LaunchpadError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the hosting `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    if !host_attached() {
        return Err(LaunchpadError::Bridge("host activity not attached".into()));
    }
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(LaunchpadError::Bridge(
            "Android context is null; host activity not initialised".into(),
        ));
    }
    // SAFETY: the host registers a global reference to its activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map any `jni::errors::Error` into `LaunchpadError::Bridge`, clearing a
/// pending Java exception so later calls on this thread still work.
fn jni_err(env: &mut JNIEnv, context: &str, e: jni::errors::Error) -> LaunchpadError {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
    LaunchpadError::Bridge(format!("{context}: {e}"))
}

/// Read a `java.lang.String` into a Rust `String`.
fn rust_string(env: &mut JNIEnv, obj: JObject) -> Result<String> {
    let jstr = JString::from(obj);
    let value = env
        .get_string(&jstr)
        .map(String::from)
        .map_err(|e| jni_err(env, "get_string", e));
    let _ = env.delete_local_ref(jstr);
    value
}

/// Absolute path of a `java.io.File`, or `None` for a null reference.
fn file_path(env: &mut JNIEnv, file: JObject) -> Result<Option<PathBuf>> {
    if file.is_null() {
        return Ok(None);
    }
    let path = match env.call_method(&file, "getAbsolutePath", "()Ljava/lang/String;", &[]) {
        Ok(value) => value.l().map_err(|e| jni_err(env, "getAbsolutePath->l", e))?,
        Err(e) => return Err(jni_err(env, "getAbsolutePath", e)),
    };
    let _ = env.delete_local_ref(file);
    rust_string(env, path).map(|p| Some(PathBuf::from(p)))
}

/// Resolve an application class through the activity's class loader.
///
/// `class` uses JNI slash notation (`com/example/Foo`).
fn load_app_class<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject,
    class: &str,
) -> Result<JObject<'local>> {
    let loader = match env.call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[]) {
        Ok(value) => value.l().map_err(|e| jni_err(env, "getClassLoader->l", e))?,
        Err(e) => return Err(jni_err(env, "getClassLoader", e)),
    };
    let binary_name = class.replace('/', ".");
    let j_name = match env.new_string(&binary_name) {
        Ok(s) => s,
        Err(e) => return Err(jni_err(env, "new_string(class)", e)),
    };
    let loaded = env.call_method(
        &loader,
        "loadClass",
        "(Ljava/lang/String;)Ljava/lang/Class;",
        &[JValue::Object(&j_name)],
    );
    match loaded {
        Ok(value) => value.l().map_err(|e| jni_err(env, "loadClass->l", e)),
        Err(e) => Err(jni_err(env, &format!("loadClass({binary_name})"), e)),
    }
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the Launchpad platform bridge.
///
/// The struct is zero-sized; all state lives on the Java side or inside the
/// native runtime.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI; the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeSampleRuntime — native methods on the hosting activity
// ---------------------------------------------------------------------------

impl NativeSampleRuntime for AndroidBridge {
    /// `System.loadLibrary(library)`. An `UnsatisfiedLinkError` is cleared
    /// and reported as [`LaunchpadError::RuntimeLoad`].
    fn load_runtime(&self, library: &str) -> Result<()> {
        let mut env = jni_env()?;
        let j_name = env
            .new_string(library)
            .map_err(|e| jni_err(&mut env, "new_string(library)", e))?;

        let loaded = env.call_static_method(
            "java/lang/System",
            "loadLibrary",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&j_name)],
        );
        if let Err(e) = loaded {
            let err = jni_err(&mut env, "System.loadLibrary", e);
            tracing::error!(library, error = %err, "Android: native runtime failed to load");
            return Err(LaunchpadError::RuntimeLoad {
                library: library.to_owned(),
                reason: err.to_string(),
            });
        }

        tracing::info!(library, "Android: native runtime loaded");
        Ok(())
    }

    fn enumerate_samples(&self) -> Result<Vec<Sample>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let array = match env.call_method(&activity, "getSamples", SAMPLE_ARRAY_SIG, &[]) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getSamples->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "getSamples", e)),
        };
        if array.is_null() {
            return Ok(Vec::new());
        }
        let array = JObjectArray::from(array);
        let len = env
            .get_array_length(&array)
            .map_err(|e| jni_err(&mut env, "get_array_length", e))?;

        let capacity = usize::try_from(len)
            .map_err(|_| LaunchpadError::Bridge(format!("getSamples returned length {len}")))?;

        let mut samples = Vec::with_capacity(capacity);
        for i in 0..len {
            let element = env
                .get_object_array_element(&array, i)
                .map_err(|e| jni_err(&mut env, "get_object_array_element", e))?;

            let id = match env.call_method(&element, "getId", "()Ljava/lang/String;", &[]) {
                Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getId->l", e))?,
                Err(e) => return Err(jni_err(&mut env, "Sample.getId", e)),
            };
            let id = rust_string(&mut env, id)?;

            let category = match env.call_method(&element, "getCategory", "()Ljava/lang/String;", &[]) {
                Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getCategory->l", e))?,
                Err(e) => return Err(jni_err(&mut env, "Sample.getCategory", e)),
            };
            let category = rust_string(&mut env, category)?;

            let _ = env.delete_local_ref(element);
            samples.push(Sample { id, category });
        }

        tracing::info!(count = samples.len(), "Android: enumerated samples");
        Ok(samples)
    }

    fn dispatch_arguments(&self, args: &[String]) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let count = jsize::try_from(args.len()).map_err(|_| {
            LaunchpadError::Bridge(format!("{} arguments exceed a Java array", args.len()))
        })?;
        let array = env
            .new_object_array(count, "java/lang/String", JObject::null())
            .map_err(|e| jni_err(&mut env, "new_object_array", e))?;
        for (i, arg) in (0..count).zip(args) {
            let j_arg = env
                .new_string(arg)
                .map_err(|e| jni_err(&mut env, "new_string(arg)", e))?;
            env.set_object_array_element(&array, i, &j_arg)
                .map_err(|e| jni_err(&mut env, "set_object_array_element", e))?;
            let _ = env.delete_local_ref(j_arg);
        }

        env.call_method(
            &activity,
            "sendArgumentsToPlatform",
            "([Ljava/lang/String;)V",
            &[JValue::Object(&array)],
        )
        .map_err(|e| jni_err(&mut env, "sendArgumentsToPlatform", e))?;

        tracing::debug!(count = args.len(), "Android: arguments registered with runtime");
        Ok(())
    }

    fn init_storage_paths(&self, durable: &Path, temp: &Path) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_durable: JString = env
            .new_string(durable.to_string_lossy())
            .map_err(|e| jni_err(&mut env, "new_string(durable)", e))?;
        let j_temp: JString = env
            .new_string(temp.to_string_lossy())
            .map_err(|e| jni_err(&mut env, "new_string(temp)", e))?;

        env.call_method(
            &activity,
            "initFilePath",
            "(Ljava/lang/String;Ljava/lang/String;)V",
            &[JValue::Object(&j_durable), JValue::Object(&j_temp)],
        )
        .map_err(|e| jni_err(&mut env, "initFilePath", e))?;

        tracing::info!(
            durable = %durable.display(),
            temp = %temp.display(),
            "Android: runtime storage paths configured"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeStorage — Context.getExternalFilesDir / getCacheDir
// ---------------------------------------------------------------------------

impl NativeStorage for AndroidBridge {
    fn external_files_dir(&self) -> Result<Option<PathBuf>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_type = env
            .new_string("")
            .map_err(|e| jni_err(&mut env, "new_string(type)", e))?;
        let dir = match env.call_method(
            &activity,
            "getExternalFilesDir",
            "(Ljava/lang/String;)Ljava/io/File;",
            &[JValue::Object(&j_type)],
        ) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getExternalFilesDir->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "getExternalFilesDir", e)),
        };
        file_path(&mut env, dir)
    }

    fn cache_dir(&self) -> Result<Option<PathBuf>> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let dir = match env.call_method(&activity, "getCacheDir", "()Ljava/io/File;", &[]) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getCacheDir->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "getCacheDir", e)),
        };
        file_path(&mut env, dir)
    }
}

// ---------------------------------------------------------------------------
// NativeDisplay — Activity.setRequestedOrientation
// ---------------------------------------------------------------------------

impl NativeDisplay for AndroidBridge {
    fn request_orientation(&self, orientation: Orientation) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let value = match orientation {
            Orientation::Unspecified => SCREEN_ORIENTATION_UNSPECIFIED,
            Orientation::Landscape => SCREEN_ORIENTATION_LANDSCAPE,
        };
        env.call_method(
            &activity,
            "setRequestedOrientation",
            "(I)V",
            &[JValue::Int(value)],
        )
        .map_err(|e| jni_err(&mut env, "setRequestedOrientation", e))?;

        tracing::debug!(?orientation, "Android: orientation requested");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeActivity — startActivity(new Intent(activity, class))
// ---------------------------------------------------------------------------

impl NativeActivity for AndroidBridge {
    fn start_native_activity(&self, class: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let target = load_app_class(&mut env, &activity, class)?;
        let intent = env
            .new_object(
                "android/content/Intent",
                "(Landroid/content/Context;Ljava/lang/Class;)V",
                &[JValue::Object(&activity), JValue::Object(&target)],
            )
            .map_err(|e| jni_err(&mut env, "new Intent", e))?;

        env.call_method(
            &activity,
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&intent)],
        )
        .map_err(|e| jni_err(&mut env, "startActivity", e))?;

        tracing::info!(class, "Android: native activity started");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativePermissions — Activity.checkSelfPermission / requestPermissions
// ---------------------------------------------------------------------------

impl NativePermissions for AndroidBridge {
    fn check_permission(&self, permission: StoragePermission) -> Result<PermissionStatus> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_perm = env
            .new_string(permission.android_name())
            .map_err(|e| jni_err(&mut env, "new_string(permission)", e))?;
        let status = match env.call_method(
            &activity,
            "checkSelfPermission",
            "(Ljava/lang/String;)I",
            &[JValue::Object(&j_perm)],
        ) {
            Ok(value) => value.i().map_err(|e| jni_err(&mut env, "checkSelfPermission->i", e))?,
            Err(e) => return Err(jni_err(&mut env, "checkSelfPermission", e)),
        };

        Ok(PermissionStatus::from_android_code(status))
    }

    fn request_permission(&self, permission: StoragePermission) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_perm = env
            .new_string(permission.android_name())
            .map_err(|e| jni_err(&mut env, "new_string(permission)", e))?;
        let array = env
            .new_object_array(1, "java/lang/String", &j_perm)
            .map_err(|e| jni_err(&mut env, "new_object_array", e))?;

        env.call_method(
            &activity,
            "requestPermissions",
            "([Ljava/lang/String;I)V",
            &[JValue::Object(&array), JValue::Int(permission.request_code())],
        )
        .map_err(|e| jni_err(&mut env, "requestPermissions", e))?;

        tracing::info!(permission = permission.android_name(), "Android: permission requested");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeNotify — android.widget.Toast
// ---------------------------------------------------------------------------

impl NativeNotify for AndroidBridge {
    fn show_notice(&self, notice: &Notice) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let context = match env.call_method(
            &activity,
            "getApplicationContext",
            "()Landroid/content/Context;",
            &[],
        ) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "getApplicationContext->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "getApplicationContext", e)),
        };
        let j_text = env
            .new_string(&notice.message)
            .map_err(|e| jni_err(&mut env, "new_string(notice)", e))?;

        let toast = match env.call_static_method(
            "android/widget/Toast",
            "makeText",
            "(Landroid/content/Context;Ljava/lang/CharSequence;I)Landroid/widget/Toast;",
            &[
                JValue::Object(&context),
                JValue::Object(&j_text),
                JValue::Int(notice.duration.toast_length()),
            ],
        ) {
            Ok(value) => value.l().map_err(|e| jni_err(&mut env, "Toast.makeText->l", e))?,
            Err(e) => return Err(jni_err(&mut env, "Toast.makeText", e)),
        };

        env.call_method(&toast, "show", "()V", &[])
            .map_err(|e| jni_err(&mut env, "Toast.show", e))?;
        Ok(())
    }
}

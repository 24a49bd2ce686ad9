// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Launchpad — sample picker shell for the native sample runtime.
//!
//! The shell is driven by its host: on Android the sample activity calls the
//! JNI entry points in `jni_entry`, which forward each lifecycle and click
//! callback to a single `shell::SampleShell`. On desktop the `launchpad`
//! binary drives the same shell once from the command line.

pub mod services;
pub mod shell;
pub mod view;

#[cfg(target_os = "android")]
pub mod jni_entry;

#[cfg(test)]
mod testing;

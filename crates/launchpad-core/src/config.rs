// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use tracing::warn;

use crate::protocol::BENCHMARK_ITERATIONS;

/// Persistent shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchpadConfig {
    /// Name of the native runtime library (without `lib` prefix or extension).
    pub native_library: String,
    /// Fully qualified Java class of the activity that runs samples.
    pub native_activity_class: String,
    /// Iteration count sent with `--benchmark`.
    pub benchmark_iterations: u32,
    /// Whether benchmark mode starts enabled.
    pub benchmark_on_start: bool,
    /// Refuse launches until the runtime has been given storage paths.
    /// When false the runtime falls back to its own default directories.
    pub require_storage_paths: bool,
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            native_library: "vulkan_best_practice".into(),
            native_activity_class: "com/arm/vulkan_best_practice/BPNativeActivity".into(),
            benchmark_iterations: BENCHMARK_ITERATIONS,
            benchmark_on_start: false,
            require_storage_paths: false,
        }
    }
}

impl LaunchpadConfig {
    /// Replace settings the runtime would reject with their defaults.
    ///
    /// A zero `benchmark_iterations` would render `--benchmark 0`, which the
    /// runtime refuses to parse.
    pub fn sanitized(mut self) -> Self {
        if self.benchmark_iterations == 0 {
            warn!(
                default = BENCHMARK_ITERATIONS,
                "benchmark_iterations is zero, using the default"
            );
            self.benchmark_iterations = BENCHMARK_ITERATIONS;
        }
        self
    }
}

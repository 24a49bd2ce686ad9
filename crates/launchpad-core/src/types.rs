// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Launchpad sample shell.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named, categorised workload exposed by the native runtime.
///
/// Samples are created by the runtime at enumeration time and are read-only
/// to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    /// Unique identifier passed back as the value of `--sample`.
    pub id: String,
    /// Grouping key; one picker tab per distinct category.
    pub category: String,
}

impl Sample {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
        }
    }
}

/// One picker tab: a category and the samples in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTab {
    pub category: String,
    pub samples: Vec<Sample>,
}

/// Samples grouped by category.
///
/// Tabs are ordered by category name. Within a tab, samples keep the order
/// the runtime enumerated them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCatalog {
    tabs: Vec<CategoryTab>,
}

impl SampleCatalog {
    /// Group an enumeration result into tabs.
    pub fn categorize(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut grouped: BTreeMap<String, Vec<Sample>> = BTreeMap::new();
        for sample in samples {
            grouped
                .entry(sample.category.clone())
                .or_default()
                .push(sample);
        }

        let tabs = grouped
            .into_iter()
            .map(|(category, samples)| CategoryTab { category, samples })
            .collect();
        Self { tabs }
    }

    pub fn tabs(&self) -> &[CategoryTab] {
        &self.tabs
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Total number of samples across all tabs.
    pub fn sample_count(&self) -> usize {
        self.tabs.iter().map(|t| t.samples.len()).sum()
    }

    /// Category name of the tab at `index`, if any.
    pub fn category_at(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(|t| t.category.as_str())
    }

    /// Look up a sample by id across every tab.
    pub fn find(&self, id: &str) -> Option<&Sample> {
        self.tabs
            .iter()
            .flat_map(|t| t.samples.iter())
            .find(|s| s.id == id)
    }
}

/// Screen orientation requested from the platform before a launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Leave the orientation to the platform.
    #[default]
    Unspecified,
    /// Force landscape (used for test runs).
    Landscape,
}

/// Extras carried by an incoming launch intent (e.g. a launcher deep-link).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentExtras {
    /// Value of the `sample` extra.
    pub sample: Option<String>,
    /// Value of the `test` extra.
    pub test: Option<String>,
}

impl IntentExtras {
    pub const SAMPLE_KEY: &'static str = "sample";
    pub const TEST_KEY: &'static str = "test";

    /// Build extras from `(key, value)` pairs. Unrecognised keys are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut extras = Self::default();
        for (key, value) in pairs {
            match key {
                Self::SAMPLE_KEY => extras.sample = Some(value.to_owned()),
                Self::TEST_KEY => extras.test = Some(value.to_owned()),
                other => tracing::debug!(key = other, "ignoring unrecognised intent extra"),
            }
        }
        extras
    }

    /// Whether any recognised trigger key is present.
    pub fn is_empty(&self) -> bool {
        self.sample.is_none() && self.test.is_none()
    }
}

/// Storage permissions the shell needs, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoragePermission {
    Write,
    Read,
}

impl StoragePermission {
    /// Check order: write first, then read.
    pub fn check_order() -> &'static [StoragePermission] {
        &[StoragePermission::Write, StoragePermission::Read]
    }

    /// Android manifest permission name.
    pub fn android_name(&self) -> &'static str {
        match self {
            Self::Write => "android.permission.WRITE_EXTERNAL_STORAGE",
            Self::Read => "android.permission.READ_EXTERNAL_STORAGE",
        }
    }

    /// Request code the platform echoes back with the result.
    pub fn request_code(&self) -> i32 {
        match self {
            Self::Read => 1,
            Self::Write => 2,
        }
    }

    pub fn from_request_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Read),
            2 => Some(Self::Write),
            _ => None,
        }
    }
}

/// Outcome of a single permission check or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    /// Map an Android `PackageManager.PERMISSION_*` code. Only `0`
    /// (`PERMISSION_GRANTED`) grants.
    pub fn from_android_code(code: i32) -> Self {
        if code == 0 { Self::Granted } else { Self::Denied }
    }
}

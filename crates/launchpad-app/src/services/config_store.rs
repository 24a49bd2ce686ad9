// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON persistence for `LaunchpadConfig`.

use std::path::Path;

use launchpad_core::error::Result;
use launchpad_core::LaunchpadConfig;
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.json";

/// Load the persisted config, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(data_dir: &Path) -> LaunchpadConfig {
    let path = data_dir.join(CONFIG_FILE);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no saved config, using defaults");
            return LaunchpadConfig::default();
        }
    };
    serde_json::from_str::<LaunchpadConfig>(&data)
        .map(LaunchpadConfig::sanitized)
        .unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "saved config is invalid, using defaults");
            LaunchpadConfig::default()
        })
}

pub fn persist_config(data_dir: &Path, config: &LaunchpadConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_config_is_reloaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = LaunchpadConfig {
            benchmark_on_start: true,
            require_storage_paths: true,
            ..LaunchpadConfig::default()
        };
        persist_config(dir.path(), &config).expect("persist");
        assert_eq!(load_config(dir.path()), config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(load_config(dir.path()), LaunchpadConfig::default());
    }

    #[test]
    fn zero_benchmark_iterations_load_as_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "benchmark_iterations": 0, "benchmark_on_start": true }"#,
        )
        .expect("write");
        let config = load_config(dir.path());
        assert_eq!(config.benchmark_iterations, 2000);
        assert!(config.benchmark_on_start);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").expect("write");
        assert_eq!(load_config(dir.path()), LaunchpadConfig::default());
    }
}

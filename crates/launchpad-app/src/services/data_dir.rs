// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::PathBuf;

/// Return the shell's settings directory, creating it if needed.
///
/// On desktop this uses a conventional location. On Android the host
/// passes its files directory through `LAUNCHPAD_DATA_DIR`.
pub fn data_dir() -> PathBuf {
    let dir = match std::env::var("LAUNCHPAD_DATA_DIR") {
        Ok(explicit) => PathBuf::from(explicit),
        Err(_) => dirs_fallback().join("launchpad"),
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "could not create data directory");
    }
    dir
}

fn dirs_fallback() -> PathBuf {
    // Try XDG config dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    std::env::temp_dir()
}

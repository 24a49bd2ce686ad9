// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Launchpad.

use thiserror::Error;

/// Top-level error type for all Launchpad operations.
#[derive(Debug, Error)]
pub enum LaunchpadError {
    // -- Native runtime --
    #[error("native runtime library `{library}` failed to load: {reason}")]
    RuntimeLoad { library: String, reason: String },

    #[error("native runtime is not loaded")]
    RuntimeUnavailable,

    #[error("storage paths have not been configured for the native runtime")]
    StoragePathsMissing,

    // -- Launch protocol --
    #[error("storage permission not granted")]
    PermissionDenied,

    #[error("invalid launch argument: {0}")]
    InvalidArgument(String),

    #[error("unknown sample: {0}")]
    UnknownSample(String),

    // -- Persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LaunchpadError>;

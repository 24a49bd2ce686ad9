// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing notices for shell errors.
//
// Failures at this boundary degrade to "feature unavailable". Each error is
// turned into a short message the platform shows as a transient toast.

use crate::error::LaunchpadError;

/// How long the platform keeps a notice on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDuration {
    Short,
    Long,
}

impl NoticeDuration {
    /// Android `Toast.LENGTH_*` constant.
    pub fn toast_length(&self) -> i32 {
        match self {
            Self::Short => 0,
            Self::Long => 1,
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub duration: NoticeDuration,
}

impl Notice {
    pub fn short(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: NoticeDuration::Short,
        }
    }

    pub fn long(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: NoticeDuration::Long,
        }
    }
}

/// Map an error to the notice shown to the user.
pub fn notice_for(err: &LaunchpadError) -> Notice {
    match err {
        LaunchpadError::RuntimeLoad { .. } | LaunchpadError::RuntimeUnavailable => {
            Notice::short("Native code library failed to load.")
        }
        LaunchpadError::StoragePathsMissing => {
            Notice::long("Storage is not available, so samples cannot be started.")
        }
        LaunchpadError::PermissionDenied => {
            Notice::long("Storage permission is needed to run samples.")
        }
        LaunchpadError::InvalidArgument(detail) => {
            Notice::short(format!("Could not start the launch: {detail}."))
        }
        LaunchpadError::UnknownSample(id) => Notice::short(format!("No sample named \"{id}\".")),
        LaunchpadError::Io(_) | LaunchpadError::Serialization(_) => {
            Notice::short("Settings could not be saved.")
        }
        LaunchpadError::Bridge(_) => Notice::short("The sample could not be started."),
        LaunchpadError::PlatformUnavailable => {
            Notice::short("This feature is not available on this device.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failure_uses_short_toast() {
        let notice = notice_for(&LaunchpadError::RuntimeLoad {
            library: "vulkan_best_practice".into(),
            reason: "dlopen failed".into(),
        });
        assert_eq!(notice.message, "Native code library failed to load.");
        assert_eq!(notice.duration, NoticeDuration::Short);
        assert_eq!(notice.duration.toast_length(), 0);
    }

    #[test]
    fn permission_denied_stays_longer() {
        let notice = notice_for(&LaunchpadError::PermissionDenied);
        assert_eq!(notice.duration, NoticeDuration::Long);
    }

    #[test]
    fn unknown_sample_names_the_id() {
        let notice = notice_for(&LaunchpadError::UnknownSample("afbc".into()));
        assert!(notice.message.contains("afbc"));
    }
}

//! Transient user-facing notices.
//!
//! Every command that acknowledges or rejects something produces a
//! [`Notice`]. The UI decides how to show it (the storefront flashes it on
//! the next page).

use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    /// CSS modifier class for this level.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notice-success",
            Self::Error => "notice-error",
        }
    }
}

/// A message shown to the user once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Returns true for error notices.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

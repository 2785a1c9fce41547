//! One-shot flash notices carried in the session.
//!
//! A notice survives exactly one redirect: the handler that renders the
//! next page takes it out of the session, so a refresh does not repeat
//! the message.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Severity of a flash notice, used by templates to pick styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    /// CSS class fragment for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// A one-shot notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Notice severity.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
}

impl Flash {
    /// A success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// An informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    /// A warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: Level::Danger,
            message: message.into(),
        }
    }
}

/// Store a flash notice for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set(session: &Session, flash: Flash) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, flash).await
}

/// Take the pending flash notice, if any, removing it from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn take(session: &Session) -> Result<Option<Flash>, tower_sessions::session::Error> {
    session.remove::<Flash>(session_keys::FLASH).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_level_css_class() {
        assert_eq!(Level::Success.as_str(), "success");
        assert_eq!(Level::Danger.as_str(), "danger");
    }

    #[test]
    fn test_flash_serializes_level_lowercase() {
        let flash = Flash::warning("Please login to view your cart");
        let value = serde_json::to_value(&flash).unwrap();
        assert_eq!(value["level"], "warning");
        assert_eq!(value["message"], "Please login to view your cart");
    }

    #[test]
    fn test_constructors_set_levels() {
        assert_eq!(Flash::success("x").level, Level::Success);
        assert_eq!(Flash::info("x").level, Level::Info);
        assert_eq!(Flash::warning("x").level, Level::Warning);
        assert_eq!(Flash::danger("x").level, Level::Danger);
    }
}

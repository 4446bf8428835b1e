//! Normalized machine health view.

use serde::{Deserialize, Serialize};

/// Boolean-plus-message health summary observed by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    /// Whether the backend reported itself healthy.
    pub healthy: bool,
    /// Human-readable status detail, when one was provided.
    pub message: Option<String>,
}

impl HealthSummary {
    /// A healthy summary without further detail.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            healthy: true,
            message: None,
        }
    }

    /// An unhealthy summary with a best-effort message.
    #[must_use]
    pub const fn unhealthy(message: Option<String>) -> Self {
        Self {
            healthy: false,
            message,
        }
    }
}

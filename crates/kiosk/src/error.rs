//! Top-level kiosk error type.

use thiserror::Error;

use crate::backend::BackendError;
use crate::backend::conversions::IdentityError;
use crate::config::ConfigError;

/// Aggregate error for kiosk operations.
///
/// Layer errors convert via `?`; callers that only care about "did it work"
/// match on the variant, the rest bubbles up with context intact.
#[derive(Debug, Error)]
pub enum KioskError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backend request failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// The identity payload could not be resolved.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),
}

//! Kiosk backend API client and payload normalizers.
//!
//! # Architecture
//!
//! - The backend is source of truth - no local sync, direct API calls
//! - Upstream payloads arrive as arbitrary `serde_json::Value` and are
//!   converted into canonical records by the [`conversions`] module
//! - The normalized catalog is cached in-memory via `moka` with a
//!   configurable TTL (30 seconds by default)
//!
//! # Example
//!
//! ```rust,ignore
//! use snackpoint_kiosk::backend::BackendClient;
//!
//! let client = BackendClient::new(&config)?;
//!
//! // Fetch and normalize the product feed
//! let products = client.fetch_catalog(false).await?;
//!
//! // Resolve a scanned card into an identity payload
//! let payload = client.fetch_identity().await?;
//! ```

mod client;
pub mod conversions;

pub use client::BackendClient;

use thiserror::Error;

/// Errors surfaced by the kiosk backend.
///
/// This is the uniform transport error shape the core interprets: an
/// HTTP-like status plus an optional structured payload.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned status {status}")]
    Api {
        status: u16,
        payload: Option<serde_json::Value>,
    },

    /// Response body could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl BackendError {
    /// Best-effort human-readable message carried in the error payload.
    ///
    /// The backend reports failures as `{"error": ...}` or
    /// `{"message": ...}`; either key is accepted.
    #[must_use]
    pub fn payload_message(&self) -> Option<String> {
        let Self::Api {
            payload: Some(payload),
            ..
        } = self
        else {
            return None;
        };
        payload
            .get("error")
            .or_else(|| payload.get("message"))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
    }
}

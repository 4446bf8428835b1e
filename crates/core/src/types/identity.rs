//! Canonical user identity resolved from an external card/auth payload.

use serde::{Deserialize, Serialize};

/// A resolved kiosk user.
///
/// Produced once per successful identity resolution and owned exclusively by
/// the session; destroyed when the session ends.
///
/// # Invariants
///
/// - `id` is never empty. When the upstream payload carries no recognizable
///   identifier, the normalizer generates a unique fallback token.
/// - `name` is never empty. It falls back to the literal `"Mitglied"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Canonical identifier (member id, RFID, or generated token).
    pub id: String,
    /// Member id when the upstream payload supplied one.
    pub member_id: Option<String>,
    /// Display name, never empty.
    pub name: String,
    /// First name, retained only when supplied as a string.
    pub first_name: Option<String>,
    /// Last name, retained only when supplied as a string.
    pub last_name: Option<String>,
    /// The original upstream payload, kept opaque for diagnostics.
    pub raw: serde_json::Value,
}

impl Identity {
    /// Name used for the personal greeting: the first name when known,
    /// otherwise the display name.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(&self.name)
    }
}

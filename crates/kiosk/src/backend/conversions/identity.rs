//! Identity resolution: scanned-card payload into a canonical [`Identity`].

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use snackpoint_core::Identity;

use super::{first_scalar, first_string, json_kind};

/// Id candidates in resolution order. Member ids win over raw RFID tokens so
/// a registered member keeps the same id across readers.
const ID_ALIASES: &[&str] = &[
    "memberid", "memberId", "member_id", "memberID", "id", "rfid_id", "rfid",
];

/// The subset of id aliases that denote a membership number.
const MEMBER_ID_ALIASES: &[&str] = &["memberid", "memberId", "member_id", "memberID"];

const FIRST_NAME_ALIASES: &[&str] = &["firstname", "firstName", "first_name"];
const LAST_NAME_ALIASES: &[&str] = &["lastname", "lastName", "last_name"];

/// Single-field display name aliases, tried when no first/last name exists.
const NAME_ALIASES: &[&str] = &["first", "name", "fullName", "full_name"];

/// Display name used when the payload carries no usable name at all.
pub const FALLBACK_DISPLAY_NAME: &str = "Mitglied";

/// Raised when the identity payload is fundamentally not a record.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The payload was null, a primitive, or an array.
    #[error("identity payload is not a structured record (got {0})")]
    NotARecord(&'static str),
}

/// Resolve an arbitrary external user/card payload into a canonical identity.
///
/// Pure and total over any structured record: unexpected shapes degrade to
/// fallbacks, never to errors. Only non-record input (null, primitives,
/// arrays) fails.
///
/// # Errors
///
/// Returns [`IdentityError::NotARecord`] when `raw` is not a JSON object.
pub fn normalize_identity(raw: &Value) -> Result<Identity, IdentityError> {
    let Some(map) = raw.as_object() else {
        return Err(IdentityError::NotARecord(json_kind(raw)));
    };

    let member_id = first_scalar(map, MEMBER_ID_ALIASES);
    let id = first_scalar(map, ID_ALIASES).unwrap_or_else(generated_id);

    // First/last name are retained only when the source provided them as
    // strings; a bare number is an id, not a name.
    let first_name = first_string(map, FIRST_NAME_ALIASES);
    let last_name = first_string(map, LAST_NAME_ALIASES);

    let name = compose_name(first_name.as_deref(), last_name.as_deref())
        .or_else(|| first_string(map, NAME_ALIASES))
        .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());

    Ok(Identity {
        id,
        member_id,
        name,
        first_name,
        last_name,
        raw: raw.clone(),
    })
}

/// Space-join first and last name when at least one is present.
fn compose_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last].into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Unique fallback id for payloads without any recognizable identifier.
fn generated_id() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}

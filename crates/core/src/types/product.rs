//! Canonical product record produced by catalog normalization.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A vending slot product in canonical form.
///
/// Recreated wholesale on every successful catalog fetch; the previous list
/// is discarded entirely, never diffed.
///
/// # Invariants
///
/// - `id` is non-empty (records without a resolvable id are dropped during
///   normalization, they never reach this type).
/// - `price` is finite and `>= 0`; `stock` is `>= 0`. Malformed, negative,
///   or non-numeric upstream values coerce to `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Canonical product identifier.
    pub id: String,
    /// Physical vending slot (row), falls back to the id.
    pub slot: String,
    /// Display name; empty when the upstream never provided one.
    pub name: String,
    /// Unit price, `>= 0`.
    pub price: f64,
    /// Currency code or symbol as reported upstream; empty when unknown.
    pub currency: String,
    /// Units available in the slot.
    pub stock: u32,
    /// Category label; empty when unknown.
    pub category: String,
    /// Declared allergens, when the upstream feed carries them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<BTreeSet<String>>,
    /// Whether the product is currently sellable (not deactivated and not
    /// past its validity date).
    pub is_active: bool,
}

impl Product {
    /// Whether at least one unit can be vended.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

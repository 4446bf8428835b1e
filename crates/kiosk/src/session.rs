//! Session and cart state for one kiosk interaction.
//!
//! A session begins when a card resolves into an identity and ends at
//! checkout or timeout. The cart holds product snapshots; quantities are
//! clamped against the snapshot stock taken at add-time.

use tracing::{debug, info, warn};

use snackpoint_core::{CartLine, Identity, Product, Receipt};

use crate::backend::BackendClient;
use crate::backend::conversions::normalize_identity;

/// Status line shown while the card reader is armed.
pub const SCAN_PROMPT: &str = "Scanner aktiv. Bitte Karte jetzt auflegen.";

/// Shown when the backend rejected the scan without a usable message.
const SCAN_REJECTED: &str = "Karte konnte nicht verifiziert werden.";

/// Shown when the identity payload could not be interpreted at all.
const SCAN_UNEXPECTED: &str = "Unerwarteter Fehler beim Abrufen der Benutzerdaten.";

/// Default currency when the cart is empty.
const DEFAULT_CURRENCY: &str = "EUR";

/// State of a single kiosk interaction.
///
/// All cart mutation goes through the methods here so the clamping
/// invariant (`1 <= quantity <= snapshot stock` for every line) holds at
/// every observable point.
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
    cart: Vec<CartLine>,
    awaiting_scan: bool,
    last_receipt: Option<Receipt>,
    message: Option<String>,
}

impl Session {
    /// Fresh anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ====== Session lifecycle ======

    /// Begin a session for the resolved identity.
    ///
    /// Re-entry while a session is active replaces the identity and clears
    /// the cart; the previous member's picks never leak into the next
    /// session.
    pub fn start_session(&mut self, identity: Identity) {
        info!(member = %identity.id, "session started");
        self.message = Some(format!("Willkommen {}!", identity.greeting_name()));
        self.identity = Some(identity);
        self.cart.clear();
        self.awaiting_scan = false;
    }

    /// End the session, resetting every field: identity, cart, receipt,
    /// and transient message. The goodbye screen shows the receipt before
    /// ending the session, via [`Self::reset_checkout_state`].
    pub fn end_session(&mut self) {
        if let Some(identity) = &self.identity {
            info!(member = %identity.id, "session ended");
        }
        self.identity = None;
        self.cart.clear();
        self.awaiting_scan = false;
        self.last_receipt = None;
        self.message = None;
    }

    /// Arm the card reader, resolve the scanned card, and start the session.
    ///
    /// Returns whether a session was started. On failure the session stays
    /// anonymous and `message` carries a human-readable German explanation;
    /// no raw error shape ever reaches UI state.
    pub async fn authenticate(&mut self, client: &BackendClient) -> bool {
        self.awaiting_scan = true;
        self.message = Some(SCAN_PROMPT.to_string());

        let payload = match client.fetch_identity().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "card scan failed");
                self.message = Some(e.payload_message().unwrap_or_else(|| SCAN_REJECTED.to_string()));
                self.awaiting_scan = false;
                return false;
            }
        };

        match normalize_identity(&payload) {
            Ok(identity) => {
                self.start_session(identity);
                true
            }
            Err(e) => {
                warn!(error = %e, "identity payload unusable");
                self.message = Some(SCAN_UNEXPECTED.to_string());
                self.awaiting_scan = false;
                false
            }
        }
    }

    // ====== Cart operations ======

    /// Add a product to the cart, merging with an existing line.
    ///
    /// `quantity == 0` is a no-op. The resulting line quantity is clamped
    /// to the product snapshot's stock; the snapshot is not re-checked
    /// against the live catalog.
    pub fn add_to_cart(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self.cart.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity).min(line.product.stock);
            debug!(product = %product.id, quantity = line.quantity, "cart line merged");
            return;
        }

        let clamped = quantity.min(product.stock);
        if clamped == 0 {
            debug!(product = %product.id, "not added, out of stock");
            return;
        }
        debug!(product = %product.id, quantity = clamped, "cart line added");
        self.cart.push(CartLine {
            product,
            quantity: clamped,
        });
    }

    /// Set a cart line's quantity directly; `0` removes the line.
    ///
    /// Values above the snapshot stock clamp down to it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(line) = self.cart.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity.min(line.product.stock);
        }
    }

    /// Remove a line from the cart. Unknown ids are a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        self.cart.retain(|l| l.product.id != product_id);
    }

    /// Empty the cart without touching the session.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // ====== Checkout state ======

    /// Store the receipt of a completed purchase.
    pub fn save_receipt(&mut self, receipt: Receipt) {
        self.last_receipt = Some(receipt);
    }

    /// Clear only the stored receipt, e.g. when leaving the goodbye screen.
    pub fn reset_checkout_state(&mut self) {
        self.last_receipt = None;
    }

    // ====== UI state ======

    /// Set the transient status message shown to the member.
    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    /// Mark whether the kiosk is waiting for a card scan.
    pub fn set_awaiting_scan(&mut self, awaiting: bool) {
        self.awaiting_scan = awaiting;
    }

    // ====== Accessors and derived values ======

    /// The authenticated identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Current cart lines.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Whether the kiosk is waiting for a card scan.
    #[must_use]
    pub const fn awaiting_scan(&self) -> bool {
        self.awaiting_scan
    }

    /// Receipt of the most recent purchase, if any.
    #[must_use]
    pub const fn last_receipt(&self) -> Option<&Receipt> {
        self.last_receipt.as_ref()
    }

    /// Current status message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether a member is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Total number of items across all cart lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.cart.iter().map(|l| l.quantity).sum()
    }

    /// Total price of the cart.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Currency of the cart: the first line's, or `"EUR"` when empty.
    #[must_use]
    pub fn currency(&self) -> &str {
        self.cart
            .first()
            .map_or(DEFAULT_CURRENCY, |l| l.product.currency.as_str())
    }
}

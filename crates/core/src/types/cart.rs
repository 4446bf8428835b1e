//! Cart lines and purchase receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;

/// A product snapshot in the cart with a chosen quantity.
///
/// The embedded [`Product`] is a copy taken at add-time, not a live
/// reference into the catalog. The stock ceiling for quantity clamping is
/// the snapshot's stock, a known staleness tradeoff for single-kiosk
/// deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot captured when the line was created.
    pub product: Product,
    /// Chosen quantity, kept within `1..=product.stock` by the session.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line (`quantity * unit price`).
    #[must_use]
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.product.price
    }
}

/// Receipt for a completed purchase.
///
/// Computed by the checkout collaborator; the kiosk core only carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Backend sale identifier.
    pub sale_id: String,
    /// Total charged.
    pub total: f64,
    /// Currency of the total.
    pub currency: String,
    /// Completion timestamp.
    pub completed_at: DateTime<Utc>,
    /// Purchased items.
    pub items: Vec<ReceiptItem>,
}

/// One purchased item on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Product id.
    pub id: String,
    /// Product name at purchase time.
    pub name: String,
    /// Purchased quantity.
    pub quantity: u32,
    /// Unit price at purchase time.
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, stock: u32) -> Product {
        Product {
            id: "A1".to_string(),
            slot: "A1".to_string(),
            name: "Testriegel".to_string(),
            price,
            currency: "EUR".to_string(),
            stock,
            category: "Energy".to_string(),
            allergens: None,
            is_active: true,
        }
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product: product(1.8, 6),
            quantity: 3,
        };
        assert!((line.line_total() - 5.4).abs() < f64::EPSILON * 10.0);
    }
}

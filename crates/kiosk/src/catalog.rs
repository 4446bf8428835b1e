//! Owned catalog state for the kiosk UI.
//!
//! Holds the current normalized product list and when it was last updated.
//! Refreshing goes through the [`BackendClient`]; when the backend is
//! unreachable the catalog falls back to a small built-in inventory so the
//! kiosk stays browsable offline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use snackpoint_core::Product;

use crate::backend::BackendClient;

/// Number of products shown on the kiosk start screen.
const FEATURED_COUNT: usize = 4;

/// A category with the number of active products in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// The kiosk's view of the product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Product>,
    last_updated: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Empty catalog; populated by [`Self::refresh`] or [`Self::set_items`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog wholesale with a fresh normalized list.
    ///
    /// Inactive products are filtered out here as well, so callers can hand
    /// over any normalized list without pre-filtering.
    pub fn set_items(&mut self, items: Vec<Product>) {
        self.items = items.into_iter().filter(|p| p.is_active).collect();
        self.last_updated = Some(Utc::now());
    }

    /// Fetch the catalog from the backend, falling back to the built-in
    /// inventory when the backend is unreachable.
    ///
    /// `force` bypasses the client-side cache. An empty response is a valid
    /// catalog (the machine may genuinely be sold out); only transport
    /// failures trigger the fallback.
    pub async fn refresh(&mut self, client: &BackendClient, force: bool) {
        match client.fetch_catalog(force).await {
            Ok(items) => {
                debug!(count = items.len(), "catalog refreshed");
                self.set_items(items);
            }
            Err(e) => {
                warn!(error = %e, "catalog refresh failed, using fallback inventory");
                self.set_items(fallback_inventory());
            }
        }
    }

    /// All active products, in feed order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// When the catalog was last replaced, if ever.
    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Whether the catalog has been populated at least once.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.last_updated.is_some()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Distinct categories with product counts, sorted by name.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for product in &self.items {
            *counts.entry(product.category.as_str()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(name, count)| CategoryCount {
                name: name.to_string(),
                count,
            })
            .collect()
    }

    /// The products featured on the start screen (first few in feed order).
    #[must_use]
    pub fn featured(&self) -> &[Product] {
        let end = self.items.len().min(FEATURED_COUNT);
        self.items.get(..end).unwrap_or_default()
    }

    /// Update the stock of the product in the given slot, e.g. after a sale.
    ///
    /// Returns whether a product was found and updated.
    pub fn update_stock(&mut self, slot: &str, stock: u32) -> bool {
        match self.items.iter_mut().find(|p| p.slot == slot) {
            Some(product) => {
                product.stock = stock;
                true
            }
            None => false,
        }
    }
}

/// Built-in inventory shown when the backend cannot be reached.
///
/// Matches the physical default loadout of the machine so prices and slots
/// stay plausible offline.
#[must_use]
pub fn fallback_inventory() -> Vec<Product> {
    let allergens = |names: &[&str]| {
        Some(
            names
                .iter()
                .map(ToString::to_string)
                .collect::<std::collections::BTreeSet<String>>(),
        )
    };

    vec![
        Product {
            id: "A1".to_string(),
            slot: "A1".to_string(),
            name: "Bio Müsli-Riegel Kakao".to_string(),
            price: 1.8,
            currency: "EUR".to_string(),
            stock: 6,
            category: "Energy".to_string(),
            allergens: allergens(&["Hafer", "Nüsse"]),
            is_active: true,
        },
        Product {
            id: "B2".to_string(),
            slot: "B2".to_string(),
            name: "Protein Shake Vanille".to_string(),
            price: 2.5,
            currency: "EUR".to_string(),
            stock: 4,
            category: "Drinks".to_string(),
            allergens: allergens(&["Milch"]),
            is_active: true,
        },
        Product {
            id: "C1".to_string(),
            slot: "C1".to_string(),
            name: "Veggie Wrap".to_string(),
            price: 3.0,
            currency: "EUR".to_string(),
            stock: 3,
            category: "Fresh".to_string(),
            allergens: allergens(&["Gluten"]),
            is_active: true,
        },
    ]
}

//! Core types for Snackpoint.
//!
//! The canonical, app-internal shapes produced after absorbing upstream
//! payload variance.

pub mod cart;
pub mod identity;
pub mod price;
pub mod product;
pub mod status;

pub use cart::{CartLine, Receipt, ReceiptItem};
pub use identity::Identity;
pub use price::{clamp_price, clamp_stock, coerce_price, coerce_stock, format_eur, parse_number};
pub use product::Product;
pub use status::HealthSummary;

//! Integration tests for Snackpoint.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p snackpoint-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flow` - Full session and cart scenarios against an in-memory
//!   catalog
//! - `normalization` - End-to-end payload normalization scenarios
//! - `offline_behavior` - Behavior with an unreachable backend (fallback
//!   inventory, message substitution, unhealthy status)
//!
//! The offline tests point the client at a closed local port; no external
//! services are required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use snackpoint_core::Product;
use snackpoint_kiosk::backend::BackendClient;
use snackpoint_kiosk::config::KioskConfig;

/// Initialize tracing for a test binary. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Configuration pointing at a local port nothing listens on.
///
/// Connections are refused immediately, which exercises the transport
/// failure paths without timeouts or external services.
#[must_use]
pub fn unreachable_config() -> KioskConfig {
    KioskConfig {
        base_url: Url::parse("http://127.0.0.1:9").unwrap_or_else(|_| unreachable!()),
        api_token: SecretString::from("test-token"),
        poll_interval: Duration::from_secs(15),
        catalog_cache_ttl: Duration::from_secs(30),
        danger_accept_invalid_certs: false,
    }
}

/// Client wired to the unreachable backend.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built, which only happens on a
/// broken TLS setup.
#[must_use]
#[allow(clippy::expect_used)]
pub fn unreachable_client() -> BackendClient {
    BackendClient::new(&unreachable_config()).expect("client should build")
}

/// An active test product.
#[must_use]
pub fn test_product(id: &str, price: f64, stock: u32) -> Product {
    Product {
        id: id.to_string(),
        slot: id.to_string(),
        name: format!("Produkt {id}"),
        price,
        currency: "EUR".to_string(),
        stock,
        category: "Energy".to_string(),
        allergens: None,
        is_active: true,
    }
}

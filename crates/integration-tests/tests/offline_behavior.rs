//! Behavior when the backend is unreachable.
//!
//! The client points at a closed local port, so every request fails at the
//! transport layer. The kiosk must stay usable: fallback inventory, German
//! message substitution, and an unhealthy status snapshot.

use std::time::Duration;

use snackpoint_integration_tests::{init_tracing, unreachable_client};
use snackpoint_kiosk::catalog::Catalog;
use snackpoint_kiosk::session::Session;
use snackpoint_kiosk::status::StatusPoller;

#[tokio::test]
async fn test_catalog_refresh_falls_back_to_builtin_inventory() {
    init_tracing();
    let client = unreachable_client();

    let mut catalog = Catalog::new();
    catalog.refresh(&client, false).await;

    assert!(catalog.is_loaded());
    assert_eq!(catalog.items().len(), 3);
    assert!(catalog.items().iter().all(|p| p.is_active));
    assert!(catalog.find_by_id("A1").is_some());
}

#[tokio::test]
async fn test_authenticate_fails_soft_with_german_message() {
    init_tracing();
    let client = unreachable_client();

    let mut session = Session::new();
    let authenticated = session.authenticate(&client).await;

    assert!(!authenticated);
    assert!(!session.is_authenticated());
    assert!(!session.awaiting_scan());
    assert_eq!(session.message(), Some("Karte konnte nicht verifiziert werden."));
}

#[tokio::test]
async fn test_status_poller_reports_unhealthy() {
    init_tracing();
    let client = unreachable_client();

    let poller = StatusPoller::new(client, Duration::from_secs(15));
    poller.poll_once().await;

    let snapshot = poller.snapshot();
    let Some(health) = snapshot.health else {
        panic!("snapshot should be written after a poll");
    };
    assert!(!health.healthy);
    assert!(snapshot.last_updated.is_some());
}

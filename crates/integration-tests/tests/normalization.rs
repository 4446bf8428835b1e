//! End-to-end payload normalization scenarios.

use serde_json::json;
use snackpoint_kiosk::backend::conversions::{
    FALLBACK_DISPLAY_NAME, normalize_catalog, normalize_identity,
};

#[test]
fn test_wrapped_catalog_feed_scenario() {
    let feed = json!({
        "results": [
            {"itemId": "A1", "designation": "Bar", "price": "1,80", "stock": "6"}
        ]
    });

    let products = normalize_catalog(&feed);
    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.id, "A1");
    assert_eq!(product.slot, "A1");
    assert_eq!(product.name, "Bar");
    assert!((product.price - 1.8).abs() < f64::EPSILON);
    assert_eq!(product.stock, 6);
    assert!(product.is_active);
}

#[test]
fn test_keyed_feed_with_price_history() {
    // Keyed-object shape of the club inventory export: prices carry a
    // validity window, the first entry is current.
    let feed = json!({
        "31869": {
            "designation": "Apfelschorle",
            "prices": [{"unitprice": "1,20", "validfrom": "2024-01-01", "validto": "2099-12-31"}],
            "stockarticle": 12
        },
        "31870": {
            "designation": "Altbestand",
            "prices": [{"unitprice": "0,90", "validto": "2020-06-30"}]
        }
    });

    let products = normalize_catalog(&feed);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "31869");
    assert!((products[0].price - 1.2).abs() < f64::EPSILON);
    assert_eq!(products[0].stock, 12);
}

#[test]
fn test_catalog_output_is_normalization_fixed_point() {
    let feed = json!([
        {"id": "A1", "name": "Riegel", "price": 1.8, "stock": 6, "category": "Energy"},
        {"id": "B2", "name": "Shake", "price": "2,50", "stock": "4"}
    ]);

    let first = normalize_catalog(&feed);
    let reencoded = serde_json::to_value(&first).unwrap_or_default();
    let second = normalize_catalog(&reencoded);
    assert_eq!(first, second);
}

#[test]
fn test_identity_scenario() {
    let identity = normalize_identity(&json!({"memberid": 42, "firstname": "Lena"}))
        .unwrap_or_else(|e| panic!("expected identity: {e}"));
    assert_eq!(identity.id, "42");
    assert_eq!(identity.member_id.as_deref(), Some("42"));
    assert_eq!(identity.name, "Lena");
    assert_eq!(identity.greeting_name(), "Lena");
}

#[test]
fn test_identity_without_usable_fields() {
    let identity = normalize_identity(&json!({"balance": 3.5}))
        .unwrap_or_else(|e| panic!("expected identity: {e}"));
    assert!(identity.id.starts_with("user-"));
    assert_eq!(identity.name, FALLBACK_DISPLAY_NAME);

    assert!(normalize_identity(&json!(null)).is_err());
    assert!(normalize_identity(&json!([1, 2, 3])).is_err());
}

//! Catalog normalization: heterogeneous product feeds into canonical
//! [`Product`] records.
//!
//! The upstream inventory service has shipped the feed as a plain array, as
//! `{results: [...]}`-style wrappers, and as a keyed object of records,
//! depending on version. Unresolvable entries are dropped and logged, never
//! propagated as errors; an empty result is a valid outcome the caller
//! handles with its own fallback policy.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use snackpoint_core::{Product, clamp_price, clamp_stock, parse_number};

use super::{first_scalar, first_string, json_kind, trimmed_string};

/// Known array-bearing wrapper keys, in priority order. The first match
/// wins; multiple wrapper keys are never merged.
const WRAPPER_KEYS: &[&str] = &["results", "items", "products"];

const ID_ALIASES: &[&str] = &[
    "id", "itemid", "itemId", "productId", "row", "slot", "articleid", "articleId",
];
const SLOT_ALIASES: &[&str] = &["row", "slot", "articleid", "articleId"];
const NAME_ALIASES: &[&str] = &[
    "name", "title", "product_name", "productName", "label", "articleName",
];
const PRICE_ALIASES: &[&str] = &["price", "cost", "unitPrice", "value", "unitprice"];
const NESTED_PRICE_ALIASES: &[&str] = &["unitPrice", "unitprice", "price", "value"];
const STOCK_ALIASES: &[&str] = &[
    "stock", "quantity", "amount", "available", "stockarticle", "stockArticle",
];
const CURRENCY_ALIASES: &[&str] = &["currency", "currencyCode", "currency_code"];
const CATEGORY_ALIASES: &[&str] = &["category", "product_group", "productGroup", "type", "group"];
const ALLERGEN_ALIASES: &[&str] = &["allergens", "allergene"];

/// Flags that explicitly mark a record active/inactive.
const ACTIVE_ALIASES: &[&str] = &["isActive", "is_active", "active"];
const DEACTIVATED_ALIASES: &[&str] = &["deactivated", "disabled"];

/// Expiry date aliases, `%Y-%m-%d`.
const VALID_TO_ALIASES: &[&str] = &["validto", "validTo"];

/// Convert an arbitrary product feed into the canonical, validity-filtered
/// catalog. Never fails; at worst it returns an empty list.
#[must_use]
pub fn normalize_catalog(raw: &Value) -> Vec<Product> {
    let candidates: Vec<(Option<&str>, &Value)> = match raw {
        Value::Array(entries) => entries.iter().map(|entry| (None, entry)).collect(),
        Value::Object(map) => match wrapped_entries(map) {
            Some(entries) => entries.iter().map(|entry| (None, entry)).collect(),
            // A keyed object of records: map keys become positional
            // fallback ids.
            None => map
                .iter()
                .map(|(key, entry)| (Some(key.as_str()), entry))
                .collect(),
        },
        other => {
            warn!(kind = json_kind(other), "unexpected catalog payload shape");
            return Vec::new();
        }
    };

    let total = candidates.len();
    let products: Vec<Product> = candidates
        .into_iter()
        .filter_map(|(key, entry)| normalize_product(entry, key))
        .filter(|product| product.is_active)
        .collect();
    debug!(total, kept = products.len(), "normalized catalog feed");
    products
}

/// The first wrapper key carrying an array, if any.
fn wrapped_entries(map: &Map<String, Value>) -> Option<&Vec<Value>> {
    WRAPPER_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
}

/// Normalize one candidate record.
///
/// Returns `None` only when no id can be resolved (including the positional
/// `fallback_id`); every other field degrades to a safe default instead of
/// excluding the record.
#[must_use]
pub fn normalize_product(raw: &Value, fallback_id: Option<&str>) -> Option<Product> {
    let Some(map) = raw.as_object() else {
        debug!(kind = json_kind(raw), "skipping non-record catalog entry");
        return None;
    };

    let id = first_scalar(map, ID_ALIASES).or_else(|| {
        fallback_id
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(ToString::to_string)
    });
    let Some(id) = id else {
        debug!("dropping catalog record without a resolvable id");
        return None;
    };

    let slot = first_scalar(map, SLOT_ALIASES).unwrap_or_else(|| id.clone());

    // An explicit designation wins over the generic name aliases; a missing
    // name stays empty rather than being invented.
    let name = first_string(map, &["designation"])
        .or_else(|| first_string(map, NAME_ALIASES))
        .unwrap_or_default();

    let price = clamp_price(
        first_numeric(map, PRICE_ALIASES).or_else(|| nested_price(map)),
    );
    let stock = clamp_stock(first_numeric(map, STOCK_ALIASES));

    let currency = first_string(map, CURRENCY_ALIASES).unwrap_or_default();
    let category = resolve_category(map).unwrap_or_default();
    let allergens = resolve_allergens(map);
    let is_active = resolve_is_active(map);

    Some(Product {
        id,
        slot,
        name,
        price,
        currency,
        stock,
        category,
        allergens,
        is_active,
    })
}

/// First alias whose value parses as a number (locale-tolerant).
fn first_numeric(map: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|key| parse_number(map.get(*key)?))
}

/// Price from the first entry of a nested price list, as used by the
/// club-management upstream (`prices: [{unitprice, validfrom, validto}]`).
fn nested_price(map: &Map<String, Value>) -> Option<f64> {
    let first = map.get("prices")?.as_array()?.first()?.as_object()?;
    first_numeric(first, NESTED_PRICE_ALIASES)
}

/// Category label; dict-valued categories contribute their `name`/`title`.
fn resolve_category(map: &Map<String, Value>) -> Option<String> {
    CATEGORY_ALIASES.iter().find_map(|key| {
        let value = map.get(*key)?;
        match value {
            Value::Object(inner) => first_string(inner, &["name", "title"]),
            other => trimmed_string(other),
        }
    })
}

/// Declared allergens, when present as a string array.
fn resolve_allergens(map: &Map<String, Value>) -> Option<BTreeSet<String>> {
    let entries = ALLERGEN_ALIASES
        .iter()
        .find_map(|key| map.get(*key)?.as_array())?;
    let set: BTreeSet<String> = entries.iter().filter_map(trimmed_string).collect();
    if set.is_empty() { None } else { Some(set) }
}

/// A record is active unless an explicit flag deactivates it or a parseable
/// expiry date has passed. Unknown or malformed flags default to active.
fn resolve_is_active(map: &Map<String, Value>) -> bool {
    let explicitly_deactivated = ACTIVE_ALIASES
        .iter()
        .find_map(|key| flag_value(map.get(*key)?))
        == Some(false)
        || DEACTIVATED_ALIASES
            .iter()
            .find_map(|key| flag_value(map.get(*key)?))
            == Some(true);
    if explicitly_deactivated {
        return false;
    }

    match parsed_valid_to(map) {
        Some(valid_to) => valid_to >= Utc::now().date_naive(),
        None => true,
    }
}

/// Interpret booleans and their common string/number spellings.
fn flag_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Expiry date, either at the top level or on the first nested price entry.
fn parsed_valid_to(map: &Map<String, Value>) -> Option<NaiveDate> {
    let raw = first_string(map, VALID_TO_ALIASES).or_else(|| {
        let first = map.get("prices")?.as_array()?.first()?.as_object()?;
        first_string(first, VALID_TO_ALIASES)
    })?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_results_wrapper_scenario() {
        let raw = json!({
            "results": [
                {"itemId": "A1", "designation": "Bar", "price": "1,80", "stock": "6"}
            ]
        });
        let products = normalize_catalog(&raw);
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
    fn test_top_level_array() {
        let raw = json!([
            {"id": "s-1", "name": "Cola", "price": 2.0, "stock": 3},
            {"id": "s-2", "name": "Mate", "price": 2.5, "stock": 0}
        ]);
        let products = normalize_catalog(&raw);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "s-1");
        assert_eq!(products[1].stock, 0);
    }

    #[test]
    fn test_first_wrapper_key_wins_without_merging() {
        let raw = json!({
            "results": [{"id": "from-results"}],
            "items": [{"id": "from-items"}]
        });
        let products = normalize_catalog(&raw);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "from-results");
    }

    #[test]
    fn test_keyed_object_uses_map_keys_as_fallback_ids() {
        let raw = json!({
            "31869": {"designation": "Super Plus", "prices": [{"unitprice": "2,10"}]},
            "34722": {"articleid": "FU_Test1", "designation": "Testartikel"}
        });
        let mut products = normalize_catalog(&raw);
        products.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "31869");
        assert!((products[0].price - 2.1).abs() < f64::EPSILON);
        // An in-record id beats the positional key.
        assert_eq!(products[1].id, "FU_Test1");
        assert_eq!(products[1].slot, "FU_Test1");
    }

    #[test]
    fn test_record_without_id_is_dropped() {
        let raw = json!([
            {"name": "Namenlos", "price": 1.0},
            {"id": "ok", "name": "Gut"}
        ]);
        let products = normalize_catalog(&raw);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "ok");
    }

    #[test]
    fn test_dropped_plus_returned_never_exceeds_candidates() {
        let raw = json!([
            {"id": "a"},
            {"name": "no id"},
            "not even a record",
            {"id": "b", "deactivated": true}
        ]);
        let products = normalize_catalog(&raw);
        // 4 candidates: one kept, three dropped/filtered.
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_malformed_price_and_stock_degrade_to_zero() {
        let raw = json!([{"id": "x", "price": "kostenlos", "stock": "-3"}]);
        let products = normalize_catalog(&raw);
        assert!((products[0].price - 0.0).abs() < f64::EPSILON);
        assert_eq!(products[0].stock, 0);
    }

    #[test]
    fn test_thousands_spaces_and_comma_decimals() {
        let raw = json!([{"id": "x", "price": "1 234,50", "stock": "12"}]);
        let products = normalize_catalog(&raw);
        assert!((products[0].price - 1234.5).abs() < f64::EPSILON);
        assert_eq!(products[0].stock, 12);
    }

    #[test]
    fn test_price_alias_order_and_nested_fallback() {
        let product =
            normalize_product(&json!({"id": "x", "cost": "3,20", "unitPrice": 9.99}), None)
                .unwrap();
        assert!((product.price - 3.2).abs() < f64::EPSILON);

        let product = normalize_product(
            &json!({"id": "x", "prices": [{"unitprice": "1,10"}, {"unitprice": "9,90"}]}),
            None,
        )
        .unwrap();
        assert!((product.price - 1.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deactivated_records_are_filtered() {
        let raw = json!([
            {"id": "on", "isActive": true},
            {"id": "off", "isActive": false},
            {"id": "dead", "deactivated": true},
            {"id": "legacy-off", "active": "false"}
        ]);
        let products = normalize_catalog(&raw);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["on"]);
    }

    #[test]
    fn test_expired_valid_to_deactivates() {
        let raw = json!([
            {"id": "expired", "validto": "2019-01-01"},
            {"id": "current", "validto": "9999-12-31"},
            {"id": "unparseable", "validto": "bald"}
        ]);
        let products = normalize_catalog(&raw);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        // Unparseable dates never deactivate.
        assert_eq!(ids, ["current", "unparseable"]);
    }

    #[test]
    fn test_nested_price_list_valid_to() {
        let raw = json!([
            {"id": "old", "prices": [{"unitprice": "2,00", "validto": "2020-06-30"}]}
        ]);
        assert!(normalize_catalog(&raw).is_empty());
    }

    #[test]
    fn test_category_from_dict_value() {
        let product = normalize_product(
            &json!({"id": "x", "category": {"name": "Getränke"}}),
            None,
        )
        .unwrap();
        assert_eq!(product.category, "Getränke");
    }

    #[test]
    fn test_allergens_collected() {
        let product = normalize_product(
            &json!({"id": "x", "allergens": ["Hafer", " Nüsse ", ""]}),
            None,
        )
        .unwrap();
        let allergens = product.allergens.unwrap();
        assert!(allergens.contains("Hafer"));
        assert!(allergens.contains("Nüsse"));
        assert_eq!(allergens.len(), 2);
    }

    #[test]
    fn test_non_structured_payload_yields_empty() {
        assert!(normalize_catalog(&json!(null)).is_empty());
        assert!(normalize_catalog(&json!("Connection error")).is_empty());
        assert!(normalize_catalog(&json!(17)).is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = json!({
            "results": [
                {"itemId": "A1", "designation": "Bar", "price": "1,80", "stock": "6"},
                {"row": "B2", "name": "Shake", "price": 2.5, "stock": 4, "currency": "EUR"}
            ]
        });
        let first = normalize_catalog(&raw);
        let refed = serde_json::to_value(&first).unwrap();
        let second = normalize_catalog(&refed);
        assert_eq!(first, second);
    }
}

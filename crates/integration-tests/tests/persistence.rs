//! Restoring the cart across sessions and surviving bad storage.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use serde_json::json;
use shopfront_core::{PriceFormat, ProductId};
use shopfront_integration_tests::{fixture_catalog, product, seeded_store, storefront, stored_cart};
use shopfront_storefront::storage::keys;
use shopfront_storefront::{
    CartStorage, CartStore, Catalog, FileStore, KeyValueStore, MemoryStore, Storefront,
};

const TOTE: ProductId = ProductId::new(1);
const MUG: ProductId = ProductId::new(2);

#[test]
fn new_session_restores_saved_cart() {
    let mut first = storefront(MemoryStore::new());
    first.add_item(MUG, 2).unwrap();
    first.add_item(TOTE, 1).unwrap();

    let second = storefront(first.cart().storage().store().clone());
    assert_eq!(second.cart().lines(), first.cart().lines());
    assert_eq!(second.cart().total_price(), first.cart().total_price());
}

#[test]
fn high_precision_prices_restore_exactly() {
    let priced = |id: i32, price: &str| {
        let mut p = product(id, "Precise", 0, 0);
        p.list_price = price.parse().unwrap();
        p.sale_price = p.list_price;
        p
    };
    let catalog = Catalog::new(vec![
        priced(1, "12345678901234567.89"),
        priced(2, "0.1234567890123456789"),
    ])
    .unwrap();

    let mut shop = Storefront::new(
        catalog.clone(),
        CartStorage::new(MemoryStore::new()),
        PriceFormat::default(),
    );
    shop.add_item(TOTE, 3).unwrap();
    shop.add_item(MUG, 1).unwrap();

    let reopened = Storefront::new(
        catalog,
        CartStorage::new(shop.cart().storage().store().clone()),
        PriceFormat::default(),
    );
    assert_eq!(reopened.cart().lines(), shop.cart().lines());
    assert_eq!(reopened.cart().total_price(), shop.cart().total_price());
}

#[test]
fn restored_lines_keep_their_snapshot() {
    let store = seeded_store(
        &json!([{
            "productId": 1,
            "displayName": "Canvas Tote (old)",
            "unitPrice": 250,
            "imageRef": "old.png",
            "quantity": 2
        }])
        .to_string(),
    );

    let shop = storefront(store);
    let line = shop.cart().line(TOTE).unwrap();
    assert_eq!(line.display_name, "Canvas Tote (old)");
    assert_eq!(line.unit_price, Decimal::new(250, 0));
    assert_eq!(shop.cart().total_price(), Decimal::new(500, 0));
}

#[test]
fn garbage_value_starts_empty_and_is_replaced_on_next_change() {
    let shop = storefront(seeded_store("{not json"));
    assert!(shop.cart().is_empty());
    assert_eq!(
        shop.cart().storage().store().get(keys::CART).unwrap().as_deref(),
        Some("{not json")
    );

    let mut shop = shop;
    shop.add_item(TOTE, 1).unwrap();
    assert_eq!(stored_cart(shop.cart().storage().store())[0]["productId"], 1);
}

#[test]
fn records_breaking_cart_rules_are_discarded() {
    let record = |id: i64, quantity: i64| {
        json!({
            "productId": id,
            "displayName": "X",
            "unitPrice": 1,
            "imageRef": "x.png",
            "quantity": quantity
        })
    };

    for raw in [
        json!([record(1, 150)]),
        json!([record(1, 0)]),
        json!([record(0, 1)]),
        json!([record(1, 1), record(1, 2)]),
        json!({"productId": 1}),
    ] {
        let shop = storefront(seeded_store(&raw.to_string()));
        assert!(shop.cart().is_empty(), "accepted {raw}");
    }
}

#[test]
fn unavailable_storage_keeps_cart_in_memory() {
    let mut shop = storefront(MemoryStore::unavailable());
    let summary = shop.add_item(TOTE, 2).unwrap();

    assert!(!summary.persisted);
    assert!(shop.cart().is_persistence_degraded());
    assert_eq!(shop.cart().total_item_count(), 2);

    let confirmation = shop.checkout().unwrap();
    assert!(!confirmation.persisted);
    assert!(shop.cart().is_empty());
}

#[test]
fn quota_exceeded_is_not_fatal() {
    let mut shop = storefront(MemoryStore::with_quota(16));
    let summary = shop.add_item(MUG, 1).unwrap();

    assert!(!summary.persisted);
    assert_eq!(shop.cart().total_item_count(), 1);
    assert!(shop.cart().storage().store().is_empty());
}

#[test]
fn recovered_storage_receives_full_cart() {
    let storage = CartStorage::new(MemoryStore::unavailable());
    let mut cart = CartStore::open(fixture_catalog(), storage);
    cart.add_item(TOTE, 1).unwrap();
    assert!(cart.is_persistence_degraded());

    cart.storage_mut().store_mut().set_available(true);
    let summary = cart.add_item(MUG, 1).unwrap();

    assert!(summary.persisted);
    assert!(!cart.is_persistence_degraded());
    let stored = stored_cart(cart.storage().store());
    assert_eq!(stored.as_array().unwrap().len(), 2);
}

#[test]
fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cart.json");

    let mut shop = storefront(FileStore::new(&path));
    shop.add_item(TOTE, 3).unwrap();
    shop.add_item(MUG, 1).unwrap();
    shop.remove_item(MUG);
    drop(shop);

    let shop = storefront(FileStore::new(&path));
    assert_eq!(shop.cart().lines().len(), 1);
    assert_eq!(shop.cart().line(TOTE).unwrap().quantity.get(), 3);
}

#[test]
fn malformed_file_is_replaced_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    std::fs::write(&path, "definitely not a map").unwrap();

    let mut shop = storefront(FileStore::new(&path));
    assert!(shop.cart().is_empty());

    let summary = shop.add_item(TOTE, 1).unwrap();
    assert!(summary.persisted);

    let reloaded = storefront(FileStore::new(&path));
    assert_eq!(reloaded.cart().total_item_count(), 1);
}

#[test]
fn custom_key_is_isolated() {
    let mut cart = CartStore::open(
        fixture_catalog(),
        CartStorage::with_key(MemoryStore::new(), "guestCart"),
    );
    cart.add_item(TOTE, 1).unwrap();

    let store = cart.storage().store();
    assert!(store.get(keys::CART).unwrap().is_none());
    assert!(store.get("guestCart").unwrap().is_some());
}

//! Integration tests for Shopfront.
//!
//! Exercises the storefront end to end through its public API: cart
//! mutations, persistence across sessions, navigation and checkout.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Shopper flows against an in-memory store
//! - `persistence` - Restoring, corrupting and failing storage
//! - `properties` - Property-based cart invariants

use rust_decimal::Decimal;
use shopfront_core::{PriceFormat, Product, ProductId};
use shopfront_storefront::{
    CartStorage, Catalog, KeyValueStore, MemoryStore, Storefront, storage::keys,
};

/// A product with whole-unit prices.
#[must_use]
pub fn product(id: i32, name: &str, list_price: i64, sale_price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        list_price: Decimal::new(list_price, 0),
        sale_price: Decimal::new(sale_price, 0),
        image_ref: format!("./images/{id}.png"),
        description: format!("{name} for testing"),
    }
}

/// Small catalog with one product priced 299.00 and one with cents.
///
/// # Panics
///
/// Never; the fixture products are valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixture_catalog() -> Catalog {
    let mut cents = product(2, "Enamel Mug", 15, 0);
    cents.list_price = Decimal::new(1550, 2);
    cents.sale_price = Decimal::new(1299, 2);

    Catalog::new(vec![
        product(1, "Canvas Tote", 399, 299),
        cents,
        product(3, "Desk Lamp", 1200, 1200),
    ])
    .unwrap()
}

/// A session over the fixture catalog with rupee formatting.
#[must_use]
pub fn storefront<S: KeyValueStore>(store: S) -> Storefront<S> {
    Storefront::new(fixture_catalog(), CartStorage::new(store), PriceFormat::new("₹"))
}

/// The raw cart value in `store`, parsed as JSON.
///
/// # Panics
///
/// Panics if nothing is stored or the value is not JSON.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn stored_cart<S: KeyValueStore>(store: &S) -> serde_json::Value {
    let raw = store.get(keys::CART).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

/// A store already holding `raw` under the cart key.
///
/// # Panics
///
/// Never; an unlimited memory store accepts any value.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn seeded_store(raw: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.set(keys::CART, raw).unwrap();
    store
}

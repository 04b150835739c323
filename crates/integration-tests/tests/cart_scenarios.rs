//! Shopper flows through the public storefront API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use serde_json::json;
use shopfront_core::ProductId;
use shopfront_integration_tests::{storefront, stored_cart};
use shopfront_storefront::{
    AppError, CartError, CheckoutError, Destination, MemoryStore, NavigationError, View, ViewKind,
    views,
};

const TOTE: ProductId = ProductId::new(1);
const MUG: ProductId = ProductId::new(2);
const LAMP: ProductId = ProductId::new(3);

#[test]
fn adding_twice_merges_into_one_line() {
    let mut shop = storefront(MemoryStore::new());
    shop.add_item(TOTE, 2).unwrap();
    let summary = shop.add_item(TOTE, 3).unwrap();

    let lines = shop.cart().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, TOTE);
    assert_eq!(lines[0].quantity.get(), 5);
    assert_eq!(shop.cart().total_item_count(), 5);
    assert_eq!(summary.item_count, 5);
    assert_eq!(summary.line_count, 1);
}

#[test]
fn setting_zero_removes_the_line() {
    let mut shop = storefront(MemoryStore::new());
    shop.add_item(TOTE, 5).unwrap();
    let summary = shop.set_quantity(TOTE, 0);

    assert!(shop.cart().lines().is_empty());
    assert_eq!(summary.total, Decimal::ZERO);
}

#[test]
fn merged_quantity_stops_at_ninety_nine() {
    let mut shop = storefront(MemoryStore::new());
    shop.add_item(MUG, 60).unwrap();
    shop.add_item(MUG, 60).unwrap();
    assert_eq!(shop.cart().line(MUG).unwrap().quantity.get(), 99);

    shop.increase_quantity(MUG);
    assert_eq!(shop.cart().line(MUG).unwrap().quantity.get(), 99);
}

#[test]
fn rejected_adds_leave_cart_and_storage_alone() {
    let mut shop = storefront(MemoryStore::new());
    shop.add_item(TOTE, 1).unwrap();
    let before = stored_cart(shop.cart().storage().store());

    assert!(matches!(
        shop.add_item(ProductId::new(404), 1),
        Err(CartError::NotFound(_))
    ));
    assert!(matches!(
        shop.add_item(TOTE, 0),
        Err(CartError::InvalidQuantity(_))
    ));
    assert!(matches!(
        shop.add_item(TOTE, 100),
        Err(CartError::InvalidQuantity(_))
    ));

    assert_eq!(shop.cart().total_item_count(), 1);
    assert_eq!(stored_cart(shop.cart().storage().store()), before);
}

#[test]
fn lines_keep_first_add_order() {
    let mut shop = storefront(MemoryStore::new());
    shop.add_item(LAMP, 1).unwrap();
    shop.add_item(TOTE, 1).unwrap();
    shop.add_item(LAMP, 1).unwrap();
    shop.add_item(MUG, 1).unwrap();

    let order: Vec<ProductId> = shop.cart().lines().iter().map(|l| l.product_id).collect();
    assert_eq!(order, vec![LAMP, TOTE, MUG]);
}

#[test]
fn total_is_exact_over_cents() {
    let mut shop = storefront(MemoryStore::new());
    shop.add_item(MUG, 3).unwrap();
    shop.add_item(TOTE, 1).unwrap();

    // 3 x 12.99 + 299
    assert_eq!(shop.cart().total_price(), Decimal::new(33797, 2));
    assert_eq!(shop.price_format().format(shop.cart().total_price()), "₹337.97");
}

#[test]
fn every_mutation_is_written_through() {
    let mut shop = storefront(MemoryStore::new());
    shop.add_item(TOTE, 2).unwrap();
    shop.add_item(LAMP, 1).unwrap();
    shop.decrease_quantity(TOTE);

    assert_eq!(
        stored_cart(shop.cart().storage().store()),
        json!([
            {
                "productId": 1,
                "displayName": "Canvas Tote",
                "unitPrice": 299,
                "imageRef": "./images/1.png",
                "quantity": 1
            },
            {
                "productId": 3,
                "displayName": "Desk Lamp",
                "unitPrice": 1200,
                "imageRef": "./images/3.png",
                "quantity": 1
            }
        ])
    );

    shop.remove_item(LAMP);
    shop.remove_item(TOTE);
    assert_eq!(stored_cart(shop.cart().storage().store()), json!([]));
}

#[test]
fn empty_checkout_is_refused() {
    let mut shop = storefront(MemoryStore::new());
    shop.go_to(Destination::Cart).unwrap();

    let err = shop.checkout().unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
    assert!(shop.cart().is_empty());
    assert!(shop.navigator().is_visible(ViewKind::Cart));
}

#[test]
fn checkout_clears_cart_and_returns_to_catalog() {
    let mut shop = storefront(MemoryStore::new());
    shop.add_item(TOTE, 1).unwrap();
    shop.go_to(Destination::Cart).unwrap();

    let confirmation = shop.checkout().unwrap();
    assert_eq!(confirmation.total, Decimal::new(299, 0));
    assert!(confirmation.persisted);
    assert!(
        confirmation
            .message(shop.price_format())
            .contains("Your total amount of ₹299.00 has been successfully processed.")
    );

    assert!(shop.cart().lines().is_empty());
    assert_eq!(shop.view(), View::Catalog);
    assert_eq!(stored_cart(shop.cart().storage().store()), json!([]));
}

#[test]
fn detail_view_stepper_then_add() {
    let mut shop = storefront(MemoryStore::new());
    shop.go_to(Destination::ProductDetail(MUG)).unwrap();
    shop.step_up().unwrap();
    shop.step_up().unwrap();

    let summary = shop.add_selected_to_cart().unwrap();
    assert_eq!(summary.item_count, 3);
    assert_eq!(shop.view(), View::Catalog);

    let text = views::render(&shop).unwrap();
    assert!(text.contains("Cart (3)"));
}

#[test]
fn detail_view_only_opens_from_catalog() {
    let mut shop = storefront(MemoryStore::new());
    shop.go_to(Destination::Cart).unwrap();

    let err = shop.go_to(Destination::ProductDetail(TOTE)).unwrap_err();
    assert_eq!(
        err,
        NavigationError::InvalidTransition {
            from: ViewKind::Cart,
            to: ViewKind::ProductDetail,
        }
    );
    assert_eq!(shop.view(), View::Cart);

    let err = shop.add_selected_to_cart().unwrap_err();
    assert!(matches!(
        err,
        AppError::Navigation(NavigationError::NotOnProductDetail)
    ));
}

#[test]
fn cart_view_reflects_state() {
    let mut shop = storefront(MemoryStore::new());
    shop.go_to(Destination::Cart).unwrap();
    let empty = views::cart_view(&shop);
    assert!(empty.items.is_empty());
    assert!(!empty.checkout_enabled);
    assert_eq!(empty.subtotal, "₹0.00");

    shop.add_item(LAMP, 2).unwrap();
    let view = views::cart_view(&shop);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].line_price, "₹2400.00");
    assert!(view.checkout_enabled);
}

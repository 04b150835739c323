//! Simulated checkout.
//!
//! There is no payment: checkout quotes the total, empties the cart (which
//! writes the empty cart through to storage) and returns to the catalog.

use rust_decimal::Decimal;
use shopfront_core::PriceFormat;
use thiserror::Error;
use tracing::instrument;

use crate::cart::CartStore;
use crate::navigation::{Destination, Navigator};
use crate::storage::KeyValueStore;

/// Errors that can occur during checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("Your cart is empty. Please add items before checking out.")]
    EmptyCart,
}

/// What was committed by a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Exact order total.
    pub total: Decimal,
    /// Units purchased.
    pub item_count: u32,
    /// Distinct products purchased.
    pub line_count: usize,
    /// Whether the emptied cart reached storage.
    pub persisted: bool,
}

impl OrderConfirmation {
    /// The message shown to the shopper.
    #[must_use]
    pub fn message(&self, format: &PriceFormat) -> String {
        format!(
            "Order Confirmed!\n\n\
             Thank you for your purchase.\n\
             Your total amount of {} has been successfully processed.\n\
             We will now prepare your items for shipment.\n\n\
             Happy shopping!",
            format.format(self.total)
        )
    }
}

/// Commit the cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines; nothing
/// changes in that case.
#[instrument(skip_all)]
pub fn checkout<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    navigator: &mut Navigator,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        tracing::info!("Checkout attempted with empty cart");
        return Err(CheckoutError::EmptyCart);
    }

    let total = cart.total_price();
    let item_count = cart.total_item_count();
    let line_count = cart.lines().len();

    let summary = cart.clear();
    // Catalog is reachable from every view.
    if let Err(e) = navigator.go_to(Destination::Catalog) {
        tracing::error!(error = %e, "Failed to return to catalog after checkout");
    }

    tracing::info!(%total, item_count, line_count, "Checkout complete");
    Ok(OrderConfirmation {
        total,
        item_count,
        line_count,
        persisted: summary.persisted,
    })
}

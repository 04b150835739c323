//! Cart line record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;
use super::quantity::Quantity;

/// One product's entry in the cart.
///
/// Name, price and image are copied from the [`Product`] when the line is
/// created, so later catalog changes never rewrite what the shopper already
/// put in the cart.
///
/// The serialized form is the persisted cart record: exactly the fields
/// `productId`, `displayName`, `unitPrice`, `imageRef` and `quantity`, with
/// the price as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at add time.
    pub display_name: String,
    /// Sale price at add time.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    /// Product image at add time.
    pub image_ref: String,
    /// Units of the product, always within 1-99.
    pub quantity: Quantity,
}

impl CartLine {
    /// Snapshot a product into a new line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: Quantity) -> Self {
        Self {
            product_id: product.id,
            display_name: product.name.clone(),
            unit_price: product.sale_price,
            image_ref: product.image_ref.clone(),
            quantity,
        }
    }

    /// `unit_price * quantity`, exact.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity.get())
    }
}

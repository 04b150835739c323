//! Catalog product record.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product offered in the catalog.
///
/// Products are created once from static configuration and never mutated.
/// The cart never holds a `Product`; it snapshots the fields it needs into a
/// [`CartLine`](super::CartLine) at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, strictly positive identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Regular price before discount.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub list_price: Decimal,
    /// Price actually charged; never above `list_price`.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub sale_price: Decimal,
    /// Image path or URL.
    pub image_ref: String,
    /// Long-form description shown on the detail view.
    pub description: String,
}

impl Product {
    /// How much the sale price saves against the list price.
    #[must_use]
    pub fn discount_amount(&self) -> Decimal {
        self.list_price - self.sale_price
    }

    /// Discount as a whole percentage of the list price.
    ///
    /// A zero list price has no meaningful discount and yields 0.
    #[must_use]
    pub fn discount_percentage(&self) -> u32 {
        if self.list_price.is_zero() {
            return 0;
        }
        (self.discount_amount() / self.list_price * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }

    /// Whether the product is currently sold below its list price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.sale_price < self.list_price
    }
}

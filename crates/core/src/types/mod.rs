//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart_line;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart_line::CartLine;
pub use id::*;
pub use price::{CurrencyCode, PriceFormat, UnknownCurrency};
pub use product::Product;
pub use quantity::{Quantity, QuantityError};

//! View navigation.
//!
//! Exactly one of three views is visible at a time:
//!
//! ```text
//!            go_to(Catalog)            go_to(Cart)
//!   ┌──────────────────────────┐  ┌──────────────────┐
//!   ▼                          │  │                  ▼
//! Catalog ──go_to(Product)──▶ ProductDetail ──────▶ Cart
//!   ▲                                              │
//!   └──────────────────go_to(Catalog)──────────────┘
//! ```
//!
//! Product detail can only be entered from the catalog. The navigator holds no
//! business rules; it only knows which view is showing and, on the detail
//! view, which quantity the stepper has selected.

use core::fmt;

use shopfront_core::{ProductId, Quantity};
use thiserror::Error;

use crate::catalog::Catalog;

/// Errors returned by navigation. The current view is unchanged when they occur.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// The product to inspect does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The destination cannot be reached from the current view.
    #[error("Cannot open {to} from {from}")]
    InvalidTransition { from: ViewKind, to: ViewKind },

    /// A detail-view action was used on another view.
    #[error("Not viewing a product")]
    NotOnProductDetail,
}

/// Which screen a view is, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Catalog,
    ProductDetail,
    Cart,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Catalog => "catalog",
            Self::ProductDetail => "product detail",
            Self::Cart => "cart",
        })
    }
}

/// The visible view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Catalog,
    ProductDetail {
        product_id: ProductId,
        /// Quantity selected with the detail-view stepper.
        quantity: Quantity,
    },
    Cart,
}

impl View {
    /// The kind of screen.
    #[must_use]
    pub const fn kind(&self) -> ViewKind {
        match self {
            Self::Catalog => ViewKind::Catalog,
            Self::ProductDetail { .. } => ViewKind::ProductDetail,
            Self::Cart => ViewKind::Cart,
        }
    }
}

/// Where a gesture asks to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Catalog,
    ProductDetail(ProductId),
    Cart,
}

impl Destination {
    const fn kind(self) -> ViewKind {
        match self {
            Self::Catalog => ViewKind::Catalog,
            Self::ProductDetail(_) => ViewKind::ProductDetail,
            Self::Cart => ViewKind::Cart,
        }
    }
}

/// Tracks the visible view.
#[derive(Debug, Clone)]
pub struct Navigator {
    catalog: Catalog,
    current: View,
}

impl Navigator {
    /// Start on the catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            current: View::Catalog,
        }
    }

    /// The visible view.
    #[must_use]
    pub const fn current(&self) -> View {
        self.current
    }

    /// Whether `kind` is the visible view. True for exactly one kind.
    #[must_use]
    pub fn is_visible(&self, kind: ViewKind) -> bool {
        self.current.kind() == kind
    }

    /// Show another view.
    ///
    /// Entering product detail resets the stepper to one unit.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidTransition`] when opening a product
    /// from anywhere but the catalog, and [`NavigationError::NotFound`] when
    /// the product does not exist.
    pub fn go_to(&mut self, destination: Destination) -> Result<View, NavigationError> {
        let next = match destination {
            Destination::Catalog => View::Catalog,
            Destination::Cart => View::Cart,
            Destination::ProductDetail(product_id) => {
                if self.current.kind() != ViewKind::Catalog {
                    return Err(NavigationError::InvalidTransition {
                        from: self.current.kind(),
                        to: destination.kind(),
                    });
                }
                if !self.catalog.contains(product_id) {
                    return Err(NavigationError::NotFound(product_id));
                }
                View::ProductDetail {
                    product_id,
                    quantity: Quantity::ONE,
                }
            }
        };

        tracing::debug!(from = %self.current.kind(), to = %next.kind(), "Navigate");
        self.current = next;
        Ok(next)
    }

    /// Raise the detail-view quantity by one, stopping at 99.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotOnProductDetail`] on any other view.
    pub fn step_up(&mut self) -> Result<Quantity, NavigationError> {
        self.step(Quantity::incremented)
    }

    /// Lower the detail-view quantity by one, stopping at 1.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotOnProductDetail`] on any other view.
    pub fn step_down(&mut self) -> Result<Quantity, NavigationError> {
        self.step(Quantity::decremented)
    }

    fn step(&mut self, f: impl FnOnce(Quantity) -> Quantity) -> Result<Quantity, NavigationError> {
        match &mut self.current {
            View::ProductDetail { quantity, .. } => {
                *quantity = f(*quantity);
                Ok(*quantity)
            }
            _ => Err(NavigationError::NotOnProductDetail),
        }
    }
}

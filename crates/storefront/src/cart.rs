//! Cart store.
//!
//! Owns the authoritative in-memory cart. Every mutation is written through
//! to [`CartStorage`] before it returns; a failed write is logged and the
//! cart keeps working in memory, so the session degrades to memory-only
//! instead of failing.
//!
//! # Merge policy
//!
//! Adding a product that is already in the cart increases the existing line.
//! The merged quantity is clamped at [`Quantity::MAX`]; nothing is rejected.

use rust_decimal::Decimal;
use shopfront_core::{CartLine, ProductId, Quantity, QuantityError};
use thiserror::Error;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::storage::{CartStorage, KeyValueStore, StorageError};

/// Errors returned by cart mutations. The cart is unchanged when they occur.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product id does not exist in the catalog.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The requested quantity is outside 1-99.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),
}

/// State of the cart after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of distinct products.
    pub line_count: usize,
    /// Sum of quantities.
    pub item_count: u32,
    /// Exact sum of line subtotals.
    pub total: Decimal,
    /// Whether the write-through reached storage.
    pub persisted: bool,
}

/// The shopper's cart with write-through persistence.
#[derive(Debug)]
pub struct CartStore<S> {
    catalog: Catalog,
    storage: CartStorage<S>,
    lines: Vec<CartLine>,
    degraded: bool,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Restore the cart from storage.
    ///
    /// A corrupt or unreadable stored cart is logged and replaced by an
    /// empty cart; the stored value is left alone until the next mutation.
    pub fn open(catalog: Catalog, storage: CartStorage<S>) -> Self {
        let loaded = storage.load();
        if let Some(problem) = &loaded.problem {
            match problem {
                StorageError::Corrupt(_) => {
                    tracing::warn!(key = storage.key(), error = %problem, "Discarding corrupt cart state");
                }
                _ => {
                    tracing::warn!(key = storage.key(), error = %problem, "Could not read saved cart, starting empty");
                }
            }
        } else {
            tracing::debug!(lines = loaded.lines.len(), "Restored cart");
        }

        Self {
            catalog,
            storage,
            lines: loaded.lines,
            degraded: false,
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into an existing line (clamped at 99) or appends a new line
    /// snapshotting the product's name, sale price and image.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is outside 1-99 and
    /// [`CartError::NotFound`] if the product does not exist.
    #[instrument(skip(self))]
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartSummary, CartError> {
        let quantity = Quantity::new(quantity)?;
        let product = self
            .catalog
            .get(product_id)
            .ok_or(CartError::NotFound(product_id))?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            if line.quantity.get() + quantity.get() > Quantity::MAX {
                tracing::debug!(%product_id, "Merged quantity clamped at maximum");
            }
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine::from_product(product, quantity));
        }

        tracing::info!(%product_id, %quantity, "Added to cart");
        Ok(self.write_through())
    }

    /// Set a line's quantity.
    ///
    /// Unknown products are ignored. `new_quantity <= 0` removes the line;
    /// anything above 99 is clamped to 99.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, product_id: ProductId, new_quantity: i64) -> CartSummary {
        let Some(index) = self.position(product_id) else {
            return self.summary(!self.degraded);
        };

        match Quantity::clamped(new_quantity) {
            Some(quantity) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = quantity;
                }
                self.write_through()
            }
            None => self.remove_item(product_id),
        }
    }

    /// One more unit of an existing line, stopping at 99.
    pub fn increase_quantity(&mut self, product_id: ProductId) -> CartSummary {
        let current = self.quantity_of(product_id);
        self.set_quantity(product_id, current + 1)
    }

    /// One less unit of an existing line; the line is removed at zero.
    pub fn decrease_quantity(&mut self, product_id: ProductId) -> CartSummary {
        let current = self.quantity_of(product_id);
        self.set_quantity(product_id, current - 1)
    }

    /// Remove a product's line if present.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) -> CartSummary {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() < before {
            tracing::info!(%product_id, "Removed from cart");
        }
        self.write_through()
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> CartSummary {
        self.lines.clear();
        self.write_through()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity.get()).sum()
    }

    /// Exact sum of `unit_price * quantity`.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for one product, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the last write-through failed.
    #[must_use]
    pub const fn is_persistence_degraded(&self) -> bool {
        self.degraded
    }

    /// The storage adapter.
    #[must_use]
    pub const fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }

    /// Mutable access to the storage adapter.
    pub const fn storage_mut(&mut self) -> &mut CartStorage<S> {
        &mut self.storage
    }

    /// Current totals without mutating anything.
    #[must_use]
    pub fn current_summary(&self) -> CartSummary {
        self.summary(!self.degraded)
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }

    fn quantity_of(&self, product_id: ProductId) -> i64 {
        self.line(product_id)
            .map_or(0, |l| i64::from(l.quantity.get()))
    }

    fn summary(&self, persisted: bool) -> CartSummary {
        CartSummary {
            line_count: self.lines.len(),
            item_count: self.total_item_count(),
            total: self.total_price(),
            persisted,
        }
    }

    fn write_through(&mut self) -> CartSummary {
        let persisted = match self.storage.save(&self.lines) {
            Ok(()) => {
                if self.degraded {
                    tracing::info!("Cart persistence recovered");
                }
                self.degraded = false;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cart not persisted, continuing in memory");
                self.degraded = true;
                false
            }
        };
        self.summary(persisted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, keys};

    fn store() -> CartStore<MemoryStore> {
        CartStore::open(Catalog::builtin(), CartStorage::new(MemoryStore::new()))
    }

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    fn persisted(cart: &CartStore<MemoryStore>) -> String {
        cart.storage().store().get(keys::CART).unwrap().unwrap()
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = store();
        cart.add_item(id(1), 2).unwrap();
        let summary = cart.add_item(id(1), 3).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity.get(), 5);
        assert_eq!(cart.total_item_count(), 5);
        assert_eq!(summary.item_count, 5);
        assert_eq!(summary.line_count, 1);
        assert!(summary.persisted);
    }

    #[test]
    fn test_add_clamps_merge_at_max() {
        let mut cart = store();
        cart.add_item(id(2), 60).unwrap();
        cart.add_item(id(2), 60).unwrap();
        assert_eq!(cart.line(id(2)).unwrap().quantity.get(), 99);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = store();
        cart.add_item(id(3), 1).unwrap();
        cart.add_item(id(1), 1).unwrap();
        cart.add_item(id(3), 1).unwrap();

        let order: Vec<i32> = cart.lines().iter().map(|l| l.product_id.as_i32()).collect();
        assert_eq!(order, [3, 1]);
    }

    #[test]
    fn test_add_rejects_unknown_product() {
        let mut cart = store();
        let err = cart.add_item(id(42), 1).unwrap_err();
        assert!(matches!(err, CartError::NotFound(p) if p == id(42)));
        assert!(cart.is_empty());
        assert!(cart.storage().store().get(keys::CART).unwrap().is_none());
    }

    #[test]
    fn test_add_rejects_invalid_quantity() {
        let mut cart = store();
        assert!(matches!(
            cart.add_item(id(1), 0),
            Err(CartError::InvalidQuantity(_))
        ));
        assert!(matches!(
            cart.add_item(id(1), 100),
            Err(CartError::InvalidQuantity(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_snapshots_sale_price() {
        let mut cart = store();
        cart.add_item(id(1), 1).unwrap();
        let line = cart.line(id(1)).unwrap();
        assert_eq!(line.unit_price, Decimal::new(2599, 0));
        assert_eq!(line.display_name, "Classic Denim Jacket");
        assert_eq!(line.image_ref, "./img/image.png");
    }

    #[test]
    fn test_set_quantity_zero_matches_remove() {
        let mut a = store();
        let mut b = store();
        for cart in [&mut a, &mut b] {
            cart.add_item(id(1), 5).unwrap();
            cart.add_item(id(2), 1).unwrap();
        }

        a.set_quantity(id(1), 0);
        b.remove_item(id(1));

        assert_eq!(a.lines(), b.lines());
        assert_eq!(persisted(&a), persisted(&b));
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = store();
        cart.add_item(id(1), 5).unwrap();
        cart.set_quantity(id(1), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_clamps_and_ignores_unknown() {
        let mut cart = store();
        cart.add_item(id(1), 5).unwrap();
        cart.set_quantity(id(1), 500);
        assert_eq!(cart.line(id(1)).unwrap().quantity.get(), 99);

        let summary = cart.set_quantity(id(4), 3);
        assert!(cart.line(id(4)).is_none());
        assert_eq!(summary.line_count, 1);
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut cart = store();
        cart.add_item(id(3), 1).unwrap();
        cart.increase_quantity(id(3));
        assert_eq!(cart.line(id(3)).unwrap().quantity.get(), 2);

        cart.decrease_quantity(id(3));
        cart.decrease_quantity(id(3));
        assert!(cart.line(id(3)).is_none());

        // No line: nothing happens.
        cart.increase_quantity(id(3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = store();
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert_eq!(cart.total_item_count(), 0);

        cart.add_item(id(1), 2).unwrap(); // 2 x 2599
        cart.add_item(id(3), 1).unwrap(); // 1 x 2999
        assert_eq!(cart.total_price(), Decimal::new(8197, 0));
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_clear_writes_empty_array() {
        let mut cart = store();
        cart.add_item(id(1), 2).unwrap();
        let summary = cart.clear();
        assert!(cart.is_empty());
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(persisted(&cart), "[]");
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let mut cart = store();
        cart.add_item(id(2), 1).unwrap();
        let restored = CartStore::open(Catalog::builtin(), CartStorage::new(cart.storage().store().clone()));
        assert_eq!(restored.lines(), cart.lines());

        cart.increase_quantity(id(2));
        let restored = CartStore::open(Catalog::builtin(), CartStorage::new(cart.storage().store().clone()));
        assert_eq!(restored.line(id(2)).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_failed_write_degrades_to_memory() {
        let mut cart = CartStore::open(
            Catalog::builtin(),
            CartStorage::new(MemoryStore::unavailable()),
        );
        let summary = cart.add_item(id(1), 1).unwrap();
        assert!(!summary.persisted);
        assert!(cart.is_persistence_degraded());
        assert_eq!(cart.total_item_count(), 1);

        cart.storage_mut().store_mut().set_available(true);
        let summary = cart.add_item(id(1), 1).unwrap();
        assert!(summary.persisted);
        assert!(!cart.is_persistence_degraded());
        assert!(persisted(&cart).contains("\"quantity\":2"));
    }

    #[test]
    fn test_open_discards_corrupt_state() {
        let mut backing = MemoryStore::new();
        backing.set(keys::CART, "not json at all").unwrap();
        let cart = CartStore::open(Catalog::builtin(), CartStorage::new(backing));
        assert!(cart.is_empty());
        // Left in place until the next mutation.
        assert_eq!(persisted(&cart), "not json at all");
    }

    #[test]
    fn test_snapshot_survives_catalog_change() {
        let mut backing = MemoryStore::new();
        {
            let mut cart = CartStore::open(Catalog::builtin(), CartStorage::new(backing.clone()));
            cart.add_item(id(1), 1).unwrap();
            backing = cart.storage().store().clone();
        }

        let mut repriced: Vec<_> = Catalog::builtin().products().to_vec();
        repriced[0].sale_price = Decimal::new(1, 0);
        repriced[0].name = "Renamed".to_string();
        let cart = CartStore::open(Catalog::new(repriced).unwrap(), CartStorage::new(backing));

        let line = cart.line(id(1)).unwrap();
        assert_eq!(line.unit_price, Decimal::new(2599, 0));
        assert_eq!(line.display_name, "Classic Denim Jacket");
    }
}

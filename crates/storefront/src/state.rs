//! Storefront session state.
//!
//! [`Storefront`] is the composition root: it owns the catalog, the cart
//! store and the navigator for one shopper session and exposes every gesture
//! the presentation layer can forward. Nothing here is global; tests build as
//! many independent storefronts as they like.

use shopfront_core::{PriceFormat, ProductId, Quantity};

use crate::cart::{CartError, CartStore, CartSummary};
use crate::catalog::{Catalog, CatalogError};
use crate::checkout::{self, CheckoutError, OrderConfirmation};
use crate::config::StorefrontConfig;
use crate::error::add_breadcrumb;
use crate::navigation::{Destination, NavigationError, Navigator, View};
use crate::storage::{CartStorage, FileStore, KeyValueStore};

/// One shopper session.
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    cart: CartStore<S>,
    navigator: Navigator,
    price_format: PriceFormat,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Create a session, restoring the cart from `storage`.
    pub fn new(catalog: Catalog, storage: CartStorage<S>, price_format: PriceFormat) -> Self {
        let cart = CartStore::open(catalog.clone(), storage);
        let navigator = Navigator::new(catalog.clone());
        Self {
            catalog,
            cart,
            navigator,
            price_format,
        }
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Get a reference to the navigator.
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Get a reference to the display price format.
    #[must_use]
    pub const fn price_format(&self) -> &PriceFormat {
        &self.price_format
    }

    /// The visible view.
    #[must_use]
    pub const fn view(&self) -> View {
        self.navigator.current()
    }

    /// Show another view.
    ///
    /// # Errors
    ///
    /// See [`Navigator::go_to`].
    pub fn go_to(&mut self, destination: Destination) -> Result<View, NavigationError> {
        self.navigator.go_to(destination)
    }

    /// Add units of a product to the cart.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_item`].
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartSummary, CartError> {
        let summary = self.cart.add_item(product_id, quantity)?;
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[
                ("product_id", &product_id.to_string()),
                ("quantity", &quantity.to_string()),
            ]),
        );
        Ok(summary)
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> CartSummary {
        add_breadcrumb(
            "cart",
            "Set quantity",
            Some(&[
                ("product_id", &product_id.to_string()),
                ("quantity", &quantity.to_string()),
            ]),
        );
        self.cart.set_quantity(product_id, quantity)
    }

    /// The cart view's "+" button.
    pub fn increase_quantity(&mut self, product_id: ProductId) -> CartSummary {
        add_breadcrumb(
            "cart",
            "Increased quantity",
            Some(&[("product_id", &product_id.to_string())]),
        );
        self.cart.increase_quantity(product_id)
    }

    /// The cart view's "-" button.
    pub fn decrease_quantity(&mut self, product_id: ProductId) -> CartSummary {
        add_breadcrumb(
            "cart",
            "Decreased quantity",
            Some(&[("product_id", &product_id.to_string())]),
        );
        self.cart.decrease_quantity(product_id)
    }

    /// Remove a product from the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> CartSummary {
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", &product_id.to_string())]),
        );
        self.cart.remove_item(product_id)
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartSummary {
        add_breadcrumb("cart", "Cleared cart", None);
        self.cart.clear()
    }

    /// The detail view's "+" button.
    ///
    /// # Errors
    ///
    /// Fails unless a product is being viewed.
    pub fn step_up(&mut self) -> Result<Quantity, NavigationError> {
        self.navigator.step_up()
    }

    /// The detail view's "-" button.
    ///
    /// # Errors
    ///
    /// Fails unless a product is being viewed.
    pub fn step_down(&mut self) -> Result<Quantity, NavigationError> {
        self.navigator.step_down()
    }

    /// The detail view's "Add to Cart" button: add the selected quantity and
    /// return to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::Navigation`] unless a product is
    /// being viewed, or a cart error if the add is rejected.
    pub fn add_selected_to_cart(&mut self) -> crate::error::Result<CartSummary> {
        let View::ProductDetail {
            product_id,
            quantity,
        } = self.navigator.current()
        else {
            return Err(NavigationError::NotOnProductDetail.into());
        };

        let summary = self.add_item(product_id, i64::from(quantity.get()))?;
        self.navigator.go_to(Destination::Catalog)?;
        Ok(summary)
    }

    /// Commit the cart and return to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy.
    pub fn checkout(&mut self) -> Result<OrderConfirmation, CheckoutError> {
        let confirmation = checkout::checkout(&mut self.cart, &mut self.navigator)?;
        add_breadcrumb("checkout", "Order confirmed", None);
        Ok(confirmation)
    }
}

impl Storefront<FileStore> {
    /// Build a file-backed session from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog file cannot be loaded.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        let storage = CartStorage::with_key(
            FileStore::new(&config.storage_path),
            config.storage_key.clone(),
        );
        Ok(Self::new(catalog, storage, config.price_format()))
    }
}

//! Product catalog.
//!
//! The catalog is a fixed, ordered list of products loaded once at startup,
//! either from the built-in product list or from a JSON file:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "name": "Classic Denim Jacket",
//!     "listPrice": 7999.00,
//!     "salePrice": 2599.00,
//!     "imageRef": "./img/image.png",
//!     "description": "A timeless, rugged denim jacket..."
//!   }
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use shopfront_core::{Product, ProductId};
use thiserror::Error;

/// Errors that can occur while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: ProductId, reason: String },
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// Read-only, ordered product list.
///
/// Cheaply cloneable; clones share the same products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is not positive or repeats, a price is
    /// negative, or a sale price exceeds its list price.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            validate_product(product)?;
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        Ok(Self {
            products: products.into(),
        })
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a JSON array of
    /// products, or fails validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let products: Vec<Product> = serde_json::from_str(&content)
            .map_err(|e| CatalogError::Parse(format!("{}: {e}", path.display())))?;
        let catalog = Self::new(products)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The products the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: builtin_products().into(),
        }
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Whether a product with this id exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_product(product: &Product) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidProduct {
        id: product.id,
        reason: reason.to_string(),
    };

    if !product.id.is_positive() {
        return Err(invalid("id must be positive"));
    }
    if product.list_price.is_sign_negative() {
        return Err(invalid("list price must not be negative"));
    }
    if product.sale_price.is_sign_negative() {
        return Err(invalid("sale price must not be negative"));
    }
    if product.sale_price > product.list_price {
        return Err(invalid("sale price must not exceed list price"));
    }
    Ok(())
}

fn builtin_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Classic Denim Jacket".to_string(),
            list_price: Decimal::new(7999, 0),
            sale_price: Decimal::new(2599, 0),
            image_ref: "./img/image.png".to_string(),
            description: "A timeless, rugged denim jacket perfect for all seasons. Features a \
                          button-up front and two chest pockets."
                .to_string(),
        },
        Product {
            id: ProductId::new(2),
            name: "Wireless Noise-Cancelling Headphones".to_string(),
            list_price: Decimal::new(19999, 0),
            sale_price: Decimal::new(14999, 0),
            image_ref: "./img/image2.webp".to_string(),
            description: "Experience pure audio with industry-leading noise cancellation and a \
                          comfortable, ergonomic design. 30-hour battery life."
                .to_string(),
        },
        Product {
            id: ProductId::new(3),
            name: "Organic Cotton T-Shirt Pack".to_string(),
            list_price: Decimal::new(3999, 0),
            sale_price: Decimal::new(2999, 0),
            image_ref: "./img/image3.jpg".to_string(),
            description: "A pack of three incredibly soft organic cotton t-shirts in essential \
                          colors. Sustainable and breathable."
                .to_string(),
        },
        Product {
            id: ProductId::new(4),
            name: "4K Ultra HD Smart TV (55 Inch)".to_string(),
            list_price: Decimal::new(59999, 0),
            sale_price: Decimal::new(49999, 0),
            image_ref: "./img/image4.png".to_string(),
            description: "Vibrant colors and sharp details with smart features built-in. \
                          Perfect for movies and gaming."
                .to_string(),
        },
    ]
}

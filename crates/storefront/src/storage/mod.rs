//! Cart persistence.
//!
//! The cart lives under a single well-known key in a key-value store, encoded
//! as a JSON array of [`CartLine`] records:
//!
//! ```json
//! [{"productId":1,"displayName":"Classic Denim Jacket","unitPrice":2599,"imageRef":"./img/image.png","quantity":2}]
//! ```
//!
//! # Failure policy
//!
//! - Saving can fail (store unavailable, quota exceeded). The error is
//!   returned to the cart store, which logs it and keeps working in memory.
//! - Loading never fails. A missing key is a first visit; an unreadable or
//!   malformed value is reported through [`LoadedCart::problem`] and the
//!   caller starts from an empty cart.

mod file;
mod memory;

use std::collections::HashSet;

use shopfront_core::CartLine;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys.
pub mod keys {
    /// Default key holding the serialized cart.
    pub const CART: &str = "ecommerceCart";
}

/// Errors raised by the key-value store or while decoding its contents.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the store's capacity.
    #[error("storage quota exceeded: need {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        /// Bytes the store would hold after the write.
        needed: usize,
        /// Maximum bytes the store accepts.
        quota: usize,
    },

    /// The persisted cart is not in the expected shape.
    #[error("corrupt cart state: {0}")]
    Corrupt(String),

    /// The cart could not be encoded.
    #[error("failed to serialize cart: {0}")]
    Serialize(String),
}

/// A string key-value store with get/set semantics.
///
/// Implementations can be backed by memory, files, browser local storage and
/// so on; the cart only ever touches one key.
pub trait KeyValueStore {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Succeeds even if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Result of reading the persisted cart.
#[derive(Debug, Default)]
pub struct LoadedCart {
    /// Restored lines, empty when nothing usable was stored.
    pub lines: Vec<CartLine>,
    /// Why the stored value was discarded, if it was.
    pub problem: Option<StorageError>,
}

/// Serializes the cart to and from one key of a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartStorage<S> {
    /// Use the default [`keys::CART`] key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, keys::CART)
    }

    /// Use a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key the cart is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Write the cart under the well-known key.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the store rejects the write.
    pub fn save(&mut self, lines: &[CartLine]) -> Result<(), StorageError> {
        let encoded = encode_cart(lines)?;
        self.store.set(&self.key, &encoded)
    }

    /// Read the cart back.
    ///
    /// Never fails: problems degrade to an empty cart and are described in
    /// [`LoadedCart::problem`].
    pub fn load(&self) -> LoadedCart {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadedCart::default(),
            Err(e) => {
                return LoadedCart {
                    lines: Vec::new(),
                    problem: Some(e),
                };
            }
        };

        match decode_cart(&raw) {
            Ok(lines) => LoadedCart {
                lines,
                problem: None,
            },
            Err(e) => LoadedCart {
                lines: Vec::new(),
                problem: Some(e),
            },
        }
    }
}

/// Encode lines in the canonical persisted form.
///
/// # Errors
///
/// Returns [`StorageError::Serialize`] if a line cannot be encoded.
pub fn encode_cart(lines: &[CartLine]) -> Result<String, StorageError> {
    serde_json::to_string(lines).map_err(|e| StorageError::Serialize(e.to_string()))
}

/// Decode a persisted value, rejecting anything that breaks cart invariants.
///
/// # Errors
///
/// Returns [`StorageError::Corrupt`] if the text is not a JSON array of cart
/// records, or if a record has a non-positive id, a negative price, or
/// repeats a product id. Out-of-range quantities fail during parsing.
pub fn decode_cart(raw: &str) -> Result<Vec<CartLine>, StorageError> {
    let lines: Vec<CartLine> =
        serde_json::from_str(raw).map_err(|e| StorageError::Corrupt(e.to_string()))?;

    let mut seen = HashSet::with_capacity(lines.len());
    for line in &lines {
        if !line.product_id.is_positive() {
            return Err(StorageError::Corrupt(format!(
                "invalid product id {}",
                line.product_id
            )));
        }
        if line.unit_price.is_sign_negative() {
            return Err(StorageError::Corrupt(format!(
                "negative unit price for product {}",
                line.product_id
            )));
        }
        if !seen.insert(line.product_id) {
            return Err(StorageError::Corrupt(format!(
                "duplicate line for product {}",
                line.product_id
            )));
        }
    }

    Ok(lines)
}

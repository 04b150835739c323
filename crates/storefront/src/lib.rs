//! Shopfront Storefront library.
//!
//! The catalog, cart store, persistence and navigation behind the storefront,
//! kept free of any particular presentation so it can be tested and reused.
//!
//! # Architecture
//!
//! - [`catalog`] - Read-only product list
//! - [`cart`] - Cart store with write-through persistence
//! - [`storage`] - Key-value stores and the cart storage adapter
//! - [`navigation`] - Which view is visible
//! - [`checkout`] - Simulated checkout
//! - [`state`] - Per-session composition root
//! - [`views`] - Text rendering of the visible view

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod navigation;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod views;

pub use cart::{CartError, CartStore, CartSummary};
pub use catalog::{Catalog, CatalogError};
pub use checkout::{CheckoutError, OrderConfirmation};
pub use config::StorefrontConfig;
pub use error::AppError;
pub use navigation::{Destination, NavigationError, Navigator, View, ViewKind};
pub use state::Storefront;
pub use storage::{CartStorage, FileStore, KeyValueStore, MemoryStore, StorageError};

//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `storefront` - Catalog, cart store, persistence and navigation
//! - `cli` - Terminal presentation layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and quantities, plus the
//!   `Product` and `CartLine` records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

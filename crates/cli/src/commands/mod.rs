//! Command implementations.
//!
//! - [`cart`] - One-shot catalog and cart commands
//! - [`shell`] - Interactive session

pub mod cart;
pub mod shell;

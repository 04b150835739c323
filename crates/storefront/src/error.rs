//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for everything a shopper gesture can
//! run into. Presentation code reports it with [`AppError::report`] and shows
//! [`AppError::user_message`], which never leaks internal details.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::navigation::NavigationError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart mutation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Navigation rejected.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Checkout rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog could not be built.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A view failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether this is a bug or environment failure rather than a shopper mistake.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Catalog(_)
                | Self::Storage(_)
                | Self::Config(_)
                | Self::Render(_)
                | Self::Io(_)
        )
    }

    /// Log the error, capturing internal errors to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::info!(error = %self, "Rejected gesture");
        }
    }

    /// Text safe to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Cart(CartError::NotFound(_)) | Self::Navigation(NavigationError::NotFound(_)) => {
                "That product is not available.".to_string()
            }
            Self::Cart(CartError::InvalidQuantity(_)) => {
                "Please choose a quantity between 1 and 99.".to_string()
            }
            Self::Navigation(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Catalog(_)
            | Self::Storage(_)
            | Self::Config(_)
            | Self::Render(_)
            | Self::Io(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of gestures
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{ProductId, Quantity};

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(CartError::NotFound(ProductId::new(123)));
        assert_eq!(err.to_string(), "Cart error: Product not found: 123");

        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(
            err.to_string(),
            "Checkout error: Your cart is empty. Please add items before checking out."
        );
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = AppError::from(StorageError::Unavailable("/secret/path".to_string()));
        assert!(err.is_internal());
        assert!(!err.user_message().contains("/secret/path"));

        let err = AppError::from(CartError::from(Quantity::new(0).unwrap_err()));
        assert!(!err.is_internal());
        assert_eq!(err.user_message(), "Please choose a quantity between 1 and 99.");
    }

    #[test]
    fn test_empty_cart_message_is_user_facing() {
        let err = AppError::from(CheckoutError::EmptyCart);
        assert!(!err.is_internal());
        assert_eq!(
            err.user_message(),
            "Your cart is empty. Please add items before checking out."
        );
    }
}

//! Cart line quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is below [`Quantity::MIN`].
    #[error("quantity must be at least {min} (got {value})")]
    TooSmall {
        /// Rejected value.
        value: i64,
        /// Minimum allowed quantity.
        min: u32,
    },
    /// The value is above [`Quantity::MAX`].
    #[error("quantity must be at most {max} (got {value})")]
    TooLarge {
        /// Rejected value.
        value: i64,
        /// Maximum allowed quantity.
        max: u32,
    },
}

/// The quantity of one product in the cart.
///
/// ## Constraints
///
/// - Range: 1-99 inclusive
///
/// Arithmetic on a `Quantity` saturates at the bounds instead of failing,
/// which is what both the product-detail stepper and merge-on-add want.
///
/// ## Examples
///
/// ```
/// use shopfront_core::Quantity;
///
/// assert!(Quantity::new(1).is_ok());
/// assert!(Quantity::new(99).is_ok());
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(100).is_err());
///
/// let q = Quantity::new(98).unwrap();
/// assert_eq!(q.saturating_add(Quantity::new(5).unwrap()).get(), 99);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a cart line can hold.
    pub const MIN: u32 = 1;
    /// Largest quantity a cart line can hold.
    pub const MAX: u32 = 99;
    /// A single unit.
    pub const ONE: Self = Self(Self::MIN);

    /// Validate a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is outside `1..=99`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < i64::from(Self::MIN) {
            return Err(QuantityError::TooSmall {
                value,
                min: Self::MIN,
            });
        }
        if value > i64::from(Self::MAX) {
            return Err(QuantityError::TooLarge {
                value,
                max: Self::MAX,
            });
        }
        // In range, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = value as u32;
        Ok(Self(value))
    }

    /// Clamp any positive value into range. Returns `None` for `value <= 0`.
    #[must_use]
    pub fn clamped(value: i64) -> Option<Self> {
        if value < i64::from(Self::MIN) {
            return None;
        }
        let capped = value.min(i64::from(Self::MAX));
        Self::new(capped).ok()
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add, stopping at [`Quantity::MAX`].
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self((self.0 + other.0).min(Self::MAX))
    }

    /// One more, stopping at [`Quantity::MAX`].
    #[must_use]
    pub fn incremented(self) -> Self {
        self.saturating_add(Self::ONE)
    }

    /// One less, stopping at [`Quantity::MIN`].
    #[must_use]
    pub fn decremented(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

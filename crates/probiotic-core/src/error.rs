//! # Error Types
//!
//! Domain-specific error types for probiotic-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  probiotic-core errors (this file)                                     │
//! │  ├── CoreError        - Product boundary failures                      │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  storefront-session errors (separate crate)                            │
//! │  ├── ConfigError      - storefront.toml / env problems                 │
//! │  └── ApiError         - What page components see (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Page                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart reducer itself has no error path. Unknown ids are no-ops and
//! quantities saturate, so errors only come from turning a loosely-shaped
//! product payload into a [`ProductSummary`](crate::ProductSummary).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product payload could not be accepted into the cart.
    ///
    /// ## When This Occurs
    /// - A page passes a product without an id or price
    /// - The price is negative, NaN or absurdly large
    #[error("Invalid product {product_id}: {source}")]
    InvalidProduct {
        /// The offending id, or `<missing>` when there was none.
        product_id: String,
        #[source]
        source: ValidationError,
    },

    /// The payload says `inStock: false`.
    #[error("Product {product_id} is out of stock")]
    OutOfStock { product_id: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., NaN price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_product_message() {
        let err = CoreError::InvalidProduct {
            product_id: "p1".to_string(),
            source: ValidationError::Required {
                field: "price".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Invalid product p1: price is required");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_out_of_stock_message_and_field() {
        let err = CoreError::OutOfStock {
            product_id: "p3".to_string(),
        };
        assert_eq!(err.to_string(), "Product p3 is out of stock");

        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(validation_err.field(), "quantity");
    }
}

//! # API Error Type
//!
//! Unified error type for storefront commands, plus configuration errors.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Page component              storefront-session                         │
//! │  ──────────────              ──────────────────                         │
//! │                                                                         │
//! │  addToCart(product)                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<CartResponse, ApiError>                                  │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Not an object? ─── serde_json::Error ─────────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  No id / bad price? ─── CoreError::InvalidProduct ─ ApiError ──►│  │
//! │  │  inStock: false? ────── CoreError::OutOfStock ───── ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Dispatch (never fails) ──────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code === 'INVALID_PRODUCT' → "This product can't be added"          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use probiotic_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_PRODUCT",
///   "message": "Invalid product p1: price is required"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A field failed validation (quantity out of range, ...)
    ValidationError,

    /// The product payload cannot go into the cart
    InvalidProduct,

    /// The catalog marks the product as not in stock
    OutOfStock,

    /// The payload was not a JSON object of the expected shape
    InvalidPayload,

    /// The session that owned the cart has ended
    SessionEnded,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            e @ CoreError::InvalidProduct { .. } => {
                ApiError::new(ErrorCode::InvalidProduct, e.to_string())
            }
            e @ CoreError::OutOfStock { .. } => {
                ApiError::new(ErrorCode::OutOfStock, e.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::new(
            ErrorCode::InvalidPayload,
            format!("Malformed product payload: {}", err),
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading `storefront.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_product_maps_to_code() {
        let err: ApiError = CoreError::InvalidProduct {
            product_id: "p1".to_string(),
            source: ValidationError::Required {
                field: "price".to_string(),
            },
        }
        .into();

        assert_eq!(err.code, ErrorCode::InvalidProduct);
        assert_eq!(err.message, "Invalid product p1: price is required");
    }

    #[test]
    fn test_out_of_stock_maps_to_code() {
        let err: ApiError = CoreError::OutOfStock {
            product_id: "p3".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(err.message, "Product p3 is out of stock");
        assert_eq!(serde_json::to_value(&err).unwrap()["code"], "OUT_OF_STOCK");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::validation("quantity must be positive");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "quantity must be positive");
        assert_eq!(err.to_string(), "[ValidationError] quantity must be positive");
    }

    #[test]
    fn test_json_error_is_invalid_payload() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(json_err);
        assert_eq!(err.code, ErrorCode::InvalidPayload);
        assert!(err.message.starts_with("Malformed product payload"));
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::invalid("pricing.tax_rate_bps", "must be between 0 and 10000");
        assert_eq!(
            err.to_string(),
            "Invalid value for pricing.tax_rate_bps: must be between 0 and 10000"
        );
    }
}

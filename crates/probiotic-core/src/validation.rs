//! # Validation Module
//!
//! Field rules applied where a loosely-shaped product payload enters the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page component                                                │
//! │  └── Builds a product object from catalog data (anything goes)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Product boundary (ProductSummary::try_from)                   │
//! │  └── THIS MODULE: id, name, price rules                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart reducer                                                  │
//! │  └── Trusts its input; enforces quantity ≥ 1 and the total invariant    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_MAJOR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_ID_LEN: usize = 128;
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 128 characters
///
/// ## Example
/// ```rust
/// use probiotic_core::validation::validate_product_id;
///
/// assert!(validate_product_id("lacto-30b").is_ok());
/// assert!(validate_product_id("  ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price given in major units, as product payloads carry it.
///
/// ## Rules
/// - Must be a finite number
/// - Zero is allowed (free samples)
/// - Must not be negative or exceed `MAX_PRICE_MAJOR`
///
/// ## Example
/// ```rust
/// use probiotic_core::validation::validate_price_major;
///
/// assert!(validate_price_major(29.99).is_ok());
/// assert!(validate_price_major(0.0).is_ok());
/// assert!(validate_price_major(-1.0).is_err());
/// ```
pub fn validate_price_major(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=MAX_PRICE_MAJOR).contains(&price) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_MAJOR as i64,
        });
    }

    Ok(())
}

/// Validates a requested quantity for a multi-unit add.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// Product page: quantity picker says 3, user clicks "Add to Cart"
///      │
///      ▼
/// validate_quantity(3) ← THIS FUNCTION
///      │
///      ├── qty <= 0?  → "quantity must be positive"
///      ├── qty > 999? → "quantity must be between 1 and 999"
///      └── OK → three ADD_TO_CART actions, applied together
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > i64::from(MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # probiotic-core: Pure Cart Logic for the Probiotics Storefront
//!
//! This crate is the **heart** of the storefront. The shopping cart is the
//! only stateful piece of the customer-facing app, and all of its rules live
//! here as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Pages (category, product, cart, ...)         │   │
//! │  │    Product Card ──► Cart Badge ──► Cart Page ──► Checkout       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ read handle / dispatch handle          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               storefront-session (cart provider)                │   │
//! │  │    get_cart, add_to_cart, update_cart_item, remove_from_cart    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ probiotic-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │   money   │  │   cart    │  │  summary  │  │   │
//! │  │   │  Record   │  │   Money   │  │ CartState │  │  Order    │  │   │
//! │  │   │  Summary  │  │  TaxRate  │  │ CartAction│  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Product boundary types and `TaxRate`
//! - [`cart`] - The cart reducer: `CartState × CartAction → CartState`
//! - [`summary`] - Subtotal, shipping, tax and total for the cart page
//! - [`validation`] - Field rules used at the product boundary
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use probiotic_core::{CartAction, CartState, Money, ProductSummary};
//!
//! let product = ProductSummary::new("p1", "Daily Probiotic", Money::from_cents(1000), "i", "c");
//!
//! let mut cart = CartState::new();
//! cart.apply(&CartAction::AddToCart(product.clone()));
//! cart.apply(&CartAction::AddToCart(product));
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.total(), Money::from_cents(2000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartAction, CartChange, CartItem, CartState, CheckoutLine};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use summary::{OrderSummary, PricingRules};
pub use types::{ProductRecord, ProductSummary, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single item in the cart.
///
/// Adds and updates past this value saturate; the cart never rejects them.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Largest accepted unit price in major units.
///
/// Keeps `price × MAX_ITEM_QUANTITY` summed over a cart far inside `i64`.
pub const MAX_PRICE_MAJOR: f64 = 1_000_000_000.0;

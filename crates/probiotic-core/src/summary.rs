//! # Order Summary
//!
//! Derives the figures the cart page shows beside the line items.
//!
//! ```text
//! subtotal  = cart total
//! shipping  = 0 if cart empty or subtotal ≥ free_shipping_threshold
//!             flat_shipping otherwise
//! tax       = subtotal × tax_rate (half up)
//! total     = subtotal + shipping + tax
//! ```
//!
//! Nothing here is stored: a summary is recomputed from the cart each time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartState;
use crate::money::Money;
use crate::types::TaxRate;

/// Storefront pricing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Money,
    /// Shipping charged below the threshold.
    pub flat_shipping: Money,
    pub tax_rate: TaxRate,
}

impl Default for PricingRules {
    /// 49.00 threshold, 4.99 flat shipping, 8% tax.
    fn default() -> Self {
        PricingRules {
            free_shipping_threshold: Money::from_cents(4900),
            flat_shipping: Money::from_cents(499),
            tax_rate: TaxRate::from_bps(800),
        }
    }
}

/// Totals block of the cart page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    /// How much more buys free shipping; `None` once it applies or when empty.
    pub free_shipping_remaining: Option<Money>,
    /// Sum of quantities.
    pub item_count: u64,
}

impl OrderSummary {
    /// Computes the summary for a cart under the given rules.
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::{CartAction, CartState, Money, OrderSummary, PricingRules, ProductSummary};
    ///
    /// let mut cart = CartState::new();
    /// let p = ProductSummary::new("p1", "A", Money::from_cents(2000), "i", "c");
    /// cart.apply(&CartAction::AddToCart(p));
    ///
    /// let summary = OrderSummary::from_cart(&cart, &PricingRules::default());
    /// assert_eq!(summary.shipping.cents(), 499);
    /// assert_eq!(summary.tax.cents(), 160);
    /// assert_eq!(summary.total.cents(), 2659);
    /// ```
    pub fn from_cart(cart: &CartState, rules: &PricingRules) -> Self {
        let subtotal = cart.total();
        let qualifies = subtotal >= rules.free_shipping_threshold;

        let shipping = if cart.is_empty() || qualifies {
            Money::zero()
        } else {
            rules.flat_shipping
        };

        let tax = subtotal.calculate_tax(rules.tax_rate);

        let free_shipping_remaining = if cart.is_empty() || qualifies {
            None
        } else {
            Some(rules.free_shipping_threshold - subtotal)
        };

        OrderSummary {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            free_shipping_remaining,
            item_count: cart.total_quantity(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

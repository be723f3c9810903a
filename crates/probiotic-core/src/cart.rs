//! # Cart
//!
//! The shopping cart reducer: an ordered set of line items plus a cached
//! total, changed only by [`CartAction`]s.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartState × CartAction → CartState                   │
//! │                                                                         │
//! │  Page Action              CartAction               Effect               │
//! │  ───────────              ──────────               ──────               │
//! │                                                                         │
//! │  "Add to Cart" ─────────► AddToCart(product) ────► new line qty 1, or   │
//! │                                                    existing line qty+1  │
//! │                                                                         │
//! │  +/- on cart page ──────► UpdateQuantity{id,q} ──► qty = q, or          │
//! │                                                    line removed if q≤0  │
//! │                                                                         │
//! │  ✕ on cart page ────────► RemoveFromCart(id) ────► line removed         │
//! │                                                                         │
//! │  Order placed ──────────► ClearCart ─────────────► no lines             │
//! │                                                                         │
//! │  After EVERY transition: total = Σ(price × quantity)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `id`, in first-add order
//! - `1 <= quantity <= MAX_ITEM_QUANTITY` for every stored line
//! - `total` equals the sum of line totals; it is never written on its own
//!
//! Unknown ids are no-ops and out-of-range quantities saturate, so no
//! transition can fail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ProductSummary;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Item
// =============================================================================

/// One distinct product held in the cart.
///
/// Descriptive fields and the unit price are frozen at the first add. Adding
/// the same id again later only bumps the quantity, even if the catalog price
/// has moved in the meantime.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub category: String,
    pub price: Money,
    pub quantity: u32,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    fn from_product(product: &ProductSummary) -> Self {
        CartItem {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            price: product.price,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Everything a page may ask the cart to do.
///
/// Serialized in the same shape pages dispatch:
/// `{"type":"UPDATE_QUANTITY","payload":{"id":"p1","quantity":5}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add one unit of a product.
    AddToCart(ProductSummary),

    /// Set a line's quantity. Zero or below removes the line.
    UpdateQuantity { id: String, quantity: i64 },

    /// Drop a line.
    RemoveFromCart(String),

    /// Drop every line (after an order is placed, or "empty cart").
    ClearCart,
}

impl CartAction {
    /// Action name as pages spell it, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddToCart(_) => "ADD_TO_CART",
            CartAction::UpdateQuantity { .. } => "UPDATE_QUANTITY",
            CartAction::RemoveFromCart(_) => "REMOVE_FROM_CART",
            CartAction::ClearCart => "CLEAR_CART",
        }
    }

    /// The product id the action targets, if any.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            CartAction::AddToCart(product) => Some(&product.id),
            CartAction::UpdateQuantity { id, .. } | CartAction::RemoveFromCart(id) => Some(id),
            CartAction::ClearCart => None,
        }
    }
}

/// What a transition actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended with quantity 1.
    Added { id: String },
    /// An existing line went up by one.
    Incremented { id: String, quantity: u32 },
    /// A line's quantity was set.
    QuantitySet { id: String, quantity: u32 },
    /// A line was dropped.
    Removed { id: String },
    /// All lines were dropped.
    Cleared { removed: usize },
    /// Unknown id, same quantity, already at the cap, or clearing an empty cart.
    Unchanged,
}

impl CartChange {
    /// True unless the transition was a no-op.
    pub fn is_change(&self) -> bool {
        !matches!(self, CartChange::Unchanged)
    }
}

// =============================================================================
// Checkout Line
// =============================================================================

/// One `{productId, quantity}` entry of the order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: String,
    pub quantity: u32,
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart aggregate.
///
/// Fields are private: the only way to change a cart is [`CartState::apply`]
/// (or its pure twin [`CartState::reduce`]).
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    total: Money,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl CartState {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartState {
            items: Vec::new(),
            total: Money::zero(),
            created_at: Utc::now(),
        }
    }

    /// Applies one action in place and recomputes the total.
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::{CartAction, CartChange, CartState, Money, ProductSummary};
    ///
    /// let mut cart = CartState::new();
    /// let p1 = ProductSummary::new("p1", "A", Money::from_cents(1000), "i", "c");
    ///
    /// cart.apply(&CartAction::AddToCart(p1));
    /// let change = cart.apply(&CartAction::UpdateQuantity { id: "p1".into(), quantity: 0 });
    ///
    /// assert_eq!(change, CartChange::Removed { id: "p1".into() });
    /// assert!(cart.is_empty());
    /// ```
    pub fn apply(&mut self, action: &CartAction) -> CartChange {
        let change = match action {
            CartAction::AddToCart(product) => self.add(product),
            CartAction::UpdateQuantity { id, quantity } => self.update_quantity(id, *quantity),
            CartAction::RemoveFromCart(id) => self.remove(id),
            CartAction::ClearCart => self.clear(),
        };
        self.total = self.recomputed_total();
        change
    }

    /// Pure transition: returns the next state and leaves `self` untouched.
    pub fn reduce(&self, action: &CartAction) -> CartState {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    fn add(&mut self, product: &ProductSummary) -> CartChange {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            if item.quantity >= MAX_ITEM_QUANTITY {
                return CartChange::Unchanged;
            }
            item.quantity += 1;
            return CartChange::Incremented {
                id: item.id.clone(),
                quantity: item.quantity,
            };
        }

        self.items.push(CartItem::from_product(product));
        CartChange::Added {
            id: product.id.clone(),
        }
    }

    fn update_quantity(&mut self, id: &str, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove(id);
        }

        let quantity = quantity.min(i64::from(MAX_ITEM_QUANTITY)) as u32;
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                CartChange::QuantitySet {
                    id: item.id.clone(),
                    quantity,
                }
            }
            _ => CartChange::Unchanged,
        }
    }

    fn remove(&mut self, id: &str) -> CartChange {
        match self.items.iter().position(|i| i.id == id) {
            Some(index) => {
                let item = self.items.remove(index);
                CartChange::Removed { id: item.id }
            }
            None => CartChange::Unchanged,
        }
    }

    fn clear(&mut self) -> CartChange {
        if self.items.is_empty() {
            return CartChange::Unchanged;
        }
        let removed = self.items.len();
        self.items.clear();
        self.created_at = Utc::now();
        CartChange::Cleared { removed }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Lines in first-add order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Cached Σ(price × quantity).
    pub fn total(&self) -> Money {
        self.total
    }

    /// Sums the line totals from scratch.
    pub fn recomputed_total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities (the header badge number).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The `items` payload for order creation.
    pub fn checkout_lines(&self) -> Vec<CheckoutLine> {
        self.items
            .iter()
            .map(|i| CheckoutLine {
                product_id: i.id.clone(),
                quantity: i.quantity,
            })
            .collect()
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

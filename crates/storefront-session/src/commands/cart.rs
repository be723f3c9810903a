//! # Cart Commands
//!
//! What product cards, the product page, the header and the cart page call.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Form    │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart    get_checkout_lines   clear_cart        │
//! │                   update_item    get_order_summary        │             │
//! │                   remove_item                             ▼             │
//! │                                                     (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use probiotic_core::validation::validate_quantity;
use probiotic_core::{
    CartAction, CartChange, CartItem, CartState, CheckoutLine, Money, OrderSummary,
    ProductRecord, ProductSummary,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use ts_rs::TS;

use crate::error::{ApiError, ErrorCode};
use crate::state::{CartDispatcher, CartReader, StorefrontConfig};

/// Cart contents as pages render them.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total: Money,
    /// Sum of quantities (header badge).
    pub item_count: u64,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            total: cart.total(),
            item_count: cart.total_quantity(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items, total and the header badge count
pub fn get_cart(cart: &CartReader) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - The payload is any product object a page holds (catalog entry, wishlist
///   entry, recommendation); it is validated into a `ProductSummary` first
/// - If product already in cart: quantity increases
/// - Price is frozen at the first add
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product page: picker says 3, user clicks "Add to Cart"                │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  add_to_cart(dispatcher, product, Some(3))                              │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Check quantity is 1..=999                                  │    │
/// │  │  2. Parse + validate the product payload                       │    │
/// │  │  3. Dispatch ADD_TO_CART three times under one lock            │    │
/// │  │  4. Return the cart as it is right after                       │    │
/// │  │     (SESSION_ENDED if the session is already over)             │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Arguments
/// * `product` - Product object as the page holds it
/// * `quantity` - Units to add (default: 1)
pub fn add_to_cart(
    cart: &CartDispatcher,
    product: Value,
    quantity: Option<u32>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    validate_quantity(i64::from(quantity))?;

    let record: ProductRecord = serde_json::from_value(product)?;
    let product = ProductSummary::try_from(record)?;
    debug!(product_id = %product.id, quantity = %quantity, "add_to_cart command");

    let actions = vec![CartAction::AddToCart(product); quantity as usize];
    let (changes, response) = cart.dispatch_then(&actions, |c| CartResponse::from(c));
    if !changes.iter().any(CartChange::is_change) && cart.is_closed() {
        return Err(ApiError::new(
            ErrorCode::SessionEnded,
            "The session has ended; start a new one to shop",
        ));
    }

    Ok(response)
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0 or below: removes the item
/// - Quantity above 999: capped at 999
/// - Unknown id: cart returned unchanged
pub fn update_cart_item(cart: &CartDispatcher, product_id: String, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let action = CartAction::UpdateQuantity {
        id: product_id,
        quantity,
    };
    let (_, response) = cart.dispatch_then(&[action], |c| CartResponse::from(c));
    response
}

/// Removes an item from the cart. Unknown ids are ignored.
pub fn remove_from_cart(cart: &CartDispatcher, product_id: String) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    let (_, response) = cart.dispatch_then(&[CartAction::RemoveFromCart(product_id)], |c| {
        CartResponse::from(c)
    });
    response
}

/// Clears all items from the cart.
///
/// Called after an order is placed and by the "empty cart" button.
pub fn clear_cart(cart: &CartDispatcher) -> CartResponse {
    debug!("clear_cart command");

    let (_, response) = cart.dispatch_then(&[CartAction::ClearCart], |c| CartResponse::from(c));
    response
}

/// Subtotal, shipping, tax and total for the cart page.
pub fn get_order_summary(cart: &CartReader, config: &StorefrontConfig) -> OrderSummary {
    let rules = config.pricing_rules();
    cart.with_cart(|c| OrderSummary::from_cart(c, &rules))
}

/// `{productId, quantity}` lines for the order-creation request.
pub fn get_checkout_lines(cart: &CartReader) -> Vec<CheckoutLine> {
    cart.with_cart(|c| c.checkout_lines())
}

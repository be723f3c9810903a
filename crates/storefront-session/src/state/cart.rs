//! # Cart Store
//!
//! The one cart of a browser session, shared by every page component.
//!
//! ## Thread Safety
//! The cart lives in an `Arc<Mutex<CartState>>`. Each dispatch holds the lock
//! for exactly one reducer step (or one batch), then publishes the new state
//! on a `watch` channel while still holding it, so subscribers see states in
//! dispatch order.
//!
//! ## Handles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Handles                                   │
//! │                                                                         │
//! │                        ┌────────────────────┐                           │
//! │                        │     CartStore      │                           │
//! │                        │  Arc<Mutex<Cart>>  │                           │
//! │                        │  watch::Sender     │                           │
//! │                        └─────────┬──────────┘                           │
//! │            ┌─────────────────────┼─────────────────────┐                │
//! │            ▼                     ▼                     ▼                │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐   │
//! │  │   CartReader     │  │  CartDispatcher  │  │ watch::Receiver      │   │
//! │  │  snapshot()      │  │  dispatch()      │  │ changed().await      │   │
//! │  │  with_cart(f)    │  │  dispatch_all()  │  │ (re-render the view) │   │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘   │
//! │                                                                         │
//! │  Header badge, cart page ── reader      Product cards ── dispatcher     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Closing
//! When the session ends the store is closed. Handles that outlived it keep
//! reading the final cart, but every later dispatch is a logged no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use probiotic_core::{CartAction, CartChange, CartState};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Locks the cart, recovering from a panic in another holder.
///
/// The reducer never leaves a half-applied state behind, so the inner value of
/// a poisoned lock is still a valid cart.
fn lock(cart: &Mutex<CartState>) -> MutexGuard<'_, CartState> {
    cart.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        warn!("Cart mutex was poisoned; continuing with last state");
        poisoned.into_inner()
    })
}

/// Session-scoped cart store.
///
/// Created when a session starts and closed when it ends. Cloning shares the
/// same cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    cart: Arc<Mutex<CartState>>,
    state_tx: Arc<watch::Sender<CartState>>,
    closed: Arc<AtomicBool>,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        let initial = CartState::new();
        let (state_tx, _) = watch::channel(initial.clone());

        CartStore {
            cart: Arc::new(Mutex::new(initial)),
            state_tx: Arc::new(state_tx),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read-only handle.
    pub fn reader(&self) -> CartReader {
        CartReader {
            cart: Arc::clone(&self.cart),
        }
    }

    /// Dispatch handle.
    pub fn dispatcher(&self) -> CartDispatcher {
        CartDispatcher {
            cart: Arc::clone(&self.cart),
            state_tx: Arc::clone(&self.state_tx),
            closed: Arc::clone(&self.closed),
        }
    }

    /// Subscribes to state changes.
    ///
    /// Only transitions that changed something are published.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state_tx.subscribe()
    }

    /// Closes the store and returns the final cart.
    ///
    /// The flag is set under the lock, so no dispatch can land between the
    /// returned state and the close.
    pub(crate) fn close(&self) -> CartState {
        let cart = lock(&self.cart);
        self.closed.store(true, Ordering::Release);
        cart.clone()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Reader
// =============================================================================

/// Read access to the session cart.
#[derive(Debug, Clone)]
pub struct CartReader {
    cart: Arc<Mutex<CartState>>,
}

impl CartReader {
    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use storefront_session::CartStore;
    ///
    /// let store = CartStore::new();
    /// let badge = store.reader().with_cart(|cart| cart.total_quantity());
    /// assert_eq!(badge, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        let cart = lock(&self.cart);
        f(&cart)
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> CartState {
        self.with_cart(CartState::clone)
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// The only way to change the session cart.
#[derive(Debug, Clone)]
pub struct CartDispatcher {
    cart: Arc<Mutex<CartState>>,
    state_tx: Arc<watch::Sender<CartState>>,
    closed: Arc<AtomicBool>,
}

impl CartDispatcher {
    /// Applies one action.
    pub fn dispatch(&self, action: CartAction) -> CartChange {
        self.dispatch_then(std::slice::from_ref(&action), |_| ())
            .0
            .into_iter()
            .next()
            .unwrap_or(CartChange::Unchanged)
    }

    /// Applies several actions under one lock; no other dispatch interleaves.
    pub fn dispatch_all(&self, actions: &[CartAction]) -> Vec<CartChange> {
        self.dispatch_then(actions, |_| ()).0
    }

    /// Applies `actions` atomically, then reads the resulting state before the
    /// lock is released.
    ///
    /// On a closed store nothing is applied: every change is
    /// [`CartChange::Unchanged`] and `read` sees the final cart.
    pub fn dispatch_then<F, R>(&self, actions: &[CartAction], read: F) -> (Vec<CartChange>, R)
    where
        F: FnOnce(&CartState) -> R,
    {
        let mut cart = lock(&self.cart);

        if self.is_closed() {
            warn!(actions = actions.len(), "Dispatch after session end ignored");
            return (vec![CartChange::Unchanged; actions.len()], read(&cart));
        }

        let changes: Vec<CartChange> = actions
            .iter()
            .map(|action| {
                let change = cart.apply(action);
                debug!(
                    action = action.kind(),
                    id = action.target_id().unwrap_or("-"),
                    changed = change.is_change(),
                    "dispatch"
                );
                change
            })
            .collect();

        if changes.iter().any(CartChange::is_change) {
            self.state_tx.send_replace(cart.clone());
        }

        let out = read(&cart);
        (changes, out)
    }

    /// True once the owning session has ended.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Read access through the dispatch handle.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        let cart = lock(&self.cart);
        f(&cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probiotic_core::{Money, ProductSummary};

    fn product(id: &str, cents: i64) -> ProductSummary {
        ProductSummary::new(id, format!("Product {}", id), Money::from_cents(cents), "", "")
    }

    #[test]
    fn test_dispatch_and_read() {
        let store = CartStore::new();
        let dispatcher = store.dispatcher();
        let reader = store.reader();

        let change = dispatcher.dispatch(CartAction::AddToCart(product("p1", 1000)));
        assert_eq!(change, CartChange::Added { id: "p1".into() });

        let snapshot = reader.snapshot();
        assert_eq!(snapshot.total(), Money::from_cents(1000));
        assert_eq!(reader.with_cart(|c| c.item_count()), 1);
    }

    #[test]
    fn test_dispatch_all_is_one_batch() {
        let store = CartStore::new();
        let add = CartAction::AddToCart(product("p1", 250));

        let (changes, total) = store
            .dispatcher()
            .dispatch_then(&[add.clone(), add.clone(), add], |c| c.total());

        assert_eq!(changes.len(), 3);
        assert_eq!(changes[2], CartChange::Incremented { id: "p1".into(), quantity: 3 });
        assert_eq!(total, Money::from_cents(750));
    }

    #[test]
    fn test_handles_share_one_cart() {
        let store = CartStore::new();
        let other = store.clone();
        store.dispatcher().dispatch(CartAction::AddToCart(product("p1", 100)));
        assert_eq!(other.reader().snapshot().item_count(), 1);
        assert_eq!(other.close().total(), Money::from_cents(100));
        assert!(store.dispatcher().is_closed());
    }

    #[tokio::test]
    async fn test_dispatch_after_close_is_ignored() {
        let store = CartStore::new();
        let dispatcher = store.dispatcher();
        let reader = store.reader();
        dispatcher.dispatch(CartAction::AddToCart(product("p1", 100)));
        let rx = store.subscribe();

        let final_cart = store.close();
        assert!(dispatcher.is_closed());

        let (changes, total) = dispatcher.dispatch_then(
            &[
                CartAction::AddToCart(product("p2", 500)),
                CartAction::ClearCart,
            ],
            |c| c.total(),
        );
        assert_eq!(changes, vec![CartChange::Unchanged, CartChange::Unchanged]);
        assert_eq!(total, Money::from_cents(100));
        assert_eq!(
            dispatcher.dispatch(CartAction::RemoveFromCart("p1".into())),
            CartChange::Unchanged
        );

        assert_eq!(reader.snapshot(), final_cart);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let store = CartStore::new();
        store.dispatcher().dispatch(CartAction::AddToCart(product("p1", 100)));

        let reader = store.reader();
        let result = std::thread::spawn(move || {
            reader.with_cart(|cart| {
                if !cart.is_empty() {
                    panic!("view crashed while reading");
                }
            });
        })
        .join();
        assert!(result.is_err());

        let change = store.dispatcher().dispatch(CartAction::AddToCart(product("p1", 100)));
        assert_eq!(change, CartChange::Incremented { id: "p1".into(), quantity: 2 });
        assert_eq!(store.reader().snapshot().total(), Money::from_cents(200));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_only() {
        let store = CartStore::new();
        let mut rx = store.subscribe();
        let dispatcher = store.dispatcher();

        dispatcher.dispatch(CartAction::RemoveFromCart("ghost".into()));
        assert!(!rx.has_changed().unwrap());

        dispatcher.dispatch(CartAction::AddToCart(product("p1", 1000)));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().total(), Money::from_cents(1000));

        dispatcher.dispatch(CartAction::UpdateQuantity { id: "p1".into(), quantity: 1 });
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_dispatch_keeps_invariants() {
        let store = CartStore::new();
        let mut handles = Vec::new();

        for worker in 0..8 {
            let dispatcher = store.dispatcher();
            handles.push(tokio::spawn(async move {
                for n in 0..50 {
                    let id = if n % 2 == 0 { "shared".to_string() } else { format!("w{}", worker) };
                    dispatcher.dispatch(CartAction::AddToCart(product(&id, 100)));
                    tokio::task::yield_now().await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let cart = store.reader().snapshot();
        assert_eq!(cart.total_quantity(), 400);
        assert_eq!(cart.get("shared").map(|i| i.quantity), Some(200));
        assert_eq!(cart.item_count(), 9);
        assert_eq!(cart.total(), cart.recomputed_total());
        assert_eq!(store.subscribe().borrow().total(), cart.total());
    }
}

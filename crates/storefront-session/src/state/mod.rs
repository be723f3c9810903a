//! # State Module
//!
//! Session state: the cart store and the storefront configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐    │
//! │  │   CartStore                  │  │   StorefrontConfig           │    │
//! │  │                              │  │                              │    │
//! │  │  Arc<Mutex<CartState>>       │  │  store name, currency        │    │
//! │  │  watch::Sender<CartState>    │  │  shipping, tax               │    │
//! │  └──────────────────────────────┘  └──────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: exclusive access per dispatch via Mutex                  │
//! │  • StorefrontConfig: read-only after load                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{CartDispatcher, CartReader, CartStore};
pub use config::{PricingSettings, StoreSettings, StorefrontConfig};

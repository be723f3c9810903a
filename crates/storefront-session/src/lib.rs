//! # Storefront Session
//!
//! The session-scoped cart provider for the probiotics storefront.
//!
//! ## Module Organization
//! ```text
//! storefront_session/
//! ├── lib.rs          ◄─── You are here (exports & logging setup)
//! ├── session.rs      ◄─── Session start/end
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore, CartReader, CartDispatcher
//! │   └── config.rs   ◄─── StorefrontConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── Cart commands called by pages
//! └── error.rs        ◄─── ApiError and ConfigError
//! ```
//!
//! ## Typical Session
//! ```rust
//! use serde_json::json;
//! use storefront_session::commands::cart::{add_to_cart, get_cart, update_cart_item};
//! use storefront_session::{Session, StorefrontConfig};
//!
//! let session = Session::start(StorefrontConfig::default()).unwrap();
//! let cart = session.dispatcher();
//!
//! add_to_cart(&cart, json!({"id": "p1", "name": "Daily Flora", "price": 10}), None).unwrap();
//! add_to_cart(&cart, json!({"id": "p1", "name": "Daily Flora", "price": 10}), None).unwrap();
//! update_cart_item(&cart, "p1".to_string(), 5);
//!
//! let view = get_cart(&session.reader());
//! assert_eq!(view.items.len(), 1);
//! assert_eq!(view.total.cents(), 5000);
//! ```

pub mod commands;
pub mod error;
pub mod session;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use commands::cart::CartResponse;
pub use error::{ApiError, ConfigError, ErrorCode};
pub use session::Session;
pub use state::{CartDispatcher, CartReader, CartStore, StorefrontConfig};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_session=trace` - Trace this crate only
/// - Default: INFO, with cart dispatches at DEBUG
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,probiotic_core=debug,storefront_session=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

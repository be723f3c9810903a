//! # Session
//!
//! One browser session: a fresh cart store plus the loaded configuration.
//! The cart lives exactly as long as the session; nothing is persisted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use probiotic_core::CartState;
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use crate::error::ConfigResult;
use crate::state::{CartDispatcher, CartReader, CartStore, StorefrontConfig};

/// A running storefront session.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    config: Arc<StorefrontConfig>,
    store: CartStore,
}

impl Session {
    /// Starts a session with an empty cart.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_session::{Session, StorefrontConfig};
    ///
    /// let session = Session::start(StorefrontConfig::default()).unwrap();
    /// assert!(session.reader().snapshot().is_empty());
    /// let final_cart = session.end();
    /// assert!(final_cart.is_empty());
    /// ```
    pub fn start(config: StorefrontConfig) -> ConfigResult<Self> {
        config.validate()?;

        let session = Session {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            config: Arc::new(config),
            store: CartStore::new(),
        };

        info!(
            session_id = %session.id,
            store = %session.config.store.name,
            "Storefront session started"
        );
        Ok(session)
    }

    /// Ends the session and returns the cart as it was.
    ///
    /// The store is closed, so handles still held by pages stop changing it.
    pub fn end(self) -> CartState {
        let final_state = self.store.close();
        info!(
            session_id = %self.id,
            items = final_state.item_count(),
            total = %final_state.total(),
            "Storefront session ended"
        );
        final_state
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn reader(&self) -> CartReader {
        self.store.reader()
    }

    pub fn dispatcher(&self) -> CartDispatcher {
        self.store.dispatcher()
    }

    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.store.subscribe()
    }
}

//! Shared application state for the web server.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};

use crate::core::TourforgeCore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct WebAppState {
    core: Arc<RwLock<TourforgeCore>>,
}

impl WebAppState {
    pub fn new(core: TourforgeCore) -> Self {
        Self {
            core: Arc::new(RwLock::new(core)),
        }
    }

    /// Read access to the core infrastructure
    pub async fn core(&self) -> RwLockReadGuard<'_, TourforgeCore> {
        self.core.read().await
    }
}

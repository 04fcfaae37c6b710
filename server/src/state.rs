//! Shared relay state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds only the connected clients: the relay keeps no stroke state,
//! clients are the source of truth.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use tracing::debug;
use uuid::Uuid;

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

/// Capacity of each client's outbound queue.
pub const CLIENT_CHANNEL_CAPACITY: usize = 256;

/// Shared application state. Clone is required by Axum; the client map is
/// Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    /// Connected clients: `client_id` -> sender for outgoing text frames.
    clients: Arc<RwLock<HashMap<Uuid, mpsc::Sender<String>>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a client and return the new total.
    pub async fn register(&self, client_id: Uuid, tx: mpsc::Sender<String>) -> usize {
        let mut clients = self.clients.write().await;
        clients.insert(client_id, tx);
        clients.len()
    }

    /// Remove a client and return the remaining total.
    pub async fn unregister(&self, client_id: Uuid) -> usize {
        let mut clients = self.clients.write().await;
        clients.remove(&client_id);
        clients.len()
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Queue `text` for every client except `exclude`. Returns how many
    /// clients it was queued for.
    ///
    /// Best-effort: a client whose queue is full or closed misses the frame.
    pub async fn broadcast(&self, text: &str, exclude: Option<Uuid>) -> usize {
        let clients = self.clients.read().await;
        let mut delivered = 0;
        for (client_id, tx) in clients.iter() {
            if exclude == Some(*client_id) {
                continue;
            }
            match tx.try_send(text.to_owned()) {
                Ok(()) => delivered += 1,
                Err(e) => debug!(%client_id, error = %e, "relay: frame dropped for peer"),
            }
        }
        delivered
    }
}

//! WebSocket handler: stroke relay between connected boards.
//!
//! DESIGN
//! ======
//! On upgrade, generates a client ID and enters a `select!` loop:
//! - Incoming client text → stamp sender → broadcast to peers
//! - Broadcast text from peers → forward to client
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → register → send `connection` welcome with `clientId`
//! 2. Broadcast the new `totalClients` to peers
//! 3. Relay frames until close or error
//! 4. Unregister → broadcast the new `totalClients`

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::relay::{self, Inbound};
use crate::state::{AppState, CLIENT_CHANNEL_CAPACITY};

#[cfg(test)]
#[path = "ws_test.rs"]
mod ws_test;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();

    // Per-connection channel for receiving broadcast text from peers.
    let (client_tx, mut client_rx) = mpsc::channel::<String>(CLIENT_CHANNEL_CAPACITY);
    let total = state.register(client_id, client_tx).await;

    if let Err(e) = send_text(&mut socket, relay::welcome(client_id, total)).await {
        warn!(%client_id, error = %e, "ws: welcome failed");
        leave(&state, client_id).await;
        return;
    }
    info!(%client_id, total, "ws: client connected");
    state.broadcast(&relay::peer_count(total), Some(client_id)).await;

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        debug!(%client_id, error = %e, "ws: receive failed");
                        break;
                    }
                };
                match msg {
                    Message::Text(text) => relay_inbound(&state, client_id, text.as_str()).await,
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(text) = client_rx.recv() => {
                if let Err(e) = send_text(&mut socket, text).await {
                    debug!(%client_id, error = %e, "ws: send failed");
                    break;
                }
            }
        }
    }

    leave(&state, client_id).await;
}

async fn relay_inbound(state: &AppState, client_id: Uuid, text: &str) {
    match relay::route_inbound(text, client_id) {
        Inbound::Keepalive => debug!(%client_id, "ws: keepalive"),
        Inbound::Relay(out) => {
            let peers = state.broadcast(&out, Some(client_id)).await;
            debug!(%client_id, peers, bytes = out.len(), "ws: relayed frame");
        }
    }
}

async fn leave(state: &AppState, client_id: Uuid) {
    let total = state.unregister(client_id).await;
    state.broadcast(&relay::peer_count(total), None).await;
    info!(%client_id, total, "ws: client disconnected");
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_text(socket: &mut WebSocket, text: String) -> Result<(), axum::Error> {
    socket.send(Message::Text(text.into())).await
}

//! Relay service: sender stamping and connection broadcasts.
//!
//! DESIGN
//! ======
//! The relay does not validate payload shape. An inbound JSON object gets
//! its `clientId` overwritten with the sender's id; anything else is passed
//! through verbatim. The only message the relay interprets is `ping`, which
//! is consumed as a keepalive.

use frames::{SyncMessage, SyncPayload, encode_message};
use serde_json::Value;
use uuid::Uuid;

#[cfg(test)]
#[path = "relay_test.rs"]
mod relay_test;

/// What to do with one inbound text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Keepalive: not relayed.
    Keepalive,
    /// Fan this text out to every other client.
    Relay(String),
}

/// Classify an inbound text frame from `sender`.
#[must_use]
pub fn route_inbound(text: &str, sender: Uuid) -> Inbound {
    let Ok(Value::Object(mut obj)) = serde_json::from_str::<Value>(text) else {
        return Inbound::Relay(text.to_owned());
    };
    if obj.get("type").and_then(Value::as_str) == Some("ping") {
        return Inbound::Keepalive;
    }
    obj.insert("clientId".into(), Value::String(sender.to_string()));
    Inbound::Relay(Value::Object(obj).to_string())
}

fn total(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// Greeting sent to a client right after it connects.
#[must_use]
pub fn welcome(client_id: Uuid, total_clients: usize) -> String {
    encode_message(&SyncMessage::new(SyncPayload::Connection {
        connected: Some(true),
        total_clients: Some(total(total_clients)),
        client_id: Some(client_id.to_string()),
    }))
}

/// Peer-count update broadcast on every join and leave.
#[must_use]
pub fn peer_count(total_clients: usize) -> String {
    encode_message(&SyncMessage::new(SyncPayload::Connection {
        connected: None,
        total_clients: Some(total(total_clients)),
        client_id: None,
    }))
}

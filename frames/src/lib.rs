//! Sync message model and JSON codec for the remote stroke channel.
//!
//! This crate owns the wire representation shared by the `server` relay and
//! the `airboard` session. Every message is a JSON object
//! `{ "type": ..., "data": ..., "clientId": ... }`; the relay stamps
//! `clientId` with the sender's id before fanning out.
//!
//! Decoding is strict about shape but lenient about optional fields: a stroke
//! without a color still decodes, a stroke without an id does not. Callers
//! treat every [`CodecError`] as a dropped message, never as a fault.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Error returned by [`decode_message`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not valid JSON.
    #[error("failed to parse sync message: {0}")]
    Json(#[from] serde_json::Error),
    /// Valid JSON, but not an object.
    #[error("sync message is not a JSON object")]
    NotAnObject,
    /// The object has no string `type` field.
    #[error("sync message has no type")]
    MissingType,
    /// The `type` is not one this protocol knows.
    #[error("unknown sync message type: {0}")]
    UnknownType(String),
    /// The `data` payload does not match its `type`.
    #[error("malformed {kind} payload: {reason}")]
    Payload { kind: &'static str, reason: String },
}

// =============================================================================
// MODEL
// =============================================================================

/// A stroke point as sent on the wire (world coordinates).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    pub x: f64,
    pub y: f64,
}

/// Gesture kinds that can be toggled remotely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureName {
    Draw,
    Erase,
    Pan,
    Zoom,
}

/// The typed `data` of a sync message, discriminated by `type`.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncPayload {
    /// Begin a remote stroke.
    Stroke { id: String, points: Vec<WirePoint>, color: String, thickness: f64 },
    /// Append one point.
    StrokeUpdate { id: String, point: WirePoint },
    /// Finalize.
    StrokeEnd { id: String },
    Clear,
    Undo,
    ToggleGesture { gesture: GestureName, enabled: bool },
    /// Relay broadcast about connected peers.
    Connection { connected: Option<bool>, total_clients: Option<u64>, client_id: Option<String> },
    /// Keepalive.
    Ping,
}

impl SyncPayload {
    /// The wire `type` string.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stroke { .. } => "stroke",
            Self::StrokeUpdate { .. } => "stroke_update",
            Self::StrokeEnd { .. } => "stroke_end",
            Self::Clear => "clear",
            Self::Undo => "undo",
            Self::ToggleGesture { .. } => "toggle_gesture",
            Self::Connection { .. } => "connection",
            Self::Ping => "ping",
        }
    }
}

/// A single message on the sync channel.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncMessage {
    pub payload: SyncPayload,
    /// Sender id stamped by the relay. Absent on locally built messages.
    pub client_id: Option<String>,
}

impl SyncMessage {
    #[must_use]
    pub fn new(payload: SyncPayload) -> Self {
        Self { payload, client_id: None }
    }

    /// Namespace a sender-chosen stroke id with the sender's client id, so
    /// two peers reusing the same id never share a stroke.
    #[must_use]
    pub fn scoped_id(&self, id: &str) -> String {
        match &self.client_id {
            Some(client) => format!("{client}:{id}"),
            None => id.to_owned(),
        }
    }
}

// =============================================================================
// DECODE
// =============================================================================

/// Stroke ids arrive as strings or numbers depending on the sender.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

fn default_color() -> String {
    "#000000".to_owned()
}

fn default_thickness() -> f64 {
    2.0
}

#[derive(Deserialize)]
struct StrokeData {
    id: WireId,
    #[serde(default)]
    points: Vec<WirePoint>,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default = "default_thickness")]
    thickness: f64,
}

#[derive(Deserialize)]
struct StrokeUpdateData {
    id: WireId,
    point: WirePoint,
}

#[derive(Deserialize)]
struct StrokeEndData {
    id: WireId,
}

#[derive(Deserialize)]
struct ToggleData {
    gesture: GestureName,
    enabled: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConnectionData {
    connected: Option<bool>,
    total_clients: Option<u64>,
    client_id: Option<String>,
}

fn payload<T: serde::de::DeserializeOwned>(kind: &'static str, data: Value) -> Result<T, CodecError> {
    serde_json::from_value(data).map_err(|e| CodecError::Payload { kind, reason: e.to_string() })
}

/// Decode one text message.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for invalid JSON, [`CodecError::NotAnObject`]
/// and [`CodecError::MissingType`] for the wrong envelope,
/// [`CodecError::UnknownType`] for an unrecognised `type`, and
/// [`CodecError::Payload`] when `data` does not fit the type.
pub fn decode_message(text: &str) -> Result<SyncMessage, CodecError> {
    let Value::Object(mut obj) = serde_json::from_str::<Value>(text)? else {
        return Err(CodecError::NotAnObject);
    };
    let kind = match obj.remove("type") {
        Some(Value::String(kind)) => kind,
        _ => return Err(CodecError::MissingType),
    };
    let client_id = match obj.remove("clientId") {
        Some(Value::String(id)) => Some(id),
        _ => None,
    };
    let data = obj.remove("data").unwrap_or(Value::Null);

    let payload = match kind.as_str() {
        "stroke" => {
            let d: StrokeData = payload("stroke", data)?;
            SyncPayload::Stroke { id: d.id.into(), points: d.points, color: d.color, thickness: d.thickness }
        }
        "stroke_update" => {
            let d: StrokeUpdateData = payload("stroke_update", data)?;
            SyncPayload::StrokeUpdate { id: d.id.into(), point: d.point }
        }
        "stroke_end" => {
            let d: StrokeEndData = payload("stroke_end", data)?;
            SyncPayload::StrokeEnd { id: d.id.into() }
        }
        "clear" => SyncPayload::Clear,
        "undo" => SyncPayload::Undo,
        "toggle_gesture" => {
            let d: ToggleData = payload("toggle_gesture", data)?;
            SyncPayload::ToggleGesture { gesture: d.gesture, enabled: d.enabled }
        }
        "connection" => {
            let d: ConnectionData = if data.is_null() { ConnectionData::default() } else { payload("connection", data)? };
            SyncPayload::Connection { connected: d.connected, total_clients: d.total_clients, client_id: d.client_id }
        }
        "ping" => SyncPayload::Ping,
        _ => return Err(CodecError::UnknownType(kind)),
    };

    Ok(SyncMessage { payload, client_id })
}

// =============================================================================
// ENCODE
// =============================================================================

fn point_json(p: WirePoint) -> Value {
    json!({ "x": p.x, "y": p.y })
}

fn payload_json(payload: &SyncPayload) -> Option<Value> {
    match payload {
        SyncPayload::Stroke { id, points, color, thickness } => Some(json!({
            "id": id,
            "points": points.iter().copied().map(point_json).collect::<Vec<_>>(),
            "color": color,
            "thickness": thickness,
        })),
        SyncPayload::StrokeUpdate { id, point } => Some(json!({ "id": id, "point": point_json(*point) })),
        SyncPayload::StrokeEnd { id } => Some(json!({ "id": id })),
        SyncPayload::ToggleGesture { gesture, enabled } => Some(json!({ "gesture": gesture, "enabled": enabled })),
        SyncPayload::Connection { connected, total_clients, client_id } => {
            let mut data = Map::new();
            if let Some(connected) = connected {
                data.insert("connected".into(), Value::Bool(*connected));
            }
            if let Some(total) = total_clients {
                data.insert("totalClients".into(), Value::from(*total));
            }
            if let Some(id) = client_id {
                data.insert("clientId".into(), Value::String(id.clone()));
            }
            Some(Value::Object(data))
        }
        SyncPayload::Clear | SyncPayload::Undo | SyncPayload::Ping => None,
    }
}

/// Encode a message as its JSON value.
#[must_use]
pub fn message_to_value(msg: &SyncMessage) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), Value::String(msg.payload.kind().to_owned()));
    if let Some(data) = payload_json(&msg.payload) {
        obj.insert("data".into(), data);
    }
    if let Some(id) = &msg.client_id {
        obj.insert("clientId".into(), Value::String(id.clone()));
    }
    Value::Object(obj)
}

/// Encode a message as JSON text.
#[must_use]
pub fn encode_message(msg: &SyncMessage) -> String {
    message_to_value(msg).to_string()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

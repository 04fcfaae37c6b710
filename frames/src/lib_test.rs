#![allow(clippy::float_cmp)]

use super::*;

fn decode(text: &str) -> SyncMessage {
    decode_message(text).expect("decode should succeed")
}

// --- Decode: stroke family ---

#[test]
fn decodes_stroke_begin() {
    let msg = decode(
        r##"{"type":"stroke","data":{"id":"s1","points":[{"x":1,"y":2},{"x":3.5,"y":4}],"color":"#ff0000","thickness":6},"clientId":"c1"}"##,
    );
    assert_eq!(msg.client_id.as_deref(), Some("c1"));
    let SyncPayload::Stroke { id, points, color, thickness } = msg.payload else {
        panic!("expected stroke, got {:?}", msg.payload);
    };
    assert_eq!(id, "s1");
    assert_eq!(points, vec![WirePoint { x: 1.0, y: 2.0 }, WirePoint { x: 3.5, y: 4.0 }]);
    assert_eq!(color, "#ff0000");
    assert_eq!(thickness, 6.0);
}

#[test]
fn stroke_defaults_optional_fields() {
    let msg = decode(r#"{"type":"stroke","data":{"id":7}}"#);
    let SyncPayload::Stroke { id, points, color, thickness } = msg.payload else {
        panic!("expected stroke");
    };
    assert_eq!(id, "7");
    assert!(points.is_empty());
    assert_eq!(color, "#000000");
    assert_eq!(thickness, 2.0);
    assert_eq!(msg.client_id, None);
}

#[test]
fn numeric_ids_become_strings() {
    let msg = decode(r#"{"type":"stroke_update","data":{"id":1712345678901,"point":{"x":0,"y":0}}}"#);
    assert!(matches!(msg.payload, SyncPayload::StrokeUpdate { ref id, .. } if id == "1712345678901"));

    let msg = decode(r#"{"type":"stroke_end","data":{"id":"abc"}}"#);
    assert_eq!(msg.payload, SyncPayload::StrokeEnd { id: "abc".into() });
}

#[test]
fn stroke_without_id_is_malformed() {
    let err = decode_message(r#"{"type":"stroke","data":{"points":[]}}"#).expect_err("missing id");
    assert!(matches!(err, CodecError::Payload { kind: "stroke", .. }), "{err}");
}

#[test]
fn stroke_update_without_point_is_malformed() {
    let err = decode_message(r#"{"type":"stroke_update","data":{"id":"a"}}"#).expect_err("missing point");
    assert!(matches!(err, CodecError::Payload { kind: "stroke_update", .. }));
}

// --- Decode: control messages ---

#[test]
fn decodes_dataless_messages() {
    assert_eq!(decode(r#"{"type":"clear"}"#).payload, SyncPayload::Clear);
    assert_eq!(decode(r#"{"type":"undo","data":null}"#).payload, SyncPayload::Undo);
    assert_eq!(decode(r#"{"type":"ping"}"#).payload, SyncPayload::Ping);
}

#[test]
fn decodes_toggle_gesture() {
    let msg = decode(r#"{"type":"toggle_gesture","data":{"gesture":"erase","enabled":false}}"#);
    assert_eq!(msg.payload, SyncPayload::ToggleGesture { gesture: GestureName::Erase, enabled: false });
}

#[test]
fn toggle_with_unknown_gesture_is_malformed() {
    let err = decode_message(r#"{"type":"toggle_gesture","data":{"gesture":"lasso","enabled":true}}"#)
        .expect_err("unknown gesture");
    assert!(matches!(err, CodecError::Payload { kind: "toggle_gesture", .. }));
}

#[test]
fn decodes_connection_broadcast() {
    let msg = decode(r#"{"type":"connection","data":{"connected":true,"clientId":"me","totalClients":3}}"#);
    assert_eq!(
        msg.payload,
        SyncPayload::Connection { connected: Some(true), total_clients: Some(3), client_id: Some("me".into()) }
    );
    let msg = decode(r#"{"type":"connection","data":{"totalClients":2}}"#);
    assert_eq!(msg.payload, SyncPayload::Connection { connected: None, total_clients: Some(2), client_id: None });
    let msg = decode(r#"{"type":"connection"}"#);
    assert_eq!(msg.payload, SyncPayload::Connection { connected: None, total_clients: None, client_id: None });
}

// --- Decode: envelope errors ---

#[test]
fn rejects_invalid_json() {
    assert!(matches!(decode_message("{not json"), Err(CodecError::Json(_))));
}

#[test]
fn rejects_non_object() {
    assert!(matches!(decode_message("[1,2]"), Err(CodecError::NotAnObject)));
    assert!(matches!(decode_message("\"stroke\""), Err(CodecError::NotAnObject)));
}

#[test]
fn rejects_missing_or_non_string_type() {
    assert!(matches!(decode_message(r#"{"data":{}}"#), Err(CodecError::MissingType)));
    assert!(matches!(decode_message(r#"{"type":3}"#), Err(CodecError::MissingType)));
}

#[test]
fn rejects_unknown_type() {
    let err = decode_message(r#"{"type":"cursor","data":{}}"#).expect_err("unknown type");
    assert!(matches!(err, CodecError::UnknownType(ref t) if t == "cursor"));
}

#[test]
fn non_string_client_id_is_ignored() {
    let msg = decode(r#"{"type":"clear","clientId":42}"#);
    assert_eq!(msg.client_id, None);
}

// --- Encode ---

#[test]
fn encodes_envelope_shape() {
    let msg = SyncMessage::new(SyncPayload::ToggleGesture { gesture: GestureName::Pan, enabled: true });
    let value: Value = serde_json::from_str(&encode_message(&msg)).expect("valid json");
    assert_eq!(value, json!({ "type": "toggle_gesture", "data": { "gesture": "pan", "enabled": true } }));
}

#[test]
fn dataless_messages_omit_data() {
    let value = message_to_value(&SyncMessage::new(SyncPayload::Ping));
    assert_eq!(value, json!({ "type": "ping" }));
}

#[test]
fn client_id_is_emitted_when_present() {
    let msg = SyncMessage { payload: SyncPayload::Clear, client_id: Some("abc".into()) };
    assert_eq!(message_to_value(&msg), json!({ "type": "clear", "clientId": "abc" }));
}

#[test]
fn encoded_stroke_decodes_back() {
    let msg = SyncMessage {
        payload: SyncPayload::Stroke {
            id: "s9".into(),
            points: vec![WirePoint { x: 1.5, y: -2.0 }],
            color: "#00ff00".into(),
            thickness: 3.0,
        },
        client_id: Some("peer".into()),
    };
    assert_eq!(decode(&encode_message(&msg)), msg);
}

#[test]
fn connection_uses_camel_case_keys() {
    let msg = SyncMessage::new(SyncPayload::Connection {
        connected: Some(true),
        total_clients: Some(4),
        client_id: Some("x".into()),
    });
    assert_eq!(
        message_to_value(&msg),
        json!({ "type": "connection", "data": { "connected": true, "totalClients": 4, "clientId": "x" } })
    );
}

// --- Scoping ---

#[test]
fn scoped_id_prefixes_sender() {
    let stamped = SyncMessage { payload: SyncPayload::Clear, client_id: Some("c1".into()) };
    assert_eq!(stamped.scoped_id("42"), "c1:42");
    assert_eq!(SyncMessage::new(SyncPayload::Clear).scoped_id("42"), "42");
}

#[test]
fn kind_matches_wire_names() {
    assert_eq!(SyncPayload::StrokeUpdate { id: String::new(), point: WirePoint { x: 0.0, y: 0.0 } }.kind(), "stroke_update");
    assert_eq!(SyncPayload::Undo.kind(), "undo");
}

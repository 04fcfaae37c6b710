use super::*;
use canvas::Template;
use gestures::consts::{INDEX_TIP, MIDDLE_MCP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP, WRIST};
use gestures::landmark::LANDMARK_COUNT;
use gestures::{Hand, Handedness, Landmark};

// --- Fixtures ---

fn pinch_hand(handedness: Handedness, px: f64, py: f64) -> Hand {
    let mut landmarks = [Landmark::new(px, py + 0.1, 0.0); LANDMARK_COUNT];
    for (idx, x, y) in [
        (WRIST, px, py + 0.25),
        (MIDDLE_MCP, px, py + 0.1),
        (THUMB_TIP, px - 0.01, py),
        (INDEX_TIP, px + 0.01, py),
        (MIDDLE_TIP, px, py + 0.12),
        (RING_TIP, px + 0.02, py + 0.12),
        (PINKY_TIP, px - 0.02, py + 0.12),
    ] {
        landmarks[idx] = Landmark::new(x, y, 0.0);
    }
    Hand::new(handedness, landmarks)
}

fn pinch(x: f64) -> HandFrame {
    HandFrame::new(vec![pinch_hand(Handedness::Right, x, 0.5)])
}

fn empty() -> HandFrame {
    HandFrame::default()
}

fn responsive_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.apply(ConfigUpdate::ActivationFrames(1));
    config.apply(ConfigUpdate::DeactivationFrames(1));
    config.apply(ConfigUpdate::SmoothingFactor(1.0));
    config
}

fn session() -> (Session, mpsc::Receiver<SyncMessage>) {
    let (tx, rx) = mpsc::channel(64);
    (Session::new(responsive_config(), 1280.0, 720.0, Some(tx)), rx)
}

fn drain(rx: &mut mpsc::Receiver<SyncMessage>) -> Vec<SyncPayload> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg.payload);
    }
    out
}

fn from_peer(payload: SyncPayload) -> SyncMessage {
    SyncMessage { payload, client_id: Some("peer".into()) }
}

fn remote_stroke(id: &str) -> SyncMessage {
    from_peer(SyncPayload::Stroke {
        id: id.into(),
        points: vec![WirePoint { x: 1.0, y: 2.0 }],
        color: "#ff0000".into(),
        thickness: 3.0,
    })
}

// =============================================================================
// Local gestures
// =============================================================================

#[test]
fn pinch_draws_and_streams_stroke_to_peers() {
    let (mut s, mut rx) = session();

    s.handle_frame(&pinch(0.50));
    assert!(drain(&mut rx).is_empty(), "single point is not announced");

    s.handle_frame(&pinch(0.52));
    let sent = drain(&mut rx);
    let [SyncPayload::Stroke { id, points, color, thickness }] = sent.as_slice() else {
        panic!("expected stroke announcement, got {sent:?}");
    };
    assert_eq!(points.len(), 2);
    assert_eq!(color, s.config.pen.color());
    assert!((thickness - s.config.pen.thickness()).abs() < 1e-12);
    let wire = id.clone();

    s.handle_frame(&pinch(0.54));
    let sent = drain(&mut rx);
    assert!(matches!(sent.as_slice(), [SyncPayload::StrokeUpdate { id, .. }] if *id == wire));

    s.handle_frame(&empty());
    assert_eq!(drain(&mut rx), vec![SyncPayload::StrokeEnd { id: wire }]);

    let strokes = s.board().strokes.as_slice();
    assert_eq!(strokes.len(), 1);
    assert!(strokes[0].complete);
    assert_eq!(strokes[0].points.len(), 3);
    assert!(s.board().can_undo());
}

#[test]
fn tap_pinch_is_discarded_and_never_announced() {
    let (mut s, mut rx) = session();
    s.handle_frame(&pinch(0.5));
    s.handle_frame(&empty());

    assert!(s.board().strokes.is_empty());
    assert!(drain(&mut rx).is_empty());
    assert_eq!(s.stats().frames, 2);
}

#[test]
fn finish_commits_stroke_in_progress() {
    let (mut s, mut rx) = session();
    s.handle_frame(&pinch(0.50));
    s.handle_frame(&pinch(0.53));
    drain(&mut rx);

    s.finish();
    assert!(s.board().active_stroke().is_none());
    assert!(s.board().strokes.as_slice()[0].complete);
    assert!(matches!(drain(&mut rx).as_slice(), [SyncPayload::StrokeEnd { .. }]));
}

#[test]
fn session_without_relay_still_draws() {
    let mut s = Session::new(responsive_config(), 1280.0, 720.0, None);
    s.handle_frame(&pinch(0.50));
    s.handle_frame(&pinch(0.55));
    s.handle_frame(&empty());
    assert_eq!(s.board().strokes.len(), 1);
}

// =============================================================================
// Local commands
// =============================================================================

#[test]
fn local_toggle_is_forwarded() {
    let (mut s, mut rx) = session();
    s.handle_input(LocalInput::Config {
        update: ConfigUpdate::GestureToggle { gesture: GestureKind::Erase, enabled: false },
    });

    assert!(!s.config.gestures.is_enabled(GestureKind::Erase));
    assert!(!s.engine.config().is_enabled(GestureKind::Erase));
    assert_eq!(drain(&mut rx), vec![SyncPayload::ToggleGesture { gesture: GestureName::Erase, enabled: false }]);

    // Writing the same value again changes nothing and sends nothing.
    s.handle_input(LocalInput::Config {
        update: ConfigUpdate::GestureToggle { gesture: GestureKind::Erase, enabled: false },
    });
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn other_settings_are_not_forwarded() {
    let (mut s, mut rx) = session();
    s.handle_input(LocalInput::Config { update: ConfigUpdate::PenColor("#123456".into()) });
    s.handle_input(LocalInput::Config { update: ConfigUpdate::Mirror(false) });
    s.handle_input(LocalInput::Config { update: ConfigUpdate::PinchThreshold(0.1) });

    assert_eq!(s.board().pen.color(), "#123456");
    assert!(!s.board().viewport.mirrored);
    assert!((s.engine.config().pinch_threshold() - 0.1).abs() < 1e-12);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn clear_and_undo_are_forwarded_redo_is_not() {
    let (mut s, mut rx) = session();
    s.handle_remote(&remote_stroke("a"));
    s.handle_remote(&from_peer(SyncPayload::StrokeEnd { id: "a".into() }));

    s.handle_input(LocalInput::Undo);
    assert!(s.board().strokes.is_empty());
    s.handle_input(LocalInput::Redo);
    assert_eq!(s.board().strokes.len(), 1);
    s.handle_input(LocalInput::Clear);
    assert!(s.board().strokes.is_empty());

    assert_eq!(drain(&mut rx), vec![SyncPayload::Undo, SyncPayload::Clear]);
    assert_eq!(s.stats().commands, 3);
}

#[test]
fn undo_with_empty_history_sends_nothing() {
    let (mut s, mut rx) = session();
    s.handle_input(LocalInput::Undo);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn layout_commands_reach_the_board() {
    let (mut s, _rx) = session();
    s.handle_input(LocalInput::Template { template: Template::Grid });
    assert_eq!(s.board().templates.visible(), Some(Template::Grid));
    s.handle_input(LocalInput::HideTemplates);
    assert_eq!(s.board().templates.visible(), None);

    s.handle_input(LocalInput::AddImage {
        source: "sketch.png".into(),
        x: 10.0,
        y: 20.0,
        width: 100.0,
        height: 50.0,
        opacity: 2.0,
    });
    let images = s.board().images.as_slice();
    assert_eq!(images.len(), 1);
    assert!((images[0].opacity - 1.0).abs() < 1e-12);

    s.handle_input(LocalInput::Resize { width: 640.0, height: 480.0 });
    assert!((s.board().viewport.width - 640.0).abs() < 1e-12);

    s.board.camera.pan_by(50.0, 50.0);
    s.handle_input(LocalInput::ResetCamera);
    assert!((s.board().camera.x).abs() < 1e-12);
    assert!((s.board().camera.zoom - 1.0).abs() < 1e-12);
}

// =============================================================================
// Remote messages
// =============================================================================

#[test]
fn remote_stroke_lifecycle_is_scoped_by_sender() {
    let (mut s, mut rx) = session();
    let id = StrokeId::remote("peer:s1");

    assert!(s.handle_remote(&remote_stroke("s1")));
    assert!(s.handle_remote(&from_peer(SyncPayload::StrokeUpdate { id: "s1".into(), point: WirePoint { x: 5.0, y: 6.0 } })));
    assert!(s.handle_remote(&from_peer(SyncPayload::StrokeEnd { id: "s1".into() })));

    let stroke = s.board().stroke(&id).expect("scoped remote stroke");
    assert_eq!(stroke.points, vec![Point::new(1.0, 2.0), Point::new(5.0, 6.0)]);
    assert_eq!(stroke.color, "#ff0000");
    assert!(stroke.complete);
    assert!(drain(&mut rx).is_empty(), "remote input is never echoed");
}

#[test]
fn same_stroke_id_from_two_peers_stays_separate() {
    let (mut s, _rx) = session();
    s.handle_remote(&remote_stroke("s1"));
    s.handle_remote(&SyncMessage { client_id: Some("other".into()), ..remote_stroke("s1") });
    assert_eq!(s.board().strokes.len(), 2);
}

#[test]
fn unknown_remote_update_is_ignored() {
    let (mut s, _rx) = session();
    s.handle_sync_event(SyncEvent::Message(from_peer(SyncPayload::StrokeUpdate {
        id: "ghost".into(),
        point: WirePoint { x: 0.0, y: 0.0 },
    })));

    assert!(s.board().strokes.is_empty());
    assert_eq!(s.stats().remote_ignored, 1);
    assert_eq!(s.stats().remote_applied, 0);
}

#[test]
fn remote_toggle_applies_without_echo() {
    let (mut s, mut rx) = session();
    s.handle_sync_event(SyncEvent::Message(from_peer(SyncPayload::ToggleGesture {
        gesture: GestureName::Draw,
        enabled: false,
    })));

    assert!(!s.config.gestures.is_enabled(GestureKind::Draw));
    assert!(drain(&mut rx).is_empty());

    s.handle_frame(&pinch(0.50));
    s.handle_frame(&pinch(0.55));
    s.handle_frame(&empty());
    assert!(s.board().strokes.is_empty());
    assert_eq!(s.stats().remote_applied, 1);
}

#[test]
fn remote_clear_and_undo_apply_to_board() {
    let (mut s, _rx) = session();
    s.handle_remote(&remote_stroke("a"));
    s.handle_remote(&from_peer(SyncPayload::StrokeEnd { id: "a".into() }));
    s.handle_remote(&remote_stroke("b"));
    s.handle_remote(&from_peer(SyncPayload::StrokeEnd { id: "b".into() }));

    assert!(s.handle_remote(&from_peer(SyncPayload::Undo)));
    assert_eq!(s.board().strokes.len(), 1);
    assert!(s.handle_remote(&from_peer(SyncPayload::Clear)));
    assert!(s.board().strokes.is_empty());
    assert!(!s.handle_remote(&from_peer(SyncPayload::Clear)));
}

#[test]
fn connection_messages_track_identity_and_peers() {
    let (mut s, _rx) = session();
    s.handle_remote(&SyncMessage::new(SyncPayload::Connection {
        connected: Some(true),
        total_clients: Some(1),
        client_id: Some("me".into()),
    }));
    assert_eq!(s.client_id(), Some("me"));
    assert_eq!(s.peers(), Some(1));

    s.handle_remote(&SyncMessage::new(SyncPayload::Connection {
        connected: None,
        total_clients: Some(3),
        client_id: None,
    }));
    assert_eq!(s.client_id(), Some("me"));
    assert_eq!(s.peers(), Some(3));

    s.handle_sync_event(SyncEvent::Disconnected);
    assert_eq!(s.peers(), None);
}

#[test]
fn ping_has_no_effect() {
    let (mut s, _rx) = session();
    assert!(!s.handle_remote(&SyncMessage::new(SyncPayload::Ping)));
}

// =============================================================================
// Event loop
// =============================================================================

#[tokio::test]
async fn run_drains_input_and_finishes_open_stroke() {
    let (out_tx, mut out_rx) = mpsc::channel(64);
    let s = Session::new(responsive_config(), 1280.0, 720.0, Some(out_tx));

    let (frame_tx, frame_rx) = mpsc::channel(8);
    let (cmd_tx, cmd_rx) = mpsc::channel(8);
    let (remote_tx, remote_rx) = mpsc::channel(8);
    for x in [0.50, 0.52, 0.54] {
        frame_tx.send(pinch(x)).await.unwrap();
    }
    cmd_tx.send(LocalInput::Template { template: Template::Lined }).await.unwrap();
    drop((frame_tx, cmd_tx, remote_tx));

    let s = s.run(frame_rx, cmd_rx, remote_rx).await;

    assert_eq!(s.board().templates.visible(), Some(Template::Lined));
    assert_eq!(s.board().strokes.len(), 1);
    assert!(s.board().strokes.as_slice()[0].complete);
    assert_eq!(s.stats().frames, 3);
    let kinds: Vec<&str> = drain(&mut out_rx).iter().map(SyncPayload::kind).collect();
    assert_eq!(kinds, vec!["stroke", "stroke_update", "stroke_end"]);
}

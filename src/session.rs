//! The session: sole owner of the board, gesture engine and configuration.
//!
//! DESIGN
//! ======
//! Every input is processed synchronously to completion in one task:
//! - hand frames → gesture engine → board
//! - local commands → board / config
//! - remote sync events → board
//!
//! Nothing else holds board state, so there is no locking. Ordering between
//! a local gesture and a remote fragment is whatever order the channels
//! deliver; every board operation tolerates it.
//!
//! OUTBOUND
//! ========
//! Local strokes are announced to peers once they have two points, then
//! streamed point by point and closed with `stroke_end`. Local clear, undo
//! and gesture toggles are forwarded too. Remote input is never echoed.

use canvas::{Action, Point, StrokeId, Viewport, WhiteboardCore};
use frames::{GestureName, SyncMessage, SyncPayload, WirePoint};
use gestures::{GestureEngine, GestureKind, HandFrame};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, ConfigUpdate};
use crate::input::LocalInput;
use crate::sync::SyncEvent;

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: usize,
    pub gesture_events: usize,
    pub commands: usize,
    pub remote_applied: usize,
    pub remote_ignored: usize,
}

pub struct Session {
    board: WhiteboardCore,
    engine: GestureEngine,
    config: AppConfig,
    outbound: Option<mpsc::Sender<SyncMessage>>,
    /// Local stroke peers already know about.
    announced: Option<StrokeId>,
    peers: Option<u64>,
    client_id: Option<String>,
    stats: SessionStats,
}

fn gesture_name(kind: GestureKind) -> GestureName {
    match kind {
        GestureKind::Draw => GestureName::Draw,
        GestureKind::Erase => GestureName::Erase,
        GestureKind::Pan => GestureName::Pan,
        GestureKind::Zoom => GestureName::Zoom,
    }
}

fn gesture_kind(name: GestureName) -> GestureKind {
    match name {
        GestureName::Draw => GestureKind::Draw,
        GestureName::Erase => GestureKind::Erase,
        GestureName::Pan => GestureKind::Pan,
        GestureName::Zoom => GestureKind::Zoom,
    }
}

/// The wire id of a local stroke. Remote strokes have none of their own.
fn wire_id(id: &StrokeId) -> Option<String> {
    match id {
        StrokeId::Local(uuid) => Some(uuid.to_string()),
        StrokeId::Remote(_) => None,
    }
}

fn wire_point(p: Point) -> WirePoint {
    WirePoint { x: p.x, y: p.y }
}

impl Session {
    #[must_use]
    pub fn new(config: AppConfig, width: f64, height: f64, outbound: Option<mpsc::Sender<SyncMessage>>) -> Self {
        let mut board = WhiteboardCore::new(Viewport::new(width, height, config.mirrored));
        board.pen = config.pen.clone();
        let engine = GestureEngine::new(config.gestures);
        Self {
            board,
            engine,
            config,
            outbound,
            announced: None,
            peers: None,
            client_id: None,
            stats: SessionStats::default(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &WhiteboardCore {
        &self.board
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Connected clients as last reported by the relay.
    #[must_use]
    pub fn peers(&self) -> Option<u64> {
        self.peers
    }

    /// Our id as assigned by the relay.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    // =========================================================================
    // EVENT LOOP
    // =========================================================================

    /// Consume every channel until local input ends, then finish any stroke
    /// still in progress.
    pub async fn run(
        mut self,
        mut frames: mpsc::Receiver<HandFrame>,
        mut commands: mpsc::Receiver<LocalInput>,
        mut remote: mpsc::Receiver<SyncEvent>,
    ) -> Self {
        let (mut frames_open, mut commands_open, mut remote_open) = (true, true, true);

        while frames_open || commands_open {
            tokio::select! {
                biased;
                input = commands.recv(), if commands_open => match input {
                    Some(input) => self.handle_input(input),
                    None => commands_open = false,
                },
                frame = frames.recv(), if frames_open => match frame {
                    Some(frame) => self.handle_frame(&frame),
                    None => frames_open = false,
                },
                event = remote.recv(), if remote_open => match event {
                    Some(event) => self.handle_sync_event(event),
                    None => remote_open = false,
                },
                else => break,
            }
        }

        self.finish();
        let stats = self.stats;
        info!(
            frames = stats.frames,
            gesture_events = stats.gesture_events,
            commands = stats.commands,
            remote_applied = stats.remote_applied,
            remote_ignored = stats.remote_ignored,
            strokes = self.board.strokes.len(),
            "session: input closed"
        );
        self
    }

    /// End the local stroke in progress, if any.
    pub fn finish(&mut self) {
        let action = self.board.end_stroke();
        self.publish(&action);
    }

    // =========================================================================
    // LOCAL INPUT
    // =========================================================================

    /// Run one tracking frame through the gesture engine and apply its events.
    pub fn handle_frame(&mut self, frame: &HandFrame) {
        self.stats.frames += 1;
        for event in self.engine.process(frame) {
            self.stats.gesture_events += 1;
            let action = self.board.apply_gesture(&event);
            self.publish(&action);
        }
    }

    pub fn handle_input(&mut self, input: LocalInput) {
        if !matches!(input, LocalInput::Frame(_)) {
            self.stats.commands += 1;
        }
        match input {
            LocalInput::Frame(frame) => self.handle_frame(&frame),
            LocalInput::Config { update } => self.apply_config(update, true),
            LocalInput::Resize { width, height } => self.board.resize(width, height),
            LocalInput::Undo => {
                if self.board.undo() {
                    self.send(SyncPayload::Undo);
                }
            }
            LocalInput::Redo => {
                self.board.redo();
            }
            LocalInput::Clear => {
                let removed = self.board.clear();
                debug!(removed, "session: board cleared");
                self.send(SyncPayload::Clear);
            }
            LocalInput::Template { template } => self.board.select_template(template),
            LocalInput::HideTemplates => self.board.hide_templates(),
            LocalInput::AddImage { source, x, y, width, height, opacity } => {
                let id = self.board.add_image(&source, Point::new(x, y), width, height, opacity);
                debug!(%id, %source, "session: image added");
            }
            LocalInput::ResetCamera => self.board.reset_camera(),
        }
    }

    /// Apply a settings write and push it into the engine and board.
    /// Local gesture toggles are forwarded to peers when `forward` is set.
    fn apply_config(&mut self, update: ConfigUpdate, forward: bool) {
        let toggle = match update {
            ConfigUpdate::GestureToggle { gesture, enabled } => Some((gesture, enabled)),
            _ => None,
        };
        if !self.config.apply(update) {
            return;
        }
        self.engine.set_config(self.config.gestures);
        self.board.pen = self.config.pen.clone();
        self.board.set_mirrored(self.config.mirrored);

        if let (true, Some((gesture, enabled))) = (forward, toggle) {
            self.send(SyncPayload::ToggleGesture { gesture: gesture_name(gesture), enabled });
        }
    }

    // --- Outbound ---

    fn publish(&mut self, action: &Action) {
        match action {
            Action::StrokeStarted(_) => self.close_announced(),
            Action::RenderNeeded => self.publish_progress(),
            Action::StrokeCommitted(id) if self.announced.as_ref() == Some(id) => self.close_announced(),
            _ => {}
        }
    }

    fn publish_progress(&mut self) {
        let Some(id) = self.board.active_stroke().cloned() else { return };
        let Some(wire) = wire_id(&id) else { return };
        let Some(stroke) = self.board.stroke(&id) else { return };

        let payload = if self.announced.as_ref() == Some(&id) {
            let Some(point) = stroke.last_point() else { return };
            SyncPayload::StrokeUpdate { id: wire, point: wire_point(point) }
        } else {
            SyncPayload::Stroke {
                id: wire,
                points: stroke.points.iter().copied().map(wire_point).collect(),
                color: stroke.color.clone(),
                thickness: stroke.thickness,
            }
        };
        self.announced = Some(id);
        self.send(payload);
    }

    fn close_announced(&mut self) {
        if let Some(wire) = self.announced.take().as_ref().and_then(wire_id) {
            self.send(SyncPayload::StrokeEnd { id: wire });
        }
    }

    fn send(&self, payload: SyncPayload) {
        let Some(tx) = &self.outbound else { return };
        if let Err(e) = tx.try_send(SyncMessage::new(payload)) {
            debug!(error = %e, "session: outbound message dropped");
        }
    }

    // =========================================================================
    // REMOTE INPUT
    // =========================================================================

    pub fn handle_sync_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Connected => info!("session: relay connected"),
            SyncEvent::Disconnected => {
                self.peers = None;
                warn!("session: relay disconnected");
            }
            SyncEvent::Message(msg) => {
                if self.handle_remote(&msg) {
                    self.stats.remote_applied += 1;
                } else {
                    self.stats.remote_ignored += 1;
                    debug!(kind = msg.payload.kind(), "session: remote message had no effect");
                }
            }
        }
    }

    /// Apply one remote message. Returns whether it changed anything.
    pub fn handle_remote(&mut self, msg: &SyncMessage) -> bool {
        match &msg.payload {
            SyncPayload::Stroke { id, points, color, thickness } => {
                let points = points.iter().map(|p| Point::new(p.x, p.y)).collect();
                self.board.add_remote_stroke(&msg.scoped_id(id), points, color, *thickness);
                true
            }
            SyncPayload::StrokeUpdate { id, point } => {
                self.board.update_remote_stroke(&msg.scoped_id(id), Point::new(point.x, point.y))
            }
            SyncPayload::StrokeEnd { id } => self.board.finalize_remote_stroke(&msg.scoped_id(id)),
            SyncPayload::Clear => self.board.clear() > 0,
            SyncPayload::Undo => self.board.undo(),
            SyncPayload::ToggleGesture { gesture, enabled } => {
                let update = ConfigUpdate::GestureToggle { gesture: gesture_kind(*gesture), enabled: *enabled };
                let before = self.config.gestures;
                self.apply_config(update, false);
                self.config.gestures != before
            }
            SyncPayload::Connection { connected, total_clients, client_id } => {
                if let Some(total) = total_clients {
                    self.peers = Some(*total);
                }
                if *connected == Some(true) {
                    self.client_id.clone_from(client_id);
                }
                info!(peers = ?self.peers, client_id = ?self.client_id, "session: relay connection update");
                true
            }
            SyncPayload::Ping => false,
        }
    }
}

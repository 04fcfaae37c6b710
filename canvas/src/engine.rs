use gestures::{GestureEvent, NormPoint};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{MIN_SEGMENT_WORLD, MIN_STROKE_POINTS};
use crate::doc::{Pen, Stroke, StrokeId, StrokeStore, clamp_thickness};
use crate::hit::strokes_hit;
use crate::history::{History, HistoryOp};
use crate::layers::{ImageLayer, ImageStore, Template, TemplateLayer};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// What a gesture did to the board, for the host to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    StrokeStarted(StrokeId),
    StrokeCommitted(StrokeId),
    /// The stroke ended with too few points and was dropped.
    StrokeDiscarded(StrokeId),
    StrokesErased(Vec<StrokeId>),
    CameraChanged,
    RenderNeeded,
}

/// Serializable view of the whole board, for renderers and dumps.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    pub camera: Camera,
    pub viewport: Viewport,
    pub template: Option<Template>,
    pub images: Vec<ImageLayer>,
    pub strokes: Vec<Stroke>,
    pub active_stroke: Option<StrokeId>,
}

impl BoardSnapshot {
    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; never expected for these types.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn now_ms() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(nanos).unwrap_or(i64::MAX)
}

/// Whiteboard state and every operation that mutates it.
///
/// Local gesture intents and remote stroke fragments both land here. All
/// operations are synchronous and tolerate any interleaving of the two
/// producers: unknown remote ids are ignored, and the identifier spaces are
/// disjoint through [`StrokeId`].
#[derive(Debug, Default)]
pub struct WhiteboardCore {
    pub strokes: StrokeStore,
    pub camera: Camera,
    pub viewport: Viewport,
    pub pen: Pen,
    pub templates: TemplateLayer,
    pub images: ImageStore,
    history: History,
    /// Local stroke currently receiving points.
    active: Option<StrokeId>,
}

impl WhiteboardCore {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport, ..Self::default() }
    }

    // --- Viewport ---

    /// Update the canvas pixel size.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.viewport.width = width;
            self.viewport.height = height;
        }
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.viewport.mirrored = mirrored;
    }

    // --- Gesture dispatch ---

    /// Apply one gesture intent. Positions are normalized; they are mapped
    /// to canvas pixels with the current viewport first.
    pub fn apply_gesture(&mut self, event: &GestureEvent) -> Action {
        match *event {
            GestureEvent::DrawStart { position } => {
                Action::StrokeStarted(self.start_stroke(self.viewport.normalized_to_screen(position)))
            }
            GestureEvent::DrawMove { position } => {
                if self.continue_stroke(self.viewport.normalized_to_screen(position)) {
                    Action::RenderNeeded
                } else {
                    Action::None
                }
            }
            GestureEvent::DrawEnd { .. } => self.end_stroke(),
            GestureEvent::Erase { position, radius } => {
                let erased = self.erase_at_point(self.viewport.normalized_to_screen(position), radius);
                if erased.is_empty() { Action::None } else { Action::StrokesErased(erased) }
            }
            GestureEvent::Pan { delta } => {
                self.pan(delta);
                Action::CameraChanged
            }
            GestureEvent::Zoom { factor, center } => {
                self.zoom(factor, self.viewport.normalized_to_screen(center));
                Action::CameraChanged
            }
            GestureEvent::Idle => Action::None,
        }
    }

    // --- Local strokes ---

    /// Begin a new local stroke at a screen point. An unfinished stroke is ended first.
    pub fn start_stroke(&mut self, screen: Point) -> StrokeId {
        if self.active.is_some() {
            self.end_stroke();
        }
        let world = self.camera.screen_to_world(screen, &self.viewport);
        let id = StrokeId::new_local();
        let stroke = Stroke::new(id.clone(), vec![world], self.pen.color(), self.pen.thickness(), now_ms());
        self.strokes.push(stroke);
        self.active = Some(id.clone());
        debug!(%id, "stroke started");
        id
    }

    /// Append to the active stroke. Returns whether a point was added.
    ///
    /// Points within one world unit of the last point are dropped.
    pub fn continue_stroke(&mut self, screen: Point) -> bool {
        let world = self.camera.screen_to_world(screen, &self.viewport);
        let Some(stroke) = self.active.as_ref().and_then(|id| self.strokes.get_mut(id)) else {
            return false;
        };
        if stroke.last_point().is_some_and(|last| last.distance(world) <= MIN_SEGMENT_WORLD) {
            return false;
        }
        stroke.points.push(world);
        true
    }

    /// Finish the active stroke. Strokes shorter than two points are discarded.
    pub fn end_stroke(&mut self) -> Action {
        let Some(id) = self.active.take() else {
            return Action::None;
        };
        let Some(stroke) = self.strokes.get_mut(&id) else {
            return Action::None;
        };
        if stroke.points.len() < MIN_STROKE_POINTS {
            self.strokes.remove(&id);
            debug!(%id, "stroke discarded");
            return Action::StrokeDiscarded(id);
        }
        stroke.complete = true;
        let committed = stroke.clone();
        self.history.record(HistoryOp::Add(committed));
        debug!(%id, "stroke committed");
        Action::StrokeCommitted(id)
    }

    #[must_use]
    pub fn active_stroke(&self) -> Option<&StrokeId> {
        self.active.as_ref()
    }

    // --- Erase ---

    /// Remove every stroke with a point inside the eraser circle.
    ///
    /// `screen_radius` is in pixels and is divided by zoom, so the eraser
    /// keeps a constant size on screen.
    pub fn erase_at_point(&mut self, screen: Point, screen_radius: f64) -> Vec<StrokeId> {
        let center = self.camera.screen_to_world(screen, &self.viewport);
        let radius = self.camera.screen_dist_to_world(screen_radius);
        let hits = strokes_hit(&self.strokes, center, radius);
        if hits.is_empty() {
            return hits;
        }
        // The stroke in progress was never committed, so it leaves no history.
        if let Some(active) = self.active.take_if(|id| hits.contains(id)) {
            self.strokes.remove(&active);
            debug!(%active, "active stroke erased");
        }
        let removed = self.strokes.remove_where(|s| hits.contains(&s.id));
        if !removed.is_empty() {
            debug!(count = removed.len(), "strokes erased");
            self.history.record(HistoryOp::Erase(removed));
        }
        hits
    }

    // --- Camera ---

    /// Pan by a normalized delta. Content follows the hand, so the camera
    /// moves the opposite way.
    pub fn pan(&mut self, delta: NormPoint) {
        let screen = self.viewport.normalized_delta_to_screen(delta);
        let dx = -self.camera.screen_dist_to_world(screen.x);
        let dy = -self.camera.screen_dist_to_world(screen.y);
        self.camera.pan_by(dx, dy);
    }

    /// Zoom by `factor` around a screen point, which stays fixed on screen.
    pub fn zoom(&mut self, factor: f64, screen_center: Point) {
        let viewport = self.viewport;
        self.camera.zoom_at(factor, screen_center, &viewport);
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    // --- Remote strokes ---

    /// Begin a stroke under a sender-supplied id. A stroke already held under
    /// the same id is replaced in place.
    pub fn add_remote_stroke(&mut self, id: &str, points: Vec<Point>, color: &str, thickness: f64) -> StrokeId {
        let id = StrokeId::remote(id);
        let thickness = clamp_thickness(thickness, self.pen.thickness());
        let stroke = Stroke::new(id.clone(), points, color, thickness, now_ms());
        match self.strokes.remove(&id) {
            Some((index, _)) => {
                debug!(%id, "remote stroke restarted");
                self.strokes.insert_at(index, stroke);
            }
            None => self.strokes.push(stroke),
        }
        id
    }

    /// Append one point to a remote stroke. Unknown ids are ignored.
    pub fn update_remote_stroke(&mut self, id: &str, point: Point) -> bool {
        let Some(stroke) = self.strokes.get_mut(&StrokeId::remote(id)) else {
            return false;
        };
        stroke.points.push(point);
        true
    }

    /// Mark a remote stroke complete and record it for undo.
    pub fn finalize_remote_stroke(&mut self, id: &str) -> bool {
        let Some(stroke) = self.strokes.get_mut(&StrokeId::remote(id)) else {
            return false;
        };
        if stroke.complete {
            return false;
        }
        stroke.complete = true;
        let committed = stroke.clone();
        self.history.record(HistoryOp::Add(committed));
        true
    }

    // --- Board-wide ---

    /// Remove every stroke. Undoable. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        self.active = None;
        let cleared = self.strokes.take_all();
        let count = cleared.len();
        if count > 0 {
            self.history.record(HistoryOp::Clear(cleared));
        }
        count
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.strokes);
        self.drop_stale_active();
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.strokes);
        self.drop_stale_active();
        changed
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn drop_stale_active(&mut self) {
        if self.active.as_ref().is_some_and(|id| !self.strokes.contains(id)) {
            self.active = None;
        }
    }

    // --- Templates / images ---

    pub fn select_template(&mut self, template: Template) {
        self.templates.select(template);
    }

    pub fn hide_templates(&mut self) {
        self.templates.hide_all();
    }

    pub fn add_image(&mut self, source: &str, position: Point, width: f64, height: f64, opacity: f64) -> Uuid {
        self.images.add(source, position, width, height, opacity)
    }

    pub fn move_image(&mut self, id: &Uuid, position: Point) -> bool {
        self.images.move_to(id, position)
    }

    pub fn resize_image(&mut self, id: &Uuid, width: f64, height: f64) -> bool {
        self.images.resize(id, width, height)
    }

    pub fn set_image_opacity(&mut self, id: &Uuid, opacity: f64) -> bool {
        self.images.set_opacity(id, opacity)
    }

    pub fn remove_image(&mut self, id: &Uuid) -> bool {
        self.images.remove(id).is_some()
    }

    // --- Queries ---

    #[must_use]
    pub fn stroke(&self, id: &StrokeId) -> Option<&Stroke> {
        self.strokes.get(id)
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            camera: self.camera,
            viewport: self.viewport,
            template: self.templates.visible(),
            images: self.images.as_slice().to_vec(),
            strokes: self.strokes.as_slice().to_vec(),
            active_stroke: self.active.clone(),
        }
    }
}

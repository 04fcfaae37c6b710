//! Whiteboard engine for the air whiteboard.
//!
//! This crate owns board state: the camera, the stroke store, background
//! templates, image layers and the undo history. It has two mutation entry
//! points that may interleave freely: gesture intents from the `gestures`
//! crate ([`engine::WhiteboardCore::apply_gesture`]) and remote stroke
//! fragments keyed by sender-chosen ids. Renderers read a
//! [`engine::BoardSnapshot`]; nothing reaches into the state directly.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::WhiteboardCore`], gesture dispatch and snapshots |
//! | [`doc`] | Strokes, stroke ids, pen and the stroke store |
//! | [`camera`] | Pan/zoom camera, viewport and coordinate conversions |
//! | [`layers`] | Single-selection templates and image layers |
//! | [`hit`] | Eraser hit-testing against strokes |
//! | [`history`] | Linear undo/redo of stroke operations |
//! | [`consts`] | Shared numeric constants (zoom limits, pen defaults, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod history;
pub mod hit;
pub mod layers;

pub use camera::{Camera, Point, Viewport};
pub use doc::{Pen, Stroke, StrokeId};
pub use engine::{Action, BoardSnapshot, WhiteboardCore};
pub use layers::Template;

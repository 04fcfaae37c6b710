//! Document model: strokes, their identifiers, the pen, and the stroke store.
//!
//! Strokes arrive from two producers. Local strokes are drawn by gestures and
//! get a fresh UUID; remote strokes are keyed by whatever identifier the
//! sender chose. [`StrokeId`] keeps the two spaces disjoint by construction,
//! so a local id can never collide with a remote one.
//!
//! The store keeps strokes in a `Vec`: insertion order is draw order, and
//! undo needs to put erased strokes back at their old positions.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{DEFAULT_PEN_COLOR, DEFAULT_PEN_THICKNESS, PEN_THICKNESS_RANGE};

/// Unique identifier for a stroke.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "origin", content = "id", rename_all = "lowercase")]
pub enum StrokeId {
    /// Drawn on this board by gesture.
    Local(Uuid),
    /// Received over the sync channel under the sender's identifier.
    Remote(String),
}

impl StrokeId {
    /// A fresh local identifier.
    #[must_use]
    pub fn new_local() -> Self {
        Self::Local(Uuid::new_v4())
    }

    #[must_use]
    pub fn remote(id: impl Into<String>) -> Self {
        Self::Remote(id.into())
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(id) => write!(f, "local:{id}"),
            Self::Remote(id) => write!(f, "remote:{id}"),
        }
    }
}

/// A freehand stroke in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// World-space points in drawing order.
    pub points: Vec<Point>,
    /// CSS color string.
    pub color: String,
    /// Line width in world units.
    pub thickness: f64,
    /// Unix milliseconds.
    pub created_at: i64,
    /// No more points will be appended.
    pub complete: bool,
}

impl Stroke {
    #[must_use]
    pub fn new(id: StrokeId, points: Vec<Point>, color: impl Into<String>, thickness: f64, created_at: i64) -> Self {
        Self { id, points, color: color.into(), thickness, created_at, complete: false }
    }

    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Whether `s` is a `#rrggbb` color.
#[must_use]
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Clamp a stroke thickness into range, falling back to `current` for non-finite input.
#[must_use]
pub fn clamp_thickness(value: f64, current: f64) -> f64 {
    if value.is_finite() {
        value.clamp(PEN_THICKNESS_RANGE.0, PEN_THICKNESS_RANGE.1)
    } else {
        current
    }
}

/// Color and thickness applied to newly started local strokes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pen {
    color: String,
    thickness: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Self { color: DEFAULT_PEN_COLOR.to_owned(), thickness: DEFAULT_PEN_THICKNESS }
    }
}

impl Pen {
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Set the color. Returns `false` and keeps the old color unless `color` is `#rrggbb`.
    pub fn set_color(&mut self, color: &str) -> bool {
        if !is_hex_color(color) {
            return false;
        }
        color.clone_into(&mut self.color);
        true
    }

    /// Set the thickness, clamped to `[1, 50]`.
    pub fn set_thickness(&mut self, thickness: f64) {
        self.thickness = clamp_thickness(thickness, self.thickness);
    }
}

/// In-memory store of strokes in draw order.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
}

impl StrokeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stroke on top of the others.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Insert at `index`, clamped to the current length.
    pub fn insert_at(&mut self, index: usize, stroke: Stroke) {
        let index = index.min(self.strokes.len());
        self.strokes.insert(index, stroke);
    }

    #[must_use]
    pub fn position(&self, id: &StrokeId) -> Option<usize> {
        self.strokes.iter().position(|s| &s.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| &s.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &StrokeId) -> bool {
        self.position(id).is_some()
    }

    /// Remove a stroke by id, returning it with its former position.
    pub fn remove(&mut self, id: &StrokeId) -> Option<(usize, Stroke)> {
        let index = self.position(id)?;
        Some((index, self.strokes.remove(index)))
    }

    /// Remove every stroke matching `pred`. Positions are the ones each stroke
    /// held before removal, ascending.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&Stroke) -> bool) -> Vec<(usize, Stroke)> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.strokes.len());
        for (index, stroke) in std::mem::take(&mut self.strokes).into_iter().enumerate() {
            if pred(&stroke) {
                removed.push((index, stroke));
            } else {
                kept.push(stroke);
            }
        }
        self.strokes = kept;
        removed
    }

    /// Remove and return every stroke.
    pub fn take_all(&mut self) -> Vec<Stroke> {
        std::mem::take(&mut self.strokes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }

    /// Strokes in draw order.
    #[must_use]
    pub fn as_slice(&self) -> &[Stroke] {
        &self.strokes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

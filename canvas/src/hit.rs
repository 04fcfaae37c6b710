//! Erase hit-testing against strokes.
//!
//! A stroke is hit when any of its points lies within the eraser circle.
//! Erasing removes whole strokes, so a single point inside is enough.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{Stroke, StrokeId, StrokeStore};

/// Whether any point of `stroke` is within `radius` of `center` (world space).
#[must_use]
pub fn stroke_hit(stroke: &Stroke, center: Point, radius: f64) -> bool {
    stroke.points.iter().any(|p| p.distance(center) <= radius)
}

/// Ids of every stroke under the eraser, in draw order.
#[must_use]
pub fn strokes_hit(store: &StrokeStore, center: Point, radius: f64) -> Vec<StrokeId> {
    store
        .iter()
        .filter(|stroke| stroke_hit(stroke, center, radius))
        .map(|stroke| stroke.id.clone())
        .collect()
}

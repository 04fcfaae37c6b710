//! Camera, viewport and coordinate conversions.
//!
//! Three spaces are in play: normalized tracking space `[0,1]²`, screen
//! space in canvas pixels, and the infinite world space. The camera offset is
//! the world point at the center of the canvas:
//!
//! ```text
//! world  = (screen - size / 2) / zoom + offset
//! screen = (world - offset) * zoom + size / 2
//! ```

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use gestures::NormPoint;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Canvas pixel size and the webcam mirroring convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Tracking x is flipped so the board reads like a mirror.
    pub mirrored: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: DEFAULT_VIEWPORT_WIDTH, height: DEFAULT_VIEWPORT_HEIGHT, mirrored: false }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64, mirrored: bool) -> Self {
        Self { width, height, mirrored }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Map a normalized tracking position to canvas pixels.
    #[must_use]
    pub fn normalized_to_screen(&self, p: NormPoint) -> Point {
        let x = if self.mirrored { 1.0 - p.x } else { p.x };
        Point::new(x * self.width, p.y * self.height)
    }

    /// Map a normalized delta to a pixel delta.
    #[must_use]
    pub fn normalized_delta_to_screen(&self, d: NormPoint) -> Point {
        let dx = if self.mirrored { -d.x } else { d.x };
        Point::new(dx * self.width, d.y * self.height)
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `x` / `y` are the world point shown at the canvas center.
/// `zoom` is a scale factor (1.0 = no zoom), kept within `[0.1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (canvas pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, viewport: &Viewport) -> Point {
        let center = viewport.center();
        Point {
            x: (screen.x - center.x) / self.zoom + self.x,
            y: (screen.y - center.y) / self.zoom + self.y,
        }
    }

    /// Convert a world-space point to screen coordinates (canvas pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: &Viewport) -> Point {
        let center = viewport.center();
        Point {
            x: (world.x - self.x) * self.zoom + center.x,
            y: (world.y - self.y) * self.zoom + center.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Set the zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Multiply the zoom by `factor`, keeping the world point under
    /// `screen_center` fixed on screen. Factors at or below zero land on
    /// `MIN_ZOOM`; non-finite factors are ignored.
    pub fn zoom_at(&mut self, factor: f64, screen_center: Point, viewport: &Viewport) {
        if !factor.is_finite() {
            return;
        }
        let before = self.screen_to_world(screen_center, viewport);
        self.set_zoom(self.zoom * factor);
        let after = self.screen_to_world(screen_center, viewport);
        self.x += before.x - after.x;
        self.y += before.y - after.y;
    }

    /// Move the camera by a world-space offset.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Back to the origin at zoom 1.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 10.0;

// ── Strokes ─────────────────────────────────────────────────────

/// A continued point closer than this to the stroke's last point (world
/// units) is dropped.
pub const MIN_SEGMENT_WORLD: f64 = 1.0;

/// Local strokes with fewer points are discarded when they end.
pub const MIN_STROKE_POINTS: usize = 2;

// ── Pen ─────────────────────────────────────────────────────────

pub const DEFAULT_PEN_COLOR: &str = "#1f1a17";
pub const DEFAULT_PEN_THICKNESS: f64 = 4.0;
pub const PEN_THICKNESS_RANGE: (f64, f64) = (1.0, 50.0);

// ── Images ──────────────────────────────────────────────────────

/// Smallest image edge in world units.
pub const MIN_IMAGE_SIZE: f64 = 1.0;

// ── Viewport ────────────────────────────────────────────────────

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 720.0;

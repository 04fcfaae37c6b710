//! Shared constants for the gesture crate.

// ── Landmark indices ────────────────────────────────────────────

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// The five fingertip landmarks, thumb first.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

// ── Detectors ───────────────────────────────────────────────────

/// Maximum depth difference between thumb tip and index tip for a pinch.
pub const PINCH_DEPTH_TOLERANCE: f64 = 0.08;

/// Wrist-to-fingertip reach required for palm-open, as a multiple of the
/// palm-open threshold. Rejects a closed fist with splayed-looking tips.
pub const PALM_REACH_RATIO: f64 = 1.2;

// ── Zoom ────────────────────────────────────────────────────────

/// Inter-pinch distances at or below this are not a usable zoom baseline.
pub const MIN_ZOOM_BASELINE: f64 = 1e-6;

// ── Velocity ────────────────────────────────────────────────────

/// Default number of samples kept by a velocity tracker.
pub const VELOCITY_HISTORY: usize = 5;

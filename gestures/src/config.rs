//! Tunable gesture thresholds and toggles.
//!
//! Every setter clamps to the documented range instead of rejecting the
//! value; non-finite inputs leave the current value untouched. The engine
//! reads the config fresh each frame, so writes take effect on the next
//! tracking frame.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.05;
pub const DEFAULT_PALM_OPEN_THRESHOLD: f64 = 0.15;
pub const DEFAULT_ERASE_RADIUS: f64 = 30.0;
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 1.0;
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.5;
pub const DEFAULT_ACTIVATION_FRAMES: u32 = 2;
pub const DEFAULT_DEACTIVATION_FRAMES: u32 = 2;
pub const DEFAULT_PAN_SENSITIVITY: f64 = 1.0;

pub const PINCH_THRESHOLD_RANGE: (f64, f64) = (0.01, 0.2);
pub const PALM_OPEN_THRESHOLD_RANGE: (f64, f64) = (0.05, 0.5);
pub const ERASE_RADIUS_RANGE: (f64, f64) = (5.0, 200.0);
pub const ZOOM_SENSITIVITY_RANGE: (f64, f64) = (0.1, 5.0);
pub const SMOOTHING_FACTOR_RANGE: (f64, f64) = (0.1, 1.0);
pub const HYSTERESIS_FRAMES_RANGE: (u32, u32) = (1, 30);
pub const PAN_SENSITIVITY_RANGE: (f64, f64) = (0.1, 5.0);

/// A gesture type that can be toggled on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Draw,
    Erase,
    Pan,
    Zoom,
}

/// Clamp `value` into `range`, keeping `current` when `value` is not finite.
#[must_use]
pub fn clamp_finite(value: f64, range: (f64, f64), current: f64) -> f64 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        current
    }
}

/// Gesture engine configuration.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureConfig {
    pinch_threshold: f64,
    palm_open_threshold: f64,
    erase_radius: f64,
    zoom_sensitivity: f64,
    smoothing_factor: f64,
    activation_frames: u32,
    deactivation_frames: u32,
    pan_sensitivity: f64,
    left_handed: bool,
    enabled: bool,
    draw_enabled: bool,
    erase_enabled: bool,
    pan_enabled: bool,
    zoom_enabled: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            palm_open_threshold: DEFAULT_PALM_OPEN_THRESHOLD,
            erase_radius: DEFAULT_ERASE_RADIUS,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            activation_frames: DEFAULT_ACTIVATION_FRAMES,
            deactivation_frames: DEFAULT_DEACTIVATION_FRAMES,
            pan_sensitivity: DEFAULT_PAN_SENSITIVITY,
            left_handed: false,
            enabled: true,
            draw_enabled: true,
            erase_enabled: true,
            pan_enabled: true,
            zoom_enabled: true,
        }
    }
}

impl GestureConfig {
    // --- Thresholds ---

    /// Maximum thumb-to-index distance (normalized) that counts as a pinch.
    #[must_use]
    pub fn pinch_threshold(&self) -> f64 {
        self.pinch_threshold
    }

    pub fn set_pinch_threshold(&mut self, value: f64) {
        self.pinch_threshold = clamp_finite(value, PINCH_THRESHOLD_RANGE, self.pinch_threshold);
    }

    /// Minimum average fingertip spread (normalized) that counts as an open palm.
    #[must_use]
    pub fn palm_open_threshold(&self) -> f64 {
        self.palm_open_threshold
    }

    pub fn set_palm_open_threshold(&mut self, value: f64) {
        self.palm_open_threshold = clamp_finite(value, PALM_OPEN_THRESHOLD_RANGE, self.palm_open_threshold);
    }

    /// Eraser radius in screen pixels.
    #[must_use]
    pub fn erase_radius(&self) -> f64 {
        self.erase_radius
    }

    pub fn set_erase_radius(&mut self, value: f64) {
        self.erase_radius = clamp_finite(value, ERASE_RADIUS_RANGE, self.erase_radius);
    }

    #[must_use]
    pub fn zoom_sensitivity(&self) -> f64 {
        self.zoom_sensitivity
    }

    pub fn set_zoom_sensitivity(&mut self, value: f64) {
        self.zoom_sensitivity = clamp_finite(value, ZOOM_SENSITIVITY_RANGE, self.zoom_sensitivity);
    }

    /// EMA weight given to the newest landmark sample.
    #[must_use]
    pub fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }

    pub fn set_smoothing_factor(&mut self, value: f64) {
        self.smoothing_factor = clamp_finite(value, SMOOTHING_FACTOR_RANGE, self.smoothing_factor);
    }

    /// Consecutive raw-true frames needed before a signal activates.
    #[must_use]
    pub fn activation_frames(&self) -> u32 {
        self.activation_frames
    }

    pub fn set_activation_frames(&mut self, frames: u32) {
        self.activation_frames = frames.clamp(HYSTERESIS_FRAMES_RANGE.0, HYSTERESIS_FRAMES_RANGE.1);
    }

    /// Consecutive raw-false frames needed before a signal deactivates.
    #[must_use]
    pub fn deactivation_frames(&self) -> u32 {
        self.deactivation_frames
    }

    pub fn set_deactivation_frames(&mut self, frames: u32) {
        self.deactivation_frames = frames.clamp(HYSTERESIS_FRAMES_RANGE.0, HYSTERESIS_FRAMES_RANGE.1);
    }

    #[must_use]
    pub fn pan_sensitivity(&self) -> f64 {
        self.pan_sensitivity
    }

    pub fn set_pan_sensitivity(&mut self, value: f64) {
        self.pan_sensitivity = clamp_finite(value, PAN_SENSITIVITY_RANGE, self.pan_sensitivity);
    }

    // --- Handedness ---

    /// Whether draw/erase/pan roles are mirrored onto the opposite hands.
    #[must_use]
    pub fn left_handed(&self) -> bool {
        self.left_handed
    }

    pub fn set_left_handed(&mut self, left_handed: bool) {
        self.left_handed = left_handed;
    }

    // --- Toggles ---

    /// Global switch. When off the engine emits nothing.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_enabled(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Draw => self.draw_enabled,
            GestureKind::Erase => self.erase_enabled,
            GestureKind::Pan => self.pan_enabled,
            GestureKind::Zoom => self.zoom_enabled,
        }
    }

    pub fn set_kind_enabled(&mut self, kind: GestureKind, enabled: bool) {
        match kind {
            GestureKind::Draw => self.draw_enabled = enabled,
            GestureKind::Erase => self.erase_enabled = enabled,
            GestureKind::Pan => self.pan_enabled = enabled,
            GestureKind::Zoom => self.zoom_enabled = enabled,
        }
    }
}

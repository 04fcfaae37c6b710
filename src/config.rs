//! Application configuration and the live update surface.
//!
//! `AppConfig` is owned by the session. UI collaborators never write fields
//! directly; they submit a [`ConfigUpdate`], and [`AppConfig::apply`] clamps
//! or rejects the value before storing it.

use canvas::Pen;
use gestures::{GestureConfig, GestureKind};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BACKGROUND_OPACITY: f64 = 1.0;

/// Everything the user can tune while a session is running.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub gestures: GestureConfig,
    pub pen: Pen,
    /// Opacity of the webcam/template background, in `[0, 1]`.
    pub background_opacity: f64,
    pub aspect_ratio_lock: bool,
    /// Flip tracking x so the board reads like a mirror.
    pub mirrored: bool,
    pub presentation_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gestures: GestureConfig::default(),
            pen: Pen::default(),
            background_opacity: DEFAULT_BACKGROUND_OPACITY,
            aspect_ratio_lock: false,
            mirrored: true,
            presentation_mode: false,
        }
    }
}

/// One settings write.
///
/// Wire form: `{"setting": "pen_thickness", "value": 8}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "setting", content = "value", rename_all = "snake_case")]
pub enum ConfigUpdate {
    PinchThreshold(f64),
    PalmOpenThreshold(f64),
    EraseRadius(f64),
    ZoomSensitivity(f64),
    SmoothingFactor(f64),
    ActivationFrames(u32),
    DeactivationFrames(u32),
    PanSensitivity(f64),
    LeftHanded(bool),
    GesturesEnabled(bool),
    GestureToggle { gesture: GestureKind, enabled: bool },
    PenColor(String),
    PenThickness(f64),
    BackgroundOpacity(f64),
    AspectRatioLock(bool),
    Mirror(bool),
    PresentationMode(bool),
}

impl AppConfig {
    /// Apply one update. Returns whether the stored config changed.
    pub fn apply(&mut self, update: ConfigUpdate) -> bool {
        let before = self.clone();
        let g = &mut self.gestures;
        match update {
            ConfigUpdate::PinchThreshold(v) => g.set_pinch_threshold(v),
            ConfigUpdate::PalmOpenThreshold(v) => g.set_palm_open_threshold(v),
            ConfigUpdate::EraseRadius(v) => g.set_erase_radius(v),
            ConfigUpdate::ZoomSensitivity(v) => g.set_zoom_sensitivity(v),
            ConfigUpdate::SmoothingFactor(v) => g.set_smoothing_factor(v),
            ConfigUpdate::ActivationFrames(n) => g.set_activation_frames(n),
            ConfigUpdate::DeactivationFrames(n) => g.set_deactivation_frames(n),
            ConfigUpdate::PanSensitivity(v) => g.set_pan_sensitivity(v),
            ConfigUpdate::LeftHanded(on) => g.set_left_handed(on),
            ConfigUpdate::GesturesEnabled(on) => g.set_enabled(on),
            ConfigUpdate::GestureToggle { gesture, enabled } => g.set_kind_enabled(gesture, enabled),
            ConfigUpdate::PenColor(color) => {
                if !self.pen.set_color(&color) {
                    tracing::warn!(%color, "config: ignoring invalid pen color");
                }
            }
            ConfigUpdate::PenThickness(v) => self.pen.set_thickness(v),
            ConfigUpdate::BackgroundOpacity(v) => {
                if v.is_finite() {
                    self.background_opacity = v.clamp(0.0, 1.0);
                }
            }
            ConfigUpdate::AspectRatioLock(on) => self.aspect_ratio_lock = on,
            ConfigUpdate::Mirror(on) => self.mirrored = on,
            ConfigUpdate::PresentationMode(on) => self.presentation_mode = on,
        }
        *self != before
    }
}

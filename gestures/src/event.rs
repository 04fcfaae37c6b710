//! Discrete gesture states and the intent events emitted from them.

use serde::{Deserialize, Serialize};

use crate::landmark::NormPoint;

/// The single resolved gesture for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    #[default]
    Idle,
    Drawing,
    Panning,
    Zooming,
    Erasing,
}

/// Intent emitted by the gesture engine for the whiteboard to apply.
///
/// Positions are in normalized camera space; the board converts them to
/// screen space with its current canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureEvent {
    DrawStart { position: NormPoint },
    DrawMove { position: NormPoint },
    DrawEnd { position: NormPoint },
    /// `radius` is in screen pixels.
    Erase { position: NormPoint, radius: f64 },
    Pan { delta: NormPoint },
    Zoom { factor: f64, center: NormPoint },
    Idle,
}

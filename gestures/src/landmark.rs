//! Landmark model: what the tracking model hands us every frame.
//!
//! Coordinates are normalized to the camera frame (`[0, 1]` on both axes,
//! origin top-left). `z` is the model's relative depth; smaller values are
//! closer to the camera. Frames are consumed immediately: nothing here is
//! retained beyond the smoother's one-sample memory.

#[cfg(test)]
#[path = "landmark_test.rs"]
mod landmark_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Number of landmarks per tracked hand.
pub const LANDMARK_COUNT: usize = 21;

/// One skeletal point of a tracked hand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Model confidence that the point is visible. Never smoothed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, visibility: None }
    }

    /// Planar position, ignoring depth.
    #[must_use]
    pub fn point(&self) -> NormPoint {
        NormPoint::new(self.x, self.y)
    }

    /// Euclidean distance in the image plane.
    #[must_use]
    pub fn planar_distance(&self, other: &Landmark) -> f64 {
        self.point().distance(other.point())
    }
}

/// The full landmark set of one hand, indexed by the constants in [`crate::consts`].
pub type Landmarks = [Landmark; LANDMARK_COUNT];

/// Which physical hand a tracked hand is, after the mirroring convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Both labels, left first.
    pub const ALL: [Handedness; 2] = [Handedness::Left, Handedness::Right];
}

/// One tracked hand in a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub handedness: Handedness,
    /// Handedness classification confidence.
    #[serde(default = "default_score")]
    pub score: f64,
    pub landmarks: Landmarks,
}

fn default_score() -> f64 {
    1.0
}

impl Hand {
    #[must_use]
    pub fn new(handedness: Handedness, landmarks: Landmarks) -> Self {
        Self { handedness, score: 1.0, landmarks }
    }
}

/// Every hand the model reported for one camera frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    #[serde(default)]
    pub hands: Vec<Hand>,
    /// Capture time in milliseconds, as reported by the producer.
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl HandFrame {
    #[must_use]
    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands, timestamp_ms: 0 }
    }

    /// The current hand for `handedness`: the highest-scoring hand carrying
    /// that label, if any.
    #[must_use]
    pub fn current(&self, handedness: Handedness) -> Option<&Hand> {
        self.hands
            .iter()
            .filter(|hand| hand.handedness == handedness)
            .fold(None, |best: Option<&Hand>, hand| match best {
                Some(b) if b.score >= hand.score => Some(b),
                _ => Some(hand),
            })
    }
}

/// A point in normalized camera space, or a delta between two such points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

impl NormPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: NormPoint) -> f64 {
        (self - other).length()
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn midpoint(self, other: NormPoint) -> NormPoint {
        NormPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> NormPoint {
        NormPoint::new(self.x * factor, self.y * factor)
    }
}

impl Add for NormPoint {
    type Output = NormPoint;

    fn add(self, rhs: NormPoint) -> NormPoint {
        NormPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for NormPoint {
    type Output = NormPoint;

    fn sub(self, rhs: NormPoint) -> NormPoint {
        NormPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

//! Exponential moving average over per-hand landmark streams.
//!
//! Memory is keyed by handedness and holds exactly one smoothed sample per
//! landmark. A hand seen for the first time passes through unmodified, and a
//! hand missing from a frame is forgotten immediately so it never resumes
//! from a stale position.

#[cfg(test)]
#[path = "smoother_test.rs"]
mod smoother_test;

use std::collections::HashMap;

use crate::config::{DEFAULT_SMOOTHING_FACTOR, SMOOTHING_FACTOR_RANGE, clamp_finite};
use crate::landmark::{Hand, Handedness, Landmark, Landmarks};

/// `alpha * current + (1 - alpha) * previous`.
#[must_use]
pub fn ema(previous: f64, current: f64, alpha: f64) -> f64 {
    alpha * current + (1.0 - alpha) * previous
}

fn blend(previous: &Landmarks, raw: &Landmarks, alpha: f64) -> Landmarks {
    let mut out = *raw;
    for (slot, (prev, cur)) in out.iter_mut().zip(previous.iter().zip(raw.iter())) {
        *slot = Landmark {
            x: ema(prev.x, cur.x, alpha),
            y: ema(prev.y, cur.y, alpha),
            z: ema(prev.z, cur.z, alpha),
            visibility: cur.visibility,
        };
    }
    out
}

/// Per-hand landmark smoother.
#[derive(Debug, Clone)]
pub struct LandmarkSmoother {
    factor: f64,
    memory: HashMap<Handedness, Landmarks>,
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_FACTOR)
    }
}

impl LandmarkSmoother {
    #[must_use]
    pub fn new(factor: f64) -> Self {
        Self { factor: clamp_finite(factor, SMOOTHING_FACTOR_RANGE, DEFAULT_SMOOTHING_FACTOR), memory: HashMap::new() }
    }

    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Set the smoothing factor, clamped to `[0.1, 1.0]`.
    pub fn set_factor(&mut self, factor: f64) {
        self.factor = clamp_finite(factor, SMOOTHING_FACTOR_RANGE, self.factor);
    }

    /// Smooth this frame's hands against the previous frame's output.
    ///
    /// Callers pass at most one hand per handedness label.
    pub fn smooth(&mut self, hands: &[Hand]) -> Vec<Hand> {
        self.memory
            .retain(|label, _| hands.iter().any(|hand| hand.handedness == *label));

        let mut out = Vec::with_capacity(hands.len());
        for hand in hands {
            let smoothed = match self.memory.get(&hand.handedness) {
                Some(previous) => blend(previous, &hand.landmarks, self.factor),
                None => hand.landmarks,
            };
            self.memory.insert(hand.handedness, smoothed);
            out.push(Hand { landmarks: smoothed, ..hand.clone() });
        }
        out
    }

    /// Whether any smoothing memory is held for `handedness`.
    #[must_use]
    pub fn remembers(&self, handedness: Handedness) -> bool {
        self.memory.contains_key(&handedness)
    }

    /// Forget every hand.
    pub fn reset(&mut self) {
        self.memory.clear();
    }
}

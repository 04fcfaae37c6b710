//! Velocity tracking over a short history of 2D points.
//!
//! Auxiliary signal only: the debug overlay shows it, nothing gates on it.

#[cfg(test)]
#[path = "velocity_test.rs"]
mod velocity_test;

use std::collections::VecDeque;

use crate::consts::VELOCITY_HISTORY;
use crate::landmark::NormPoint;

/// Ring buffer of recent positions.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    history: VecDeque<NormPoint>,
    capacity: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(VELOCITY_HISTORY)
    }
}

impl VelocityTracker {
    /// A tracker keeping at most `capacity` samples (minimum 2).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self { history: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, point: NormPoint) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(point);
    }

    /// Average per-sample displacement: `(last - first) / (count - 1)`.
    /// Zero until two samples are held.
    #[must_use]
    pub fn velocity(&self) -> NormPoint {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return NormPoint::default();
        };
        let steps = self.history.len().saturating_sub(1);
        if steps == 0 {
            return NormPoint::default();
        }
        #[allow(clippy::cast_precision_loss)]
        let steps = steps as f64;
        (*last - *first).scale(1.0 / steps)
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity().length()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

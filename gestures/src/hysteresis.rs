//! Debounced boolean signals.
//!
//! A signal commits to a new value only after the raw reading has disagreed
//! with the committed value for N consecutive frames. Any agreeing frame
//! resets the count.

#[cfg(test)]
#[path = "hysteresis_test.rs"]
mod hysteresis_test;

/// One debounced signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debounce {
    active: bool,
    counter: u32,
}

impl Debounce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw reading and return the committed state.
    ///
    /// `activation` frames of `true` are needed to switch on, `deactivation`
    /// frames of `false` to switch off.
    pub fn update(&mut self, raw: bool, activation: u32, deactivation: u32) -> bool {
        if raw == self.active {
            self.counter = 0;
            return self.active;
        }
        self.counter = self.counter.saturating_add(1);
        let needed = if self.active { deactivation } else { activation };
        if self.counter >= needed {
            self.active = raw;
            self.counter = 0;
        }
        self.active
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frames the raw reading has disagreed with the committed state.
    #[must_use]
    pub fn pending(&self) -> u32 {
        self.counter
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

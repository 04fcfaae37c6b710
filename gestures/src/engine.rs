//! Gesture engine: smoothed landmarks in, gesture intent events out.
//!
//! DESIGN
//! ======
//! Each frame runs four stages in order:
//!
//! 1. Pick the current hand per handedness label and smooth it.
//! 2. Run the raw detectors and feed each of the four signals (left/right
//!    pinch, left/right palm) through its own debounce counter.
//! 3. Resolve one discrete gesture by fixed priority: zoom (both hands
//!    pinching), draw, erase, pan, idle. First match wins.
//! 4. Emit transition events (draw-end when leaving drawing, idle when
//!    entering idle) around the resolved gesture's own event.
//!
//! Which hand drives draw, erase and pan comes from [`RoleBindings`], which
//! the left-handed flag mirrors. Zoom is bimanual and ignores the flag.
//!
//! State is carried forward every frame whether or not anything is emitted,
//! so next frame's transitions and pan deltas have a reference point.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::debug;

use crate::config::{GestureConfig, GestureKind};
use crate::consts::MIN_ZOOM_BASELINE;
use crate::detect::{is_palm_open, is_pinching, palm_position, pinch_position};
use crate::event::{Gesture, GestureEvent};
use crate::hysteresis::Debounce;
use crate::landmark::{Hand, HandFrame, Handedness, NormPoint};
use crate::smoother::LandmarkSmoother;
use crate::velocity::VelocityTracker;

// =============================================================================
// STATE
// =============================================================================

/// Debounced readings for one hand, as of the latest frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HandState {
    /// The hand was present in the latest frame.
    pub detected: bool,
    pub pinching: bool,
    pub palm_open: bool,
    /// Last known pinch midpoint. Kept while the hand is absent.
    pub pinch_position: Option<NormPoint>,
    /// Last known palm base. Kept while the hand is absent.
    pub palm_position: Option<NormPoint>,
    /// Pinch-point speed over the recent history.
    pub speed: f64,
}

/// Everything the renderer may read for cursors and the debug overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GestureState {
    pub gesture: Gesture,
    pub left: HandState,
    pub right: HandState,
    /// Inter-pinch distance from the previous zoom frame.
    pub last_zoom_distance: Option<f64>,
}

impl GestureState {
    #[must_use]
    pub fn hand(&self, handedness: Handedness) -> &HandState {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }
}

/// Which physical hand drives each one-handed role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleBindings {
    pub draw: Handedness,
    pub erase: Handedness,
    pub pan: Handedness,
}

impl RoleBindings {
    #[must_use]
    pub fn new(left_handed: bool) -> Self {
        if left_handed {
            Self { draw: Handedness::Left, erase: Handedness::Right, pan: Handedness::Left }
        } else {
            Self { draw: Handedness::Right, erase: Handedness::Left, pan: Handedness::Right }
        }
    }
}

/// Private per-hand bookkeeping behind [`HandState`].
#[derive(Debug, Clone, Default)]
struct HandTrack {
    pinch: Debounce,
    palm: Debounce,
    velocity: VelocityTracker,
    /// Palm position from the previous frame, if the hand was present then.
    previous_palm: Option<NormPoint>,
}

// =============================================================================
// ENGINE
// =============================================================================

/// Stateful classifier turning hand frames into [`GestureEvent`]s.
#[derive(Debug, Clone)]
pub struct GestureEngine {
    config: GestureConfig,
    smoother: LandmarkSmoother,
    state: GestureState,
    left: HandTrack,
    right: HandTrack,
    /// Hand that started the current stroke.
    drawing_hand: Option<Handedness>,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureEngine {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            smoother: LandmarkSmoother::new(config.smoothing_factor()),
            state: GestureState::default(),
            left: HandTrack::default(),
            right: HandTrack::default(),
            drawing_hand: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next frame.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.smoother.set_factor(config.smoothing_factor());
        self.config = config;
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub fn roles(&self) -> RoleBindings {
        RoleBindings::new(self.config.left_handed())
    }

    /// Process one tracking frame.
    pub fn process(&mut self, frame: &HandFrame) -> Vec<GestureEvent> {
        if !self.config.enabled() {
            return self.disable();
        }

        let current: Vec<Hand> = Handedness::ALL
            .iter()
            .filter_map(|&handedness| frame.current(handedness).cloned())
            .collect();
        let smoothed = self.smoother.smooth(&current);

        for handedness in Handedness::ALL {
            let hand = smoothed.iter().find(|hand| hand.handedness == handedness);
            self.observe(handedness, hand);
        }

        self.resolve()
    }

    /// Clear every counter, flag, position and the smoother's memory.
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.state = GestureState::default();
        self.left = HandTrack::default();
        self.right = HandTrack::default();
        self.drawing_hand = None;
    }

    // --- Per-frame stages ---

    fn disable(&mut self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if self.state.gesture == Gesture::Drawing {
            events.push(GestureEvent::DrawEnd { position: self.draw_end_position() });
        }
        if self.state != GestureState::default() {
            debug!(gesture = ?self.state.gesture, "gestures disabled; resetting engine");
        }
        self.reset();
        events
    }

    fn observe(&mut self, handedness: Handedness, hand: Option<&Hand>) {
        let cfg = self.config;
        let (raw_pinch, raw_palm) = hand.map_or((false, false), |hand| {
            (is_pinching(hand, cfg.pinch_threshold()), is_palm_open(hand, cfg.palm_open_threshold()))
        });

        let (track, state) = match handedness {
            Handedness::Left => (&mut self.left, &mut self.state.left),
            Handedness::Right => (&mut self.right, &mut self.state.right),
        };

        track.previous_palm = if state.detected { state.palm_position } else { None };
        state.pinching = track
            .pinch
            .update(raw_pinch, cfg.activation_frames(), cfg.deactivation_frames());
        state.palm_open = track
            .palm
            .update(raw_palm, cfg.activation_frames(), cfg.deactivation_frames());
        state.detected = hand.is_some();

        if let Some(hand) = hand {
            let pinch = pinch_position(hand);
            state.pinch_position = Some(pinch);
            state.palm_position = Some(palm_position(hand));
            track.velocity.push(pinch);
        } else {
            track.velocity.clear();
        }
        state.speed = track.velocity.speed();
    }

    fn resolve(&mut self) -> Vec<GestureEvent> {
        let previous = self.state.gesture;
        let (gesture, event) = self.classify(previous);

        let mut events = Vec::with_capacity(3);
        if previous == Gesture::Drawing && gesture != Gesture::Drawing {
            events.push(GestureEvent::DrawEnd { position: self.draw_end_position() });
            self.drawing_hand = None;
        }
        if let Some(event) = event {
            events.push(event);
        }
        if gesture == Gesture::Idle && previous != Gesture::Idle {
            events.push(GestureEvent::Idle);
        }

        if gesture != previous {
            debug!(from = ?previous, to = ?gesture, "gesture transition");
        }
        self.state.gesture = gesture;
        events
    }

    /// Fixed-priority resolution. First satisfied branch wins.
    fn classify(&mut self, previous: Gesture) -> (Gesture, Option<GestureEvent>) {
        let cfg = self.config;
        let roles = RoleBindings::new(cfg.left_handed());
        let left = self.state.left;
        let right = self.state.right;

        if cfg.is_enabled(GestureKind::Zoom) && left.pinching && right.pinching {
            if let (Some(a), Some(b)) = (left.pinch_position, right.pinch_position) {
                let distance = a.distance(b);
                let event = self
                    .state
                    .last_zoom_distance
                    .filter(|&baseline| baseline > MIN_ZOOM_BASELINE)
                    .map(|baseline| {
                        let raw_factor = distance / baseline;
                        GestureEvent::Zoom {
                            factor: 1.0 + (raw_factor - 1.0) * cfg.zoom_sensitivity(),
                            center: a.midpoint(b),
                        }
                    });
                self.state.last_zoom_distance = Some(distance);
                return (Gesture::Zooming, event);
            }
        }
        self.state.last_zoom_distance = None;

        let draw = *self.state.hand(roles.draw);
        if cfg.is_enabled(GestureKind::Draw) && draw.pinching {
            if let Some(position) = draw.pinch_position {
                let event = if previous == Gesture::Drawing {
                    GestureEvent::DrawMove { position }
                } else {
                    self.drawing_hand = Some(roles.draw);
                    GestureEvent::DrawStart { position }
                };
                return (Gesture::Drawing, Some(event));
            }
        }

        let erase = *self.state.hand(roles.erase);
        if cfg.is_enabled(GestureKind::Erase) && erase.palm_open {
            if let Some(position) = erase.palm_position {
                return (Gesture::Erasing, Some(GestureEvent::Erase { position, radius: cfg.erase_radius() }));
            }
        }

        let pan = *self.state.hand(roles.pan);
        if cfg.is_enabled(GestureKind::Pan) && pan.palm_open && !pan.pinching {
            if let Some(position) = pan.palm_position {
                let event = self
                    .track(roles.pan)
                    .previous_palm
                    .map(|prev| GestureEvent::Pan { delta: (position - prev).scale(cfg.pan_sensitivity()) });
                return (Gesture::Panning, event);
            }
        }

        (Gesture::Idle, None)
    }

    fn track(&self, handedness: Handedness) -> &HandTrack {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    fn draw_end_position(&self) -> NormPoint {
        self.drawing_hand
            .and_then(|hand| self.state.hand(hand).pinch_position)
            .unwrap_or_default()
    }
}

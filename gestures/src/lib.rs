//! Hand-landmark gesture pipeline for the air whiteboard.
//!
//! This crate sits between the external hand-tracking model and the
//! whiteboard engine. Each tracking frame delivers up to two hands of 21
//! normalized landmarks; the pipeline smooths them, runs the stateless
//! detectors, debounces the results, and resolves a single discrete gesture
//! whose intent is emitted as [`event::GestureEvent`]s for the board to apply.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`landmark`] | Landmark, hand, frame and normalized point types |
//! | [`smoother`] | Exponential moving average over per-hand landmark streams |
//! | [`velocity`] | Short-history velocity tracker (debug signal) |
//! | [`detect`] | Stateless pinch / palm-open detectors |
//! | [`hysteresis`] | Per-signal debounce counters |
//! | [`config`] | Tunable thresholds and per-gesture toggles |
//! | [`event`] | Discrete gesture states and emitted intent events |
//! | [`engine`] | The stateful gesture engine tying it all together |
//! | [`consts`] | Landmark indices and fixed detector constants |

pub mod config;
pub mod consts;
pub mod detect;
pub mod engine;
pub mod event;
pub mod hysteresis;
pub mod landmark;
pub mod smoother;
pub mod velocity;

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures;

pub use config::{GestureConfig, GestureKind};
pub use engine::{GestureEngine, GestureState, HandState, RoleBindings};
pub use event::{Gesture, GestureEvent};
pub use landmark::{Hand, HandFrame, Handedness, Landmark, Landmarks, NormPoint};

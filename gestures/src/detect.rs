//! Stateless detectors over one hand's landmarks.

#[cfg(test)]
#[path = "detect_test.rs"]
mod detect_test;

use crate::consts::{FINGERTIPS, INDEX_TIP, MIDDLE_MCP, PALM_REACH_RATIO, PINCH_DEPTH_TOLERANCE, PINKY_TIP, THUMB_TIP, WRIST};
use crate::landmark::{Hand, NormPoint};

/// Thumb tip and index tip are close in the image plane and at similar depth.
///
/// The depth check rejects fingers that only look close because one sits
/// behind the other along the camera axis.
#[must_use]
pub fn is_pinching(hand: &Hand, threshold: f64) -> bool {
    let thumb = &hand.landmarks[THUMB_TIP];
    let index = &hand.landmarks[INDEX_TIP];
    thumb.planar_distance(index) < threshold && (thumb.z - index.z).abs() < PINCH_DEPTH_TOLERANCE
}

/// Fingers are spread away from the palm base and the hand is not a fist.
#[must_use]
pub fn is_palm_open(hand: &Hand, threshold: f64) -> bool {
    let lm = &hand.landmarks;
    let base = &lm[MIDDLE_MCP];
    let spread: f64 = FINGERTIPS.iter().map(|&tip| base.planar_distance(&lm[tip])).sum();
    let average = spread / 5.0;

    let wrist = &lm[WRIST];
    let reach = PALM_REACH_RATIO * threshold;

    average > threshold && wrist.planar_distance(&lm[INDEX_TIP]) > reach && wrist.planar_distance(&lm[PINKY_TIP]) > reach
}

/// Midpoint between thumb tip and index tip.
#[must_use]
pub fn pinch_position(hand: &Hand) -> NormPoint {
    hand.landmarks[THUMB_TIP]
        .point()
        .midpoint(hand.landmarks[INDEX_TIP].point())
}

/// The middle-finger base, which stays put while fingers move.
#[must_use]
pub fn palm_position(hand: &Hand) -> NormPoint {
    hand.landmarks[MIDDLE_MCP].point()
}

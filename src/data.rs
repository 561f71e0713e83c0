//! Training examples.
//!
//! Dataset synthesis lives outside this crate; callers hand in labelled 2-D
//! points and choose how to map them to inputs with a [`crate::FeatureSet`].

use rand::seq::SliceRandom;
use rand::Rng;

/// A labelled 2-D point.
///
/// For classification the label is `-1` or `1`; for regression any real value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Example2D {
    pub x: f32,
    pub y: f32,
    pub label: f32,
}

impl Example2D {
    #[inline]
    pub fn new(x: f32, y: f32, label: f32) -> Self {
        Self { x, y, label }
    }
}

/// Shuffles `points` in place (Fisher-Yates).
pub fn shuffle<R: Rng + ?Sized>(points: &mut [Example2D], rng: &mut R) {
    points.shuffle(rng);
}

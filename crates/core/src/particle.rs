//! Particle and proximity-edge value types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A simulated point advanced once per frame.
///
/// `position`, `velocity`, `opacity` and `twinkle` are mutated by the update
/// step. The radius is fixed at creation and only read by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    radius: f64,
    /// Draw opacity. Nominally in [0, 1] but never clamped.
    pub opacity: f64,
    /// Signed amount added to `opacity` per frame; zero for non-twinkling fields.
    pub twinkle: f64,
}

impl Particle {
    /// Creates a non-twinkling particle.
    ///
    /// Non-finite or non-positive radii are replaced with the smallest
    /// positive radius so renderers always get a drawable disc.
    pub fn new(position: DVec2, velocity: DVec2, radius: f64, opacity: f64) -> Self {
        let radius = if radius.is_finite() && radius > 0.0 {
            radius
        } else {
            f64::MIN_POSITIVE
        };
        Self {
            position,
            velocity,
            radius,
            opacity,
            twinkle: 0.0,
        }
    }

    /// Returns the particle with the given twinkle rate.
    pub fn with_twinkle(mut self, twinkle: f64) -> Self {
        self.twinkle = twinkle;
        self
    }

    /// Drawn radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Magnitude of the velocity vector.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// A transient connector between two particles closer than a threshold.
///
/// Indices refer to the owning field's particle order, with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

//! Distributed loads on the beam

use std::fmt;

use serde::{Deserialize, Serialize};

/// A linearly varying line load between two positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Start position (distance from the left end)
    pub start_position: f64,
    /// End position (distance from the left end)
    pub end_position: f64,
    /// Intensity at the start position, negative = downward
    pub start_magnitude: f64,
    /// Intensity at the end position
    pub end_magnitude: f64,
}

impl DistributedLoad {
    pub fn new(start_position: f64, end_position: f64, start_magnitude: f64, end_magnitude: f64) -> Self {
        Self {
            start_position,
            end_position,
            start_magnitude,
            end_magnitude,
        }
    }

    /// Create a constant-intensity load
    pub fn uniform(start_position: f64, end_position: f64, magnitude: f64) -> Self {
        Self::new(start_position, end_position, magnitude, magnitude)
    }

    /// Create a triangular load (zero at start, `peak` at end)
    pub fn triangular(start_position: f64, end_position: f64, peak: f64) -> Self {
        Self::new(start_position, end_position, 0.0, peak)
    }

    /// Check if the load is uniform (constant magnitude)
    pub fn is_uniform(&self) -> bool {
        (self.start_magnitude - self.end_magnitude).abs() < 1e-10
    }

    pub fn span(&self) -> f64 {
        self.end_position - self.start_position
    }

    /// Intensity at `x`, zero outside the loaded range
    pub fn intensity_at(&self, x: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 || x < self.start_position || x > self.end_position {
            return 0.0;
        }
        let t = (x - self.start_position) / span;
        self.start_magnitude + (self.end_magnitude - self.start_magnitude) * t
    }

    /// Get the total force from this load
    pub fn total_force(&self) -> f64 {
        (self.start_magnitude + self.end_magnitude) / 2.0 * self.span()
    }

    /// Moment of the load about x = 0 (counter-clockwise positive)
    pub fn moment_about_origin(&self) -> f64 {
        let h = self.span();
        let (a, b) = (self.start_magnitude, self.end_magnitude);
        // uniform part a over h, triangular part (b - a) with centroid at 2h/3
        a * h * (self.start_position + h / 2.0)
            + (b - a) * h / 2.0 * (self.start_position + 2.0 * h / 3.0)
    }
}

impl fmt::Display for DistributedLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} m to {} m, {} → {} kN/m",
            self.start_position, self.end_position, self.start_magnitude, self.end_magnitude
        )
    }
}

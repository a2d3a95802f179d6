//! Point loads on the beam

use std::fmt;

use serde::{Deserialize, Serialize};

/// A concentrated vertical load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Distance from the left end
    pub position: f64,
    /// Force, negative = downward
    pub magnitude: f64,
}

impl PointLoad {
    pub fn new(position: f64, magnitude: f64) -> Self {
        Self {
            position,
            magnitude,
        }
    }

    /// Create a downward load from an unsigned magnitude
    pub fn downward(position: f64, magnitude: f64) -> Self {
        Self::new(position, -magnitude.abs())
    }

    /// Moment of the load about x = 0 (counter-clockwise positive)
    pub fn moment_about_origin(&self) -> f64 {
        self.magnitude * self.position
    }
}

impl fmt::Display for PointLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.magnitude < 0.0 { '↓' } else { '↑' };
        write!(
            f,
            "{} kN {} @ {} m",
            self.magnitude.abs(),
            arrow,
            self.position
        )
    }
}

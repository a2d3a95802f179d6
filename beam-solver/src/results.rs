//! Result types for beam analysis

use serde::{Deserialize, Serialize};

use crate::elements::SupportKind;

/// Reaction at one support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Support label (`S1`, `S2`, ...)
    pub label: String,
    pub position: f64,
    pub kind: SupportKind,
    /// Vertical reaction force (positive = upward)
    pub force: f64,
    /// Reaction moment (positive = counter-clockwise), zero unless fixed
    pub moment: f64,
}

/// One sample of a diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    pub position: f64,
    pub value: f64,
}

impl DiagramPoint {
    pub fn new(position: f64, value: f64) -> Self {
        Self { position, value }
    }
}

/// What a point of interest marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiKind {
    Support,
    PointLoad,
    DistributedLoadStart,
    DistributedLoadEnd,
    /// Interior zero-shear location (local moment extremum)
    MomentExtremum,
}

/// A labelled position with the diagram values there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub label: String,
    pub kind: PoiKind,
    pub position: f64,
    pub moment: f64,
    /// Shear just left of the position (right limit at x = 0)
    pub shear_left: f64,
    /// Shear just right of the position (left limit at x = L)
    pub shear_right: f64,
}

/// Summary of analysis results
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Largest (most sagging) moment and where it occurs
    pub max_moment: f64,
    pub max_moment_position: f64,
    /// Smallest (most hogging) moment and where it occurs
    pub min_moment: f64,
    pub min_moment_position: f64,
    /// Largest absolute shear
    pub max_abs_shear: f64,
    /// Sum of all vertical reactions
    pub total_reaction: f64,
    /// Analysis nodes (stations) and segments between them
    pub num_nodes: usize,
    pub num_segments: usize,
}

/// Reactions plus sampled moment and shear over [0, L]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// One entry per support, in support insertion order
    pub reactions: Vec<Reaction>,
    /// Bending moment samples, sagging positive, ordered by position
    pub moment: Vec<DiagramPoint>,
    /// Shear samples, ordered by position; a jump appears as two samples at one position
    pub shear: Vec<DiagramPoint>,
    pub points_of_interest: Vec<PointOfInterest>,
    pub summary: AnalysisSummary,
}

impl AnalysisResult {
    /// Reaction at the support with this label
    pub fn reaction(&self, label: &str) -> Option<&Reaction> {
        self.reactions.iter().find(|r| r.label == label)
    }

    /// Reaction at the support closest to `position`
    pub fn reaction_at(&self, position: f64) -> Option<&Reaction> {
        self.reactions.iter().min_by(|a, b| {
            (a.position - position)
                .abs()
                .total_cmp(&(b.position - position).abs())
        })
    }

    pub fn total_reaction_force(&self) -> f64 {
        self.reactions.iter().map(|r| r.force).sum()
    }

    /// Interpolated moment at `x`, None outside the sampled range
    pub fn moment_at(&self, x: f64) -> Option<f64> {
        interpolate(&self.moment, x)
    }

    /// Interpolated shear at `x`, None outside the sampled range
    pub fn shear_at(&self, x: f64) -> Option<f64> {
        interpolate(&self.shear, x)
    }

    pub fn point_of_interest(&self, label: &str) -> Option<&PointOfInterest> {
        self.points_of_interest.iter().find(|p| p.label == label)
    }
}

/// Linear interpolation over position-ordered samples
///
/// At a jump (two samples at one position) the first sample wins.
fn interpolate(samples: &[DiagramPoint], x: f64) -> Option<f64> {
    let first = samples.first()?;
    let last = samples.last()?;
    if x < first.position || x > last.position {
        return None;
    }

    for pair in samples.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if x == a.position {
            return Some(a.value);
        }
        if x > a.position && x < b.position {
            let t = (x - a.position) / (b.position - a.position);
            return Some(a.value + (b.value - a.value) * t);
        }
    }
    Some(last.value)
}

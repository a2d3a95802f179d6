//! In-process backend built on the Euler-Bernoulli engine

use crate::analysis::AnalysisOptions;
use crate::elements::SupportKind;
use crate::engine::{EngineError, EulerBeam, Fixity, Segment};
use crate::error::AnalysisError;
use crate::model::{distributed_load_label, point_load_label, support_label, BeamModel};
use crate::results::{
    AnalysisResult, AnalysisSummary, DiagramPoint, PoiKind, PointOfInterest, Reaction,
};

use super::AnalysisBackend;

/// Direct stiffness analysis of the beam on the calling thread
#[derive(Debug, Clone, Default)]
pub struct StiffnessBackend {
    options: AnalysisOptions,
}

impl StiffnessBackend {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    fn build_engine(&self, model: &BeamModel) -> Result<EulerBeam, EngineError> {
        let mut beam = EulerBeam::new(model.length())?
            .with_section(self.options.elastic_modulus, self.options.moment_of_inertia);
        if self.options.check_statics {
            beam = beam.with_statics_check(statics_tolerance(&self.options));
        }

        for support in model.supports() {
            beam.set_fixity(support.position, fixity(support.kind))?;
        }
        for load in model.point_loads() {
            beam.add_vertical_load(load.position, load.magnitude)?;
        }
        for load in model.distributed_loads() {
            beam.add_linear_load(
                load.start_position,
                load.end_position,
                load.start_magnitude,
                load.end_magnitude,
            )?;
        }
        Ok(beam)
    }
}

impl AnalysisBackend for StiffnessBackend {
    fn name(&self) -> &str {
        "stiffness"
    }

    fn analyze(&self, model: &BeamModel) -> Result<AnalysisResult, AnalysisError> {
        let mut beam = self.build_engine(model).map_err(classify)?;
        beam.solve().map_err(classify)?;
        log::debug!(
            "Solved beam with {} nodes, {} segments",
            beam.nodes().len(),
            beam.nodes().len().saturating_sub(1)
        );
        collect_results(model, &beam, self.options.samples_per_segment.max(1)).map_err(classify)
    }
}

fn fixity(kind: SupportKind) -> Fixity {
    Fixity {
        dy: kind.restrains_translation(),
        rz: kind.restrains_rotation(),
    }
}

/// Options deserialized or built by hand can carry any tolerance
fn statics_tolerance(options: &AnalysisOptions) -> f64 {
    if options.tolerance.is_finite() && options.tolerance >= 0.0 {
        options.tolerance
    } else {
        let fallback = AnalysisOptions::default().tolerance;
        log::warn!(
            "Invalid equilibrium tolerance {}, using {}",
            options.tolerance,
            fallback
        );
        fallback
    }
}

/// Sort engine failures into the backend-neutral taxonomy
fn classify(error: EngineError) -> AnalysisError {
    match error {
        EngineError::Unstable(_)
        | EngineError::SingularMatrix
        | EngineError::EquilibriumCheckFailed { .. } => AnalysisError::SolverDivergence {
            reason: error.to_string(),
        },
        other => AnalysisError::UnknownBackendFailure {
            diagnostic: format!("{:?}", other),
        },
    }
}

// ========================
// Result Assembly
// ========================

fn collect_results(
    model: &BeamModel,
    beam: &EulerBeam,
    samples_per_segment: usize,
) -> Result<AnalysisResult, EngineError> {
    let segments = beam.segments()?;
    let tolerance = 1e-9 * model.length().max(1.0);

    let mut reactions = Vec::with_capacity(model.supports().len());
    for (i, support) in model.supports().iter().enumerate() {
        let [force, moment] = beam.reaction(support.position)?;
        reactions.push(Reaction {
            label: support_label(i),
            position: support.position,
            kind: support.kind,
            force,
            moment,
        });
    }

    let (moment, shear) = sample_diagrams(segments, samples_per_segment);
    let points_of_interest = points_of_interest(model, segments, tolerance);

    let mut summary = AnalysisSummary {
        total_reaction: reactions.iter().map(|r| r.force).sum(),
        num_nodes: beam.nodes().len(),
        num_segments: segments.len(),
        ..Default::default()
    };
    if let Some(max) = moment.iter().max_by(|a, b| a.value.total_cmp(&b.value)) {
        summary.max_moment = max.value;
        summary.max_moment_position = max.position;
    }
    if let Some(min) = moment.iter().min_by(|a, b| a.value.total_cmp(&b.value)) {
        summary.min_moment = min.value;
        summary.min_moment_position = min.position;
    }
    summary.max_abs_shear = shear.iter().map(|p| p.value.abs()).fold(0.0, f64::max);

    Ok(AnalysisResult {
        reactions,
        moment,
        shear,
        points_of_interest,
        summary,
    })
}

/// Evenly spaced offsets in a segment, with the zero-shear offsets merged in
fn sample_offsets(segment: &Segment, samples: usize) -> Vec<f64> {
    let length = segment.length();
    let mut offsets: Vec<f64> = (0..=samples)
        .map(|i| length * i as f64 / samples as f64)
        .collect();
    offsets.extend(segment.zero_shear_offsets());
    offsets.sort_by(f64::total_cmp);
    offsets.dedup_by(|a, b| (*a - *b).abs() <= 1e-12 * length.max(1.0));
    offsets
}

/// Moment and shear samples ordered by position
///
/// Every segment contributes its own end samples, so interior stations carry
/// the shear from both sides. The moment is continuous and keeps one sample
/// per station.
fn sample_diagrams(segments: &[Segment], samples: usize) -> (Vec<DiagramPoint>, Vec<DiagramPoint>) {
    let mut moment = Vec::new();
    let mut shear = Vec::new();

    for (k, segment) in segments.iter().enumerate() {
        for (j, s) in sample_offsets(segment, samples).into_iter().enumerate() {
            let x = segment.start + s;
            shear.push(DiagramPoint::new(x, segment.shear_at(s)));
            if k == 0 || j > 0 {
                moment.push(DiagramPoint::new(x, segment.moment_at(s)));
            }
        }
    }

    (moment, shear)
}

/// Moment and left/right shear at `x`
///
/// At the beam ends the missing side takes the value of the side present.
fn evaluate(segments: &[Segment], x: f64, tolerance: f64) -> (f64, f64, f64) {
    let at = |segment: &Segment| {
        let s = (x - segment.start).clamp(0.0, segment.length());
        (segment.moment_at(s), segment.shear_at(s))
    };
    let left = segments
        .iter()
        .find(|seg| x > seg.start + tolerance && x <= seg.end + tolerance)
        .map(at);
    let right = segments
        .iter()
        .find(|seg| x >= seg.start - tolerance && x < seg.end - tolerance)
        .map(at);

    match (left, right) {
        (Some((m, v_left)), Some((_, v_right))) => (m, v_left, v_right),
        (Some((m, v)), None) | (None, Some((m, v))) => (m, v, v),
        (None, None) => (0.0, 0.0, 0.0),
    }
}

fn points_of_interest(model: &BeamModel, segments: &[Segment], tolerance: f64) -> Vec<PointOfInterest> {
    let poi = |label: String, kind: PoiKind, position: f64| {
        let (moment, shear_left, shear_right) = evaluate(segments, position, tolerance);
        PointOfInterest {
            label,
            kind,
            position,
            moment,
            shear_left,
            shear_right,
        }
    };

    let mut points = Vec::new();
    for (i, support) in model.supports().iter().enumerate() {
        points.push(poi(support_label(i), PoiKind::Support, support.position));
    }
    for (i, load) in model.point_loads().iter().enumerate() {
        points.push(poi(point_load_label(i), PoiKind::PointLoad, load.position));
    }
    for (i, load) in model.distributed_loads().iter().enumerate() {
        let label = distributed_load_label(i);
        points.push(poi(
            format!("{} start", label),
            PoiKind::DistributedLoadStart,
            load.start_position,
        ));
        points.push(poi(
            format!("{} end", label),
            PoiKind::DistributedLoadEnd,
            load.end_position,
        ));
    }

    let extrema = segments
        .iter()
        .flat_map(|seg| seg.zero_shear_offsets().into_iter().map(move |s| seg.start + s));
    for (i, x) in extrema.enumerate() {
        points.push(poi(format!("Mext{}", i + 1), PoiKind::MomentExtremum, x));
    }

    points
}

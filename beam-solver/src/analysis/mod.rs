//! Analysis options and the build-then-analyze pipeline

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::backend::AnalysisBackend;
use crate::error::{BeamError, BeamResult};
use crate::model::{BeamInput, BeamModel};
use crate::results::AnalysisResult;

/// Options for beam analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Modulus of elasticity
    pub elastic_modulus: f64,
    /// Second moment of area
    pub moment_of_inertia: f64,
    /// Diagram samples between adjacent stations
    pub samples_per_segment: usize,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Relative equilibrium tolerance
    pub tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            elastic_modulus: 200e9,
            moment_of_inertia: 1e-4,
            samples_per_segment: 20,
            check_statics: true,
            tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Set flexural properties
    pub fn with_section(mut self, elastic_modulus: f64, moment_of_inertia: f64) -> Self {
        self.elastic_modulus = elastic_modulus;
        self.moment_of_inertia = moment_of_inertia;
        self
    }

    /// Set diagram resolution (at least one interval per segment)
    pub fn with_samples(mut self, samples_per_segment: usize) -> Self {
        self.samples_per_segment = samples_per_segment.max(1);
        self
    }

    /// Set equilibrium tolerance; negative or non-finite values are ignored
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        if tol.is_finite() && tol >= 0.0 {
            self.tolerance = tol;
        } else {
            log::warn!("Ignoring invalid equilibrium tolerance {}", tol);
        }
        self
    }

    /// Skip the equilibrium check
    pub fn without_statics_check(mut self) -> Self {
        self.check_statics = false;
        self
    }
}

/// Where a single analyze invocation currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisPhase {
    Idle,
    Building,
    BuildFailed,
    Built,
    Analyzing,
    AnalysisFailed,
    Analyzed,
}

impl AnalysisPhase {
    /// Is `next` a legal successor of this phase?
    pub fn can_transition_to(self, next: AnalysisPhase) -> bool {
        use AnalysisPhase::*;
        matches!(
            (self, next),
            (Idle, Building)
                | (Building, BuildFailed)
                | (Building, Built)
                | (Built, Idle)
                | (Built, Analyzing)
                | (Analyzing, AnalysisFailed)
                | (Analyzing, Analyzed)
                | (BuildFailed, Idle)
                | (AnalysisFailed, Idle)
                | (Analyzed, Idle)
        )
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Phase trace of one invocation, for a debug panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRun {
    phases: Vec<AnalysisPhase>,
}

impl AnalysisRun {
    fn start() -> Self {
        Self {
            phases: vec![AnalysisPhase::Idle],
        }
    }

    fn advance(&mut self, next: AnalysisPhase) {
        let current = self.current();
        debug_assert!(
            current.can_transition_to(next),
            "illegal transition {} -> {}",
            current,
            next
        );
        log::debug!("Analysis phase: {} -> {}", current, next);
        self.phases.push(next);
    }

    pub fn current(&self) -> AnalysisPhase {
        self.phases.last().copied().unwrap_or(AnalysisPhase::Idle)
    }

    pub fn phases(&self) -> &[AnalysisPhase] {
        &self.phases
    }
}

/// The model that was analyzed and what the backend returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub model: BeamModel,
    pub result: AnalysisResult,
    pub run: AnalysisRun,
}

/// Build a model from a snapshot of `input` and hand it to `backend`
///
/// Validation failures short-circuit before the backend is called. Nothing
/// is shared between invocations.
pub fn run_analysis(input: &BeamInput, backend: &dyn AnalysisBackend) -> BeamResult<Analysis> {
    run_traced(input, backend).map_err(|(error, _)| error)
}

/// Like [`run_analysis`], but the phase trace is returned on failure too
pub fn run_traced(
    input: &BeamInput,
    backend: &dyn AnalysisBackend,
) -> Result<Analysis, (BeamError, AnalysisRun)> {
    let mut run = AnalysisRun::start();

    run.advance(AnalysisPhase::Building);
    let model = match BeamModel::try_from(input) {
        Ok(model) => model,
        Err(e) => {
            log::warn!("Beam rejected: {}", e);
            run.advance(AnalysisPhase::BuildFailed);
            run.advance(AnalysisPhase::Idle);
            return Err((e.into(), run));
        }
    };
    run.advance(AnalysisPhase::Built);

    run.advance(AnalysisPhase::Analyzing);
    match backend.analyze(&model) {
        Ok(result) => {
            log::info!(
                "Analysis with '{}' completed: {} reactions, {} moment samples",
                backend.name(),
                result.reactions.len(),
                result.moment.len()
            );
            run.advance(AnalysisPhase::Analyzed);
            run.advance(AnalysisPhase::Idle);
            Ok(Analysis { model, result, run })
        }
        Err(e) => {
            log::warn!(
                "Analysis with '{}' failed: {} ({})",
                backend.name(),
                e,
                e.diagnostic().unwrap_or("no diagnostic")
            );
            run.advance(AnalysisPhase::AnalysisFailed);
            run.advance(AnalysisPhase::Idle);
            Err((e.into(), run))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StiffnessBackend;
    use crate::elements::Support;
    use crate::error::{AnalysisError, ValidationError};
    use crate::loads::PointLoad;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        calls: AtomicUsize,
    }

    impl AnalysisBackend for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        fn analyze(&self, _model: &BeamModel) -> Result<AnalysisResult, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AnalysisError::UnknownBackendFailure {
                diagnostic: "not implemented".to_string(),
            })
        }
    }

    fn cantilever() -> BeamInput {
        BeamInput {
            length: 5.0,
            point_loads: vec![PointLoad::new(2.0, -10.0)],
            distributed_loads: vec![],
            supports: vec![Support::fixed(0.0)],
        }
    }

    #[test]
    fn test_options_builder() {
        let options = AnalysisOptions::default()
            .with_samples(0)
            .with_tolerance(1e-3)
            .without_statics_check();
        assert_eq!(options.samples_per_segment, 1);
        assert_eq!(options.tolerance, 1e-3);
        assert!(!options.check_statics);
    }

    #[test]
    fn test_invalid_tolerance_is_ignored() {
        for tol in [-1.0, f64::NAN, f64::INFINITY] {
            let options = AnalysisOptions::default().with_tolerance(tol);
            assert_eq!(options.tolerance, 1e-6);
        }
    }

    #[test]
    fn test_successful_run_phases() {
        let analysis = run_analysis(&cantilever(), &StiffnessBackend::default()).unwrap();
        use AnalysisPhase::*;
        assert_eq!(
            analysis.run.phases(),
            &[Idle, Building, Built, Analyzing, Analyzed, Idle]
        );
        assert_eq!(analysis.run.current(), Idle);
    }

    #[test]
    fn test_validation_short_circuits_backend() {
        let backend = CountingBackend {
            calls: AtomicUsize::new(0),
        };
        let mut input = cantilever();
        input.supports.clear();

        let (error, run) = run_traced(&input, &backend).unwrap_err();
        assert_eq!(error, BeamError::Validation(ValidationError::NoSupports));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        use AnalysisPhase::*;
        assert_eq!(run.phases(), &[Idle, Building, BuildFailed, Idle]);
    }

    #[test]
    fn test_backend_failure_is_reported() {
        let backend = CountingBackend {
            calls: AtomicUsize::new(0),
        };
        let (error, run) = run_traced(&cantilever(), &backend).unwrap_err();
        assert_eq!(error.kind(), "unknown_backend_failure");
        assert_eq!(error.diagnostic(), Some("not implemented"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        use AnalysisPhase::*;
        assert_eq!(
            run.phases(),
            &[Idle, Building, Built, Analyzing, AnalysisFailed, Idle]
        );
    }

    #[test]
    fn test_transitions() {
        use AnalysisPhase::*;
        assert!(Idle.can_transition_to(Building));
        assert!(!Idle.can_transition_to(Analyzing));
        assert!(!BuildFailed.can_transition_to(Analyzing));
        assert!(Analyzed.can_transition_to(Idle));
    }
}

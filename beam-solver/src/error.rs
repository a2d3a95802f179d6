//! Error types for the beam solver

use thiserror::Error;

use crate::elements::SupportKind;

/// Structurally inadmissible input, rejected before any backend call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Beam length must be a positive number, got {0}")]
    NonPositiveLength(f64),

    #[error("At least one support is required")]
    NoSupports,

    #[error("A single support must be fixed, but S1 is {kind}")]
    SingleSupportMustBeFixed { kind: SupportKind },

    #[error("Support {label} at {position} m lies outside the beam [0, {length}] m")]
    SupportOutOfRange {
        label: String,
        position: f64,
        length: f64,
    },

    #[error("Supports {first} and {second} share the position {position} m")]
    DuplicateSupportPosition {
        first: String,
        second: String,
        position: f64,
    },

    #[error("Point load {label} at {position} m lies outside the beam [0, {length}] m")]
    LoadOutOfRange {
        label: String,
        position: f64,
        length: f64,
    },

    #[error("Distributed load {label} from {start} m to {end} m lies outside the beam [0, {length}] m")]
    DistributedLoadOutOfRange {
        label: String,
        start: f64,
        end: f64,
        length: f64,
    },

    #[error("Distributed load {label} starts at {start} m, after its end at {end} m")]
    InvertedDistributedLoad { label: String, start: f64, end: f64 },

    #[error("Load {label} has a non-finite magnitude")]
    NonFiniteMagnitude { label: String },
}

/// Every violation found in one input, in category order
#[derive(Error, Debug, Clone, PartialEq, Default)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// First violation, if any
    pub fn first(&self) -> Option<&ValidationError> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Does any violation equal `error`?
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

/// The analysis backend could not produce a result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Solver could not find an equilibrium solution: {reason}")]
    SolverDivergence { reason: String },

    #[error("Analysis backend '{backend}' is unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("Analysis backend failed unexpectedly")]
    UnknownBackendFailure { diagnostic: String },
}

impl AnalysisError {
    /// Opaque detail for a debug panel
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::SolverDivergence { reason } => Some(reason),
            Self::BackendUnavailable { reason, .. } => Some(reason),
            Self::UnknownBackendFailure { diagnostic } => Some(diagnostic),
        }
    }
}

/// Either failure category, scoped to one analyze invocation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BeamError {
    #[error("Invalid beam: {0}")]
    Validation(#[from] ValidationError),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

impl BeamError {
    /// Stable tag for the failure, used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Analysis(AnalysisError::SolverDivergence { .. }) => "solver_divergence",
            Self::Analysis(AnalysisError::BackendUnavailable { .. }) => "backend_unavailable",
            Self::Analysis(AnalysisError::UnknownBackendFailure { .. }) => "unknown_backend_failure",
        }
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Validation(_) => None,
            Self::Analysis(e) => e.diagnostic(),
        }
    }
}

/// Result type for beam operations
pub type BeamResult<T> = Result<T, BeamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ValidationError::SupportOutOfRange {
            label: "S2".to_string(),
            position: 7.0,
            length: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "Support S2 at 7 m lies outside the beam [0, 5] m"
        );

        let err = ValidationError::SingleSupportMustBeFixed {
            kind: SupportKind::Roller,
        };
        assert!(err.to_string().contains("roller"));
    }

    #[test]
    fn test_kind_tags() {
        let err: BeamError = ValidationError::NoSupports.into();
        assert_eq!(err.kind(), "validation");
        assert!(err.diagnostic().is_none());

        let err: BeamError = AnalysisError::UnknownBackendFailure {
            diagnostic: "trace".to_string(),
        }
        .into();
        assert_eq!(err.kind(), "unknown_backend_failure");
        assert_eq!(err.diagnostic(), Some("trace"));
    }

    #[test]
    fn test_aggregate_display() {
        let errors = ValidationErrors(vec![
            ValidationError::NoSupports,
            ValidationError::NonPositiveLength(0.0),
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "At least one support is required; Beam length must be a positive number, got 0"
        );

        let boxed: Box<dyn std::error::Error> = Box::new(errors);
        assert!(boxed.to_string().starts_with("At least one support"));
        assert_eq!(ValidationErrors::default().to_string(), "");
    }
}

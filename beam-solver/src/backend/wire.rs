//! JSON bodies exchanged between the HTTP service and [`RemoteBackend`]
//!
//! [`RemoteBackend`]: super::RemoteBackend

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, BeamError, ValidationErrors};
use crate::model::BeamModel;
use crate::results::AnalysisResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// A failure as it travels over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// One of the [`BeamError::kind`] tags
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl From<&BeamError> for ErrorBody {
    fn from(error: &BeamError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
            diagnostic: error.diagnostic().map(str::to_string),
        }
    }
}

impl ErrorBody {
    /// Rebuild the analysis failure a remote service reported
    pub fn into_analysis_error(self) -> AnalysisError {
        match self.kind.as_str() {
            "solver_divergence" => AnalysisError::SolverDivergence {
                reason: self.diagnostic.unwrap_or(self.message),
            },
            _ => AnalysisError::UnknownBackendFailure {
                diagnostic: match self.diagnostic {
                    Some(diagnostic) => format!("{} ({}): {}", self.message, self.kind, diagnostic),
                    None => format!("{} ({})", self.message, self.kind),
                },
            },
        }
    }
}

/// Response of `POST /api/v1/analyze`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<BeamModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<AnalysisResult>,
}

impl AnalysisResponse {
    pub fn success(model: BeamModel, results: AnalysisResult) -> Self {
        Self {
            success: true,
            error: None,
            model: Some(model),
            results: Some(results),
        }
    }

    pub fn failure(error: &BeamError) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            model: None,
            results: None,
        }
    }
}

/// Response of `POST /api/v1/validate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl From<Result<(), ValidationErrors>> for ValidationResponse {
    fn from(result: Result<(), ValidationErrors>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                errors: Vec::new(),
            },
            Err(errors) => Self {
                valid: false,
                errors: errors.iter().map(ToString::to_string).collect(),
            },
        }
    }
}

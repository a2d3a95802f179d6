//! Analysis backends
//!
//! A backend turns a validated [`BeamModel`] into an [`AnalysisResult`].
//! Failures come back as [`AnalysisError`] no matter what the underlying
//! solver raises.

mod stiffness;
pub mod wire;

#[cfg(feature = "remote")]
mod remote;

pub use stiffness::StiffnessBackend;

#[cfg(feature = "remote")]
pub use remote::RemoteBackend;

use crate::error::AnalysisError;
use crate::model::BeamModel;
use crate::results::AnalysisResult;

/// Something that can analyze a beam
pub trait AnalysisBackend: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Analyze `model`; the model is never modified
    fn analyze(&self, model: &BeamModel) -> Result<AnalysisResult, AnalysisError>;
}

impl<B: AnalysisBackend + ?Sized> AnalysisBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn analyze(&self, model: &BeamModel) -> Result<AnalysisResult, AnalysisError> {
        (**self).analyze(model)
    }
}

//! Editable beam definition for an interactive front end

use crate::analysis::{run_analysis, Analysis};
use crate::backend::AnalysisBackend;
use crate::elements::Support;
use crate::error::{BeamResult, ValidationErrors};
use crate::loads::{DistributedLoad, PointLoad};
use crate::model::BeamInput;
use crate::validation;

/// Span a new session starts with
pub const DEFAULT_LENGTH: f64 = 5.0;

/// The lists a user edits between analyses
///
/// Nothing here is validated until [`BeamSession::analyze`] or
/// [`BeamSession::validate`]; an analysis works on a snapshot and never
/// changes the session.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamSession {
    input: BeamInput,
}

impl Default for BeamSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BeamSession {
    pub fn new() -> Self {
        Self::with_length(DEFAULT_LENGTH)
    }

    pub fn with_length(length: f64) -> Self {
        Self {
            input: BeamInput {
                length,
                ..Default::default()
            },
        }
    }

    pub fn length(&self) -> f64 {
        self.input.length
    }

    pub fn set_length(&mut self, length: f64) {
        self.input.length = length;
    }

    pub fn point_loads(&self) -> &[PointLoad] {
        &self.input.point_loads
    }

    pub fn distributed_loads(&self) -> &[DistributedLoad] {
        &self.input.distributed_loads
    }

    pub fn supports(&self) -> &[Support] {
        &self.input.supports
    }

    pub fn add_point_load(&mut self, load: PointLoad) {
        self.input.point_loads.push(load);
    }

    pub fn add_distributed_load(&mut self, load: DistributedLoad) {
        self.input.distributed_loads.push(load);
    }

    pub fn add_support(&mut self, support: Support) {
        self.input.supports.push(support);
    }

    /// Remove the point load at `index`; later labels shift down
    pub fn remove_point_load(&mut self, index: usize) -> Option<PointLoad> {
        remove_at(&mut self.input.point_loads, index)
    }

    pub fn remove_distributed_load(&mut self, index: usize) -> Option<DistributedLoad> {
        remove_at(&mut self.input.distributed_loads, index)
    }

    pub fn remove_support(&mut self, index: usize) -> Option<Support> {
        remove_at(&mut self.input.supports, index)
    }

    /// Clear every list; the length is kept
    pub fn reset(&mut self) {
        log::debug!("Resetting beam session");
        self.input.point_loads.clear();
        self.input.distributed_loads.clear();
        self.input.supports.clear();
    }

    /// Copy of the current definition
    pub fn snapshot(&self) -> BeamInput {
        self.input.clone()
    }

    /// Every violation in the current definition
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validation::validate_all(&self.input)
    }

    pub fn analyze(&self, backend: &dyn AnalysisBackend) -> BeamResult<Analysis> {
        run_analysis(&self.snapshot(), backend)
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StiffnessBackend;
    use crate::error::{BeamError, ValidationError};

    #[test]
    fn test_defaults() {
        let session = BeamSession::default();
        assert_eq!(session.length(), 5.0);
        assert!(session.supports().is_empty());
        assert!(session.point_loads().is_empty());
        assert!(session.distributed_loads().is_empty());
    }

    #[test]
    fn test_add_remove_reset() {
        let mut session = BeamSession::new();
        session.add_point_load(PointLoad::new(1.0, -1.0));
        session.add_point_load(PointLoad::new(2.0, -2.0));
        session.add_support(Support::fixed(0.0));

        assert_eq!(session.remove_point_load(5), None);
        assert_eq!(session.remove_point_load(0), Some(PointLoad::new(1.0, -1.0)));
        assert_eq!(session.point_loads(), &[PointLoad::new(2.0, -2.0)]);

        session.set_length(8.0);
        session.reset();
        assert_eq!(session.length(), 8.0);
        assert!(session.point_loads().is_empty());
        assert!(session.supports().is_empty());
    }

    #[test]
    fn test_analysis_leaves_session_untouched() {
        let mut session = BeamSession::new();
        session.add_support(Support::fixed(0.0));
        session.add_point_load(PointLoad::new(2.0, -10.0));
        let before = session.clone();

        let analysis = session.analyze(&StiffnessBackend::default()).unwrap();
        assert_eq!(session, before);
        assert_eq!(analysis.model.into_input(), session.snapshot());
    }

    #[test]
    fn test_empty_session_fails_validation() {
        let session = BeamSession::new();
        assert_eq!(
            session.analyze(&StiffnessBackend::default()).unwrap_err(),
            BeamError::Validation(ValidationError::NoSupports)
        );
        assert!(session.validate().unwrap_err().contains(&ValidationError::NoSupports));
    }
}

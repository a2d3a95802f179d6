//! Beam Solver - build, validate and analyze single-span 2D beams
//!
//! A beam is a span of length L with point loads, linearly varying
//! distributed loads and supports (free, roller, pinned, fixed). Input is
//! checked for structural admissibility, frozen into a [`model::BeamModel`]
//! and handed to an [`backend::AnalysisBackend`], which returns support
//! reactions plus bending moment and shear diagrams.
//!
//! Sign conventions: upward forces and counter-clockwise moments are
//! positive; shear is the sum of upward forces left of a cut; sagging
//! bending moment is positive.
//!
//! ## Example
//! ```rust
//! use beam_solver::prelude::*;
//!
//! let mut session = BeamSession::new();
//! session.add_support(Support::fixed(0.0));
//! session.add_point_load(PointLoad::new(2.0, -10.0));
//!
//! let analysis = session.analyze(&StiffnessBackend::default()).unwrap();
//! let reaction = analysis.result.reaction("S1").unwrap();
//! assert!((reaction.force - 10.0).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod backend;
pub mod elements;
pub mod engine;
pub mod error;
pub mod loads;
pub mod model;
pub mod results;
pub mod session;
pub mod validation;

#[cfg(feature = "server")]
pub mod service;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{run_analysis, Analysis, AnalysisOptions, AnalysisPhase};
    pub use crate::backend::{AnalysisBackend, StiffnessBackend};
    pub use crate::elements::{Support, SupportKind};
    pub use crate::error::{AnalysisError, BeamError, BeamResult, ValidationError, ValidationErrors};
    pub use crate::loads::{DistributedLoad, PointLoad};
    pub use crate::model::{BeamInput, BeamModel};
    pub use crate::results::{AnalysisResult, AnalysisSummary, DiagramPoint, PointOfInterest, Reaction};
    pub use crate::session::BeamSession;

    #[cfg(feature = "remote")]
    pub use crate::backend::RemoteBackend;
}

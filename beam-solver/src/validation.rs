//! Structural admissibility checks
//!
//! Every check is a pure function of its inputs. The `validate_*` functions
//! return the first violation of their category; [`validate_all`] collects
//! every violation across categories. Both walk items in insertion order, so
//! the first violation of a category is always the first entry of that
//! category in the collected set.

use crate::elements::{Support, SupportKind};
use crate::error::{ValidationError, ValidationErrors};
use crate::loads::{DistributedLoad, PointLoad};
use crate::model::{distributed_load_label, point_load_label, support_label, BeamInput};

/// Relative tolerance under which two support positions coincide
pub const POSITION_TOLERANCE: f64 = 1e-9;

/// Check the span invariant L > 0
pub fn validate_span(length: f64) -> Result<(), ValidationError> {
    if length.is_finite() && length > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveLength(length))
    }
}

/// Check the support set for count, fixity, range and duplicates
pub fn validate_supports(supports: &[Support], length: f64) -> Result<(), ValidationError> {
    first(support_violations(supports, Some(length)))
}

/// Check point loads for range and finite magnitudes
pub fn validate_loads(point_loads: &[PointLoad], length: f64) -> Result<(), ValidationError> {
    first(point_load_violations(point_loads, Some(length)))
}

/// Check distributed loads for range, orientation and finite magnitudes
pub fn validate_distributed_loads(
    distributed_loads: &[DistributedLoad],
    length: f64,
) -> Result<(), ValidationError> {
    first(distributed_load_violations(distributed_loads, Some(length)))
}

/// Collect every violation in `input`
///
/// When the span itself is invalid, range checks are skipped since there is
/// no meaningful range to check against.
pub fn validate_all(input: &BeamInput) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    let length = match validate_span(input.length) {
        Ok(()) => Some(input.length),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    errors.extend(support_violations(&input.supports, length));
    errors.extend(point_load_violations(&input.point_loads, length));
    errors.extend(distributed_load_violations(&input.distributed_loads, length));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn first(errors: Vec<ValidationError>) -> Result<(), ValidationError> {
    match errors.into_iter().next() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn in_range(position: f64, length: f64) -> bool {
    (0.0..=length).contains(&position)
}

fn support_violations(supports: &[Support], length: Option<f64>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match supports {
        [] => {
            errors.push(ValidationError::NoSupports);
            return errors;
        }
        [only] if only.kind != SupportKind::Fixed => {
            errors.push(ValidationError::SingleSupportMustBeFixed { kind: only.kind });
        }
        _ => {}
    }

    if let Some(length) = length {
        for (i, support) in supports.iter().enumerate() {
            if !in_range(support.position, length) {
                errors.push(ValidationError::SupportOutOfRange {
                    label: support_label(i),
                    position: support.position,
                    length,
                });
            }
        }
    }

    let tolerance = POSITION_TOLERANCE * length.map_or(1.0, |l| l.max(1.0));
    for (j, later) in supports.iter().enumerate().skip(1) {
        let earlier = supports[..j]
            .iter()
            .position(|s| (s.position - later.position).abs() <= tolerance);
        if let Some(i) = earlier {
            errors.push(ValidationError::DuplicateSupportPosition {
                first: support_label(i),
                second: support_label(j),
                position: later.position,
            });
        }
    }

    errors
}

fn point_load_violations(point_loads: &[PointLoad], length: Option<f64>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, load) in point_loads.iter().enumerate() {
        if let Some(length) = length {
            if !in_range(load.position, length) {
                errors.push(ValidationError::LoadOutOfRange {
                    label: point_load_label(i),
                    position: load.position,
                    length,
                });
            }
        }
        if !load.magnitude.is_finite() {
            errors.push(ValidationError::NonFiniteMagnitude {
                label: point_load_label(i),
            });
        }
    }

    errors
}

fn distributed_load_violations(
    distributed_loads: &[DistributedLoad],
    length: Option<f64>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, load) in distributed_loads.iter().enumerate() {
        if let Some(length) = length {
            if !in_range(load.start_position, length) || !in_range(load.end_position, length) {
                errors.push(ValidationError::DistributedLoadOutOfRange {
                    label: distributed_load_label(i),
                    start: load.start_position,
                    end: load.end_position,
                    length,
                });
            }
        }
        if load.start_position > load.end_position {
            errors.push(ValidationError::InvertedDistributedLoad {
                label: distributed_load_label(i),
                start: load.start_position,
                end: load.end_position,
            });
        }
        if !load.start_magnitude.is_finite() || !load.end_magnitude.is_finite() {
            errors.push(ValidationError::NonFiniteMagnitude {
                label: distributed_load_label(i),
            });
        }
    }

    errors
}

//! Beam model - validated, immutable input to an analysis backend

use serde::{Deserialize, Serialize};

use crate::elements::Support;
use crate::error::ValidationError;
use crate::loads::{DistributedLoad, PointLoad};
use crate::validation;

/// Label of the support at `index` (`S1`, `S2`, ...)
pub fn support_label(index: usize) -> String {
    format!("S{}", index + 1)
}

/// Label of the point load at `index` (`F1`, `F2`, ...)
pub fn point_load_label(index: usize) -> String {
    format!("F{}", index + 1)
}

/// Label of the distributed load at `index` (`DL1`, `DL2`, ...)
pub fn distributed_load_label(index: usize) -> String {
    format!("DL{}", index + 1)
}

/// Raw beam definition as a caller collects it, not yet validated
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamInput {
    /// Span length
    pub length: f64,
    #[serde(default)]
    pub point_loads: Vec<PointLoad>,
    #[serde(default)]
    pub distributed_loads: Vec<DistributedLoad>,
    #[serde(default)]
    pub supports: Vec<Support>,
}

/// A validated beam, ready for submission to a backend
///
/// Only constructible through [`BeamModel::build`] (or deserialization, which
/// goes through the same checks). Sequences keep their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BeamInput")]
pub struct BeamModel {
    length: f64,
    point_loads: Vec<PointLoad>,
    distributed_loads: Vec<DistributedLoad>,
    supports: Vec<Support>,
}

impl BeamModel {
    /// Validate a snapshot of the caller's collections and build a model
    ///
    /// Returns the first violation, in the order span, supports, point
    /// loads, distributed loads. Nothing is built on failure.
    pub fn build(
        length: f64,
        point_loads: &[PointLoad],
        distributed_loads: &[DistributedLoad],
        supports: &[Support],
    ) -> Result<Self, ValidationError> {
        validation::validate_span(length)?;
        validation::validate_supports(supports, length)?;
        validation::validate_loads(point_loads, length)?;
        validation::validate_distributed_loads(distributed_loads, length)?;

        log::debug!(
            "Built beam model: L={} m, {} supports, {} point loads, {} distributed loads",
            length,
            supports.len(),
            point_loads.len(),
            distributed_loads.len()
        );

        Ok(Self {
            length,
            point_loads: point_loads.to_vec(),
            distributed_loads: distributed_loads.to_vec(),
            supports: supports.to_vec(),
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn point_loads(&self) -> &[PointLoad] {
        &self.point_loads
    }

    pub fn distributed_loads(&self) -> &[DistributedLoad] {
        &self.distributed_loads
    }

    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    /// Sum of all applied vertical forces
    pub fn total_applied_force(&self) -> f64 {
        self.point_loads.iter().map(|p| p.magnitude).sum::<f64>()
            + self
                .distributed_loads
                .iter()
                .map(DistributedLoad::total_force)
                .sum::<f64>()
    }

    /// Sorted, de-duplicated positions where something happens on the span
    ///
    /// Always includes both ends.
    pub fn stations(&self) -> Vec<f64> {
        let mut stations = vec![0.0, self.length];
        stations.extend(self.supports.iter().map(|s| s.position));
        stations.extend(self.point_loads.iter().map(|p| p.position));
        for load in &self.distributed_loads {
            stations.push(load.start_position);
            stations.push(load.end_position);
        }
        stations.sort_by(f64::total_cmp);

        let tolerance = validation::POSITION_TOLERANCE * self.length.max(1.0);
        let mut unique: Vec<f64> = Vec::with_capacity(stations.len());
        for x in stations {
            match unique.last() {
                Some(&last) if (x - last).abs() <= tolerance => {}
                _ => unique.push(x),
            }
        }
        unique
    }

    /// Recover the plain record
    pub fn into_input(self) -> BeamInput {
        BeamInput {
            length: self.length,
            point_loads: self.point_loads,
            distributed_loads: self.distributed_loads,
            supports: self.supports,
        }
    }
}

impl TryFrom<BeamInput> for BeamModel {
    type Error = ValidationError;

    fn try_from(input: BeamInput) -> Result<Self, Self::Error> {
        Self::build(
            input.length,
            &input.point_loads,
            &input.distributed_loads,
            &input.supports,
        )
    }
}

impl TryFrom<&BeamInput> for BeamModel {
    type Error = ValidationError;

    fn try_from(input: &BeamInput) -> Result<Self, Self::Error> {
        Self::build(
            input.length,
            &input.point_loads,
            &input.distributed_loads,
            &input.supports,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_input() -> BeamInput {
        BeamInput {
            length: 5.0,
            point_loads: vec![PointLoad::new(3.3, -7.125), PointLoad::new(1.0 / 3.0, 2.5)],
            distributed_loads: vec![DistributedLoad::new(0.1, 4.9, -1.0, -0.3)],
            supports: vec![Support::roller(5.0), Support::pinned(0.0)],
        }
    }

    #[test]
    fn test_build_preserves_order_and_precision() {
        let input = sample_input();
        let model = BeamModel::try_from(&input).unwrap();

        assert_eq!(model.length(), 5.0);
        assert_eq!(model.point_loads(), input.point_loads.as_slice());
        assert_eq!(model.point_loads()[1].position, 1.0 / 3.0);
        assert_eq!(model.distributed_loads(), input.distributed_loads.as_slice());
        assert_eq!(model.supports(), input.supports.as_slice());
        assert_eq!(model.into_input(), input);
    }

    #[test]
    fn test_build_is_all_or_nothing() {
        let result = BeamModel::build(5.0, &[PointLoad::new(6.0, -1.0)], &[], &[Support::fixed(0.0)]);
        assert!(matches!(result, Err(ValidationError::LoadOutOfRange { .. })));
    }

    #[test]
    fn test_build_reports_supports_before_loads() {
        let result = BeamModel::build(5.0, &[PointLoad::new(6.0, -1.0)], &[], &[]);
        assert_eq!(result, Err(ValidationError::NoSupports));
    }

    #[test]
    fn test_build_does_not_touch_caller_collections() {
        let loads = vec![PointLoad::new(2.0, -10.0)];
        let supports = vec![Support::fixed(0.0)];
        let model = BeamModel::build(5.0, &loads, &[], &supports).unwrap();
        drop(model);
        assert_eq!(loads, vec![PointLoad::new(2.0, -10.0)]);
        assert_eq!(supports, vec![Support::fixed(0.0)]);
    }

    #[test]
    fn test_stations() {
        let model = BeamModel::try_from(sample_input()).unwrap();
        let stations = model.stations();
        assert_eq!(stations.len(), 6);
        assert_eq!(stations.first(), Some(&0.0));
        assert_eq!(stations.last(), Some(&5.0));
        assert!(stations.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_total_applied_force() {
        let model = BeamModel::build(
            5.0,
            &[PointLoad::new(2.0, -10.0)],
            &[DistributedLoad::uniform(0.0, 5.0, -5.0)],
            &[Support::fixed(0.0)],
        )
        .unwrap();
        assert_relative_eq!(model.total_applied_force(), -35.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"length": 5.0, "supports": [{"position": 0.0, "kind": "roller"}]}"#;
        assert!(serde_json::from_str::<BeamModel>(json).is_err());

        let json = r#"{"length": 5.0, "supports": [{"position": 0.0, "kind": "fixed"}]}"#;
        let model: BeamModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.supports().len(), 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let model = BeamModel::try_from(sample_input()).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: BeamModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}

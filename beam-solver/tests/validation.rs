//! Admissibility rules, exercised through the public builder

use beam_solver::prelude::*;
use beam_solver::validation::validate_all;

fn backend() -> StiffnessBackend {
    StiffnessBackend::default()
}

#[test]
fn test_no_supports_is_rejected() {
    let input = BeamInput {
        length: 5.0,
        point_loads: vec![PointLoad::new(2.0, -10.0)],
        ..Default::default()
    };
    let err = run_analysis(&input, &backend()).unwrap_err();
    assert_eq!(err, BeamError::Validation(ValidationError::NoSupports));
    assert_eq!(err.kind(), "validation");
}

#[test]
fn test_single_support_must_be_fixed() {
    for kind in [SupportKind::Free, SupportKind::Roller, SupportKind::Pinned] {
        let input = BeamInput {
            length: 5.0,
            supports: vec![Support::new(2.5, kind)],
            ..Default::default()
        };
        assert_eq!(
            BeamModel::try_from(&input).unwrap_err(),
            ValidationError::SingleSupportMustBeFixed { kind }
        );
    }

    let input = BeamInput {
        length: 5.0,
        supports: vec![Support::fixed(5.0)],
        ..Default::default()
    };
    assert!(BeamModel::try_from(&input).is_ok());
}

#[test]
fn test_two_rollers_are_admissible() {
    let input = BeamInput {
        length: 5.0,
        point_loads: vec![PointLoad::new(2.5, -10.0)],
        supports: vec![Support::roller(0.0), Support::roller(5.0)],
        ..Default::default()
    };
    let analysis = run_analysis(&input, &backend()).unwrap();
    assert!((analysis.result.total_reaction_force() - 10.0).abs() < 1e-9);
}

#[test]
fn test_positions_outside_span_name_the_item() {
    let input = BeamInput {
        length: 5.0,
        point_loads: vec![PointLoad::new(1.0, -1.0), PointLoad::new(5.0001, -1.0)],
        supports: vec![Support::fixed(0.0)],
        ..Default::default()
    };
    let err = BeamModel::try_from(&input).unwrap_err();
    assert!(err.to_string().contains("F2"), "{}", err);

    let input = BeamInput {
        length: 5.0,
        supports: vec![Support::pinned(0.0), Support::roller(-1.0)],
        ..Default::default()
    };
    let err = BeamModel::try_from(&input).unwrap_err();
    assert!(err.to_string().contains("S2"), "{}", err);
}

#[test]
fn test_distributed_load_rules() {
    let base = BeamInput {
        length: 5.0,
        supports: vec![Support::fixed(0.0)],
        ..Default::default()
    };

    let mut input = base.clone();
    input.distributed_loads = vec![DistributedLoad::uniform(4.0, 1.0, -1.0)];
    assert!(matches!(
        BeamModel::try_from(&input),
        Err(ValidationError::InvertedDistributedLoad { .. })
    ));

    let mut input = base.clone();
    input.distributed_loads = vec![DistributedLoad::uniform(0.0, 5.5, -1.0)];
    assert!(matches!(
        BeamModel::try_from(&input),
        Err(ValidationError::DistributedLoadOutOfRange { .. })
    ));

    // zero-length loads are admissible and carry nothing
    let mut input = base;
    input.distributed_loads = vec![DistributedLoad::uniform(2.0, 2.0, -100.0)];
    let analysis = run_analysis(&input, &backend()).unwrap();
    assert!(analysis.result.total_reaction_force().abs() < 1e-12);
}

#[test]
fn test_span_is_checked_first() {
    let input = BeamInput {
        length: 0.0,
        ..Default::default()
    };
    assert_eq!(
        BeamModel::try_from(&input).unwrap_err(),
        ValidationError::NonPositiveLength(0.0)
    );
}

#[test]
fn test_validate_all_reports_everything() {
    let input = BeamInput {
        length: 5.0,
        point_loads: vec![PointLoad::new(-1.0, -1.0), PointLoad::new(2.0, f64::NAN)],
        distributed_loads: vec![DistributedLoad::uniform(3.0, 9.0, -2.0)],
        supports: vec![Support::pinned(1.0), Support::roller(1.0)],
    };
    let errors = validate_all(&input).unwrap_err();

    assert_eq!(errors.len(), 4);
    assert!(errors.contains(&ValidationError::DuplicateSupportPosition {
        first: "S1".to_string(),
        second: "S2".to_string(),
        position: 1.0,
    }));
    assert!(errors.contains(&ValidationError::NonFiniteMagnitude {
        label: "F2".to_string()
    }));

    // the builder stops at the first of them
    assert_eq!(
        Some(&BeamModel::try_from(&input).unwrap_err()),
        errors.first()
    );
}

#[test]
fn test_json_input_goes_through_validation() {
    let json = r#"{
        "length": 5.0,
        "point_loads": [{"position": 2.0, "magnitude": -10.0}],
        "supports": [{"position": 0.0, "kind": "fixed"}]
    }"#;
    let input: BeamInput = serde_json::from_str(json).unwrap();
    assert!(input.distributed_loads.is_empty());
    assert!(validate_all(&input).is_ok());

    let json = r#"{"length": 5.0, "supports": [{"position": 0.0, "kind": "hinge"}]}"#;
    assert!(serde_json::from_str::<BeamInput>(json).is_err());
}

use feasibility_core::{
    compute_zoning,
    core::zoning::compute_zoning_with,
    domain::{ZoningParams, ZoningRules},
    errors::ErrorCategory,
    required_parcel_area, FeasibilityError,
};

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-6
}

#[test]
fn wizard_sample_parcel_matches_hand_calculation() {
    let params = ZoningParams::new(2146.0, 0.30, 0.60)
        .with_projection(1.70)
        .with_max_height(17.50);
    let zoning = compute_zoning(&params).expect("zoning");
    assert!(close(zoning.ground_coverage_area, 643.8));
    assert!(close(zoning.total_construction_area, 2188.92));
    assert_eq!(zoning.floor_count, 2);
    assert!(!zoning.height_limited);
    assert!(!zoning.floor_limited);
    assert!(!zoning.is_constrained());
}

#[test]
fn usable_areas_never_exceed_construction_area() {
    for parcel in [150.0, 846.5, 2146.0, 12_000.0] {
        for taks in [0.0, 0.2, 0.35, 0.5, 1.0] {
            for kaks in [0.0, 0.6, 1.25, 2.5, 4.0] {
                for exempt in [0.0, 0.3, 1.0] {
                    let mut params = ZoningParams::new(parcel, taks, kaks).with_projection(1.6);
                    params.exempt_area_ratio = Some(exempt);
                    params.net_to_gross_ratio = Some(0.8);
                    let zoning = compute_zoning(&params).expect("zoning");
                    assert!(zoning.net_usable_area <= zoning.gross_usable_area);
                    assert!(zoning.gross_usable_area <= zoning.total_construction_area);
                    assert!(zoning.net_usable_area >= 0.0);
                }
            }
        }
    }
}

#[test]
fn height_cap_binds_when_lower_than_kaks_floors() {
    let cases = [
        // (taks, kaks, max_height, expected floors)
        (0.30, 1.50, 7.5, 2),
        (0.25, 2.00, 12.0, 4),
        (0.40, 2.00, 9.5, 3),
    ];
    for (taks, kaks, height, floors) in cases {
        let params = ZoningParams::new(1000.0, taks, kaks).with_max_height(height);
        let zoning = compute_zoning(&params).expect("zoning");
        assert!(zoning.height_limited, "taks {taks} kaks {kaks} height {height}");
        assert_eq!(zoning.floor_count, floors);
        assert_eq!(zoning.floors_by_height, Some(floors));
    }
}

#[test]
fn explicit_floor_cap_is_reported() {
    let params = ZoningParams::new(1000.0, 0.30, 1.50).with_max_floors(4);
    let zoning = compute_zoning(&params).expect("zoning");
    assert_eq!(zoning.floor_count, 4);
    assert!(zoning.floor_limited);
    assert!(!zoning.height_limited);

    let loose = ZoningParams::new(1000.0, 0.30, 1.50).with_max_floors(8);
    let zoning = compute_zoning(&loose).expect("zoning");
    assert_eq!(zoning.floor_count, 5);
    assert!(!zoning.floor_limited);
}

#[test]
fn custom_rules_change_floor_height_and_ceiling() {
    let rules = ZoningRules {
        typical_floor_height: 3.5,
        max_kaks: 1.0,
        ..ZoningRules::default()
    };
    let params = ZoningParams::new(1000.0, 0.20, 0.80).with_max_height(10.0);
    let zoning = compute_zoning_with(&params, &rules).expect("zoning");
    assert_eq!(zoning.floors_by_height, Some(2));
    assert_eq!(zoning.floor_count, 2);
    assert_eq!(zoning.applied.typical_floor_height, 3.5);

    let too_dense = ZoningParams::new(1000.0, 0.20, 1.20);
    let err = compute_zoning_with(&too_dense, &rules).expect_err("above ceiling");
    assert_eq!(err.category(), ErrorCategory::InputValidation);
}

#[test]
fn invalid_rules_are_configuration_errors() {
    let rules = ZoningRules {
        typical_floor_height: 0.0,
        ..ZoningRules::default()
    };
    let err = compute_zoning_with(&ZoningParams::new(100.0, 0.3, 1.0), &rules)
        .expect_err("zero floor height");
    assert!(matches!(err, FeasibilityError::Configuration(_)));
}

#[test]
fn parcel_sizing_round_trips_through_zoning() {
    let parcel = required_parcel_area(2188.92, 0.60, 1.70).expect("sizing");
    assert!(close(parcel, 2146.0));
    let zoning = compute_zoning(&ZoningParams::new(parcel, 0.30, 0.60).with_projection(1.70))
        .expect("zoning");
    assert!(close(zoning.total_construction_area, 2188.92));
}

#![allow(dead_code)]

use chrono::NaiveDate;
use feasibility_core::domain::{
    CostInputs, FeasibilityRequest, ParcelIdentity, TimelineConfig, ZoningParams,
};

/// The Kepez 6960/4 parcel used throughout the wizard walkthroughs.
pub fn sample_request() -> FeasibilityRequest {
    FeasibilityRequest {
        project_id: None,
        parcel: Some(ParcelIdentity {
            district: "Kepez".into(),
            block: "6960".into(),
            parcel: "4".into(),
        }),
        zoning: ZoningParams::new(2146.0, 0.30, 0.60)
            .with_projection(1.70)
            .with_max_height(17.50),
        unit_mix: None,
        costs: CostInputs {
            land_cost: 5_000_000.0,
            construction_cost_per_area: 9_000.0,
            soft_cost_ratio: 0.10,
        },
        timeline: TimelineConfig::new(18, 6, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
        rates: None,
        scenarios: None,
        pricing_as_of: None,
    }
}

pub fn sample_request_json() -> String {
    serde_json::to_string_pretty(&sample_request()).expect("serialize request")
}

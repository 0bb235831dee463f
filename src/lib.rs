#![doc(test(attr(deny(warnings))))]

//! Feasibility Core estimates whether a residential project on a zoned parcel pays off:
//! buildable area from TAKS/KAKS, a unit mix, a month-by-month cost and value projection
//! under inflation, and optimistic/realistic/pessimistic re-pricing.
//!
//! ```
//! use feasibility_core::{compute_zoning, domain::ZoningParams};
//!
//! let params = ZoningParams::new(1000.0, 0.30, 1.50).with_projection(1.60);
//! let zoning = compute_zoning(&params).unwrap();
//! assert_eq!(zoning.floor_count, 5);
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

pub use crate::core::{
    allocate_unit_mix, annual_to_monthly, compute_zoning, estimate_costs, evaluate_scenario,
    evaluate_standard_scenarios, monthly_to_annual, optimize_unit_mix, project_timeline,
    required_parcel_area,
};
pub use errors::{FeasibilityError, Result};

use std::sync::Once;

use config::EngineConfig;
use domain::project::{FeasibilityReport, FeasibilityRequest};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Feasibility Core tracing initialized.");
    });
}

/// Runs the full pipeline with the built-in defaults.
pub fn analyze_feasibility(request: &FeasibilityRequest) -> Result<FeasibilityReport> {
    crate::core::services::FeasibilityService::analyze(request, &EngineConfig::default())
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

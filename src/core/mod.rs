//! The calculation stages. Every function here is pure: no I/O and no shared state.

pub mod cost;
pub mod inflation;
pub mod s_curve;
pub mod scenario;
pub mod services;
pub mod timeline;
pub mod unit_mix;
pub mod zoning;

pub use cost::estimate_costs;
pub use inflation::{annual_to_monthly, monthly_to_annual};
pub use scenario::{evaluate_scenario, evaluate_standard_scenarios};
pub use timeline::project_timeline;
pub use unit_mix::{allocate_unit_mix, optimize_unit_mix};
pub use zoning::{compute_zoning, required_parcel_area};

//! Value types flowing through the feasibility pipeline.

pub mod cost;
pub mod project;
pub mod scenario;
pub mod timeline;
pub mod unit;
pub mod zoning;

pub use cost::{CostEstimate, CostInputs};
pub use project::{
    FeasibilityProject, FeasibilityReport, FeasibilityRequest, FeasibilitySummary,
    ParcelIdentity, ReportWarning,
};
pub use scenario::{
    ScenarioBaseline, ScenarioConfig, ScenarioKind, ScenarioPresets, ScenarioResult, ScenarioSet,
};
pub use timeline::{
    MonthlyProjection, MonthlyRates, Phase, PhaseSchedule, ProjectTimeline, ProjectionRates,
    TimelineConfig,
};
pub use unit::{
    AllocationStrategy, UnitAllocation, UnitMixConfig, UnitMixResult, UnitMixRules,
    UnitMixWarning, UnitType,
};
pub use zoning::{AppliedCoefficients, ZoningParams, ZoningResult, ZoningRules};

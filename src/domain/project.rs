use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    cost::{CostEstimate, CostInputs},
    scenario::{ScenarioPresets, ScenarioSet},
    timeline::{ProjectTimeline, ProjectionRates, TimelineConfig},
    unit::{UnitMixConfig, UnitMixResult},
    zoning::{ZoningParams, ZoningResult},
};

/// Land registry identity of the parcel (ilçe / ada / parsel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelIdentity {
    pub district: String,
    pub block: String,
    pub parcel: String,
}

impl ParcelIdentity {
    pub fn label(&self) -> String {
        format!("{} {}/{}", self.district, self.block, self.parcel)
    }
}

/// Everything the engine needs for one end-to-end feasibility run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel: Option<ParcelIdentity>,
    pub zoning: ZoningParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_mix: Option<UnitMixConfig>,
    pub costs: CostInputs,
    pub timeline: TimelineConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<ProjectionRates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<ScenarioPresets>,
    /// Date the unit prices were collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    UnitMix { message: String },
    StalePricing { as_of: NaiveDate, age_days: i64 },
    Unprofitable { net_profit: f64 },
}

/// Headline numbers at the optimal sale month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilitySummary {
    pub sale_month: u32,
    pub total_investment: f64,
    pub projected_revenue: f64,
    pub financing_cost: f64,
    pub net_profit: f64,
    pub roi: f64,
    pub profit_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel: Option<ParcelIdentity>,
    pub zoning: ZoningResult,
    pub unit_mix: UnitMixResult,
    pub costs: CostEstimate,
    pub timeline: ProjectTimeline,
    pub scenarios: ScenarioSet,
    pub summary: FeasibilitySummary,
    pub warnings: Vec<ReportWarning>,
}

/// Flat record handed to whatever stores projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel: Option<ParcelIdentity>,
    pub zoning: ZoningParams,
    pub unit_counts: Vec<(String, u32)>,
    pub average_price_per_area: f64,
    pub construction_cost_per_area: f64,
    pub total_investment: f64,
    pub projected_revenue: f64,
    pub net_profit: f64,
    pub roi: f64,
    pub expected_scenario_profit: f64,
}

impl FeasibilityReport {
    pub fn project_record(&self, request: &FeasibilityRequest) -> FeasibilityProject {
        FeasibilityProject {
            project_id: self.project_id,
            parcel: self.parcel.clone(),
            zoning: request.zoning.clone(),
            unit_counts: self
                .unit_mix
                .allocations
                .iter()
                .map(|row| (row.code.clone(), row.count))
                .collect(),
            average_price_per_area: self.unit_mix.average_price_per_area(),
            construction_cost_per_area: request.costs.construction_cost_per_area,
            total_investment: self.summary.total_investment,
            projected_revenue: self.summary.projected_revenue,
            net_profit: self.summary.net_profit,
            roi: self.summary.roi,
            expected_scenario_profit: self.scenarios.expected_profit,
        }
    }
}

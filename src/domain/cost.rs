use serde::{Deserialize, Serialize};

fn default_soft_cost_ratio() -> f64 {
    0.10
}

/// Cost assumptions entered alongside the zoning data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    pub land_cost: f64,
    /// Construction cost per m² of total construction area.
    pub construction_cost_per_area: f64,
    /// Design, permits and project management as a share of construction cost.
    #[serde(default = "default_soft_cost_ratio")]
    pub soft_cost_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub land_cost: f64,
    pub construction_area: f64,
    pub construction_cost: f64,
    pub soft_costs: f64,
    pub nominal_construction_cost: f64,
    pub total_cost: f64,
}

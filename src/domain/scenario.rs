use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Optimistic,
    Realistic,
    Pessimistic,
    Custom,
}

/// Adjustments applied on top of a baseline. Multipliers are relative (1.0 is neutral),
/// deltas are added to monthly rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub kind: ScenarioKind,
    pub cost_variance: f64,
    pub sales_variance: f64,
    pub timeline_variance: f64,
    pub inflation_delta: f64,
    pub appreciation_delta: f64,
    /// Weight used when folding the standard set into an expected value.
    pub probability: f64,
}

impl ScenarioConfig {
    pub fn optimistic() -> Self {
        Self {
            name: "Optimistic".into(),
            kind: ScenarioKind::Optimistic,
            cost_variance: 0.92,
            sales_variance: 1.08,
            timeline_variance: 0.90,
            inflation_delta: -0.002,
            appreciation_delta: 0.002,
            probability: 0.25,
        }
    }

    pub fn realistic() -> Self {
        Self {
            name: "Realistic".into(),
            kind: ScenarioKind::Realistic,
            cost_variance: 1.0,
            sales_variance: 1.0,
            timeline_variance: 1.0,
            inflation_delta: 0.0,
            appreciation_delta: 0.0,
            probability: 0.50,
        }
    }

    pub fn pessimistic() -> Self {
        Self {
            name: "Pessimistic".into(),
            kind: ScenarioKind::Pessimistic,
            cost_variance: 1.15,
            sales_variance: 0.92,
            timeline_variance: 1.20,
            inflation_delta: 0.005,
            appreciation_delta: -0.003,
            probability: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioPresets {
    pub optimistic: ScenarioConfig,
    pub realistic: ScenarioConfig,
    pub pessimistic: ScenarioConfig,
}

impl Default for ScenarioPresets {
    fn default() -> Self {
        Self {
            optimistic: ScenarioConfig::optimistic(),
            realistic: ScenarioConfig::realistic(),
            pessimistic: ScenarioConfig::pessimistic(),
        }
    }
}

/// Figures a scenario re-evaluation starts from. Unit mix and zoning stay fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBaseline {
    pub land_cost: f64,
    pub nominal_construction_cost: f64,
    /// Current average sales price per gross m².
    pub price_per_area: f64,
    pub sellable_area: f64,
    pub construction_months: u32,
    pub sales_months: u32,
    pub monthly_inflation: f64,
    pub monthly_appreciation: f64,
    pub monthly_discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub kind: ScenarioKind,
    pub construction_months: u32,
    pub total_months: u32,
    pub monthly_inflation: f64,
    pub monthly_appreciation: f64,
    pub nominal_construction_cost: f64,
    pub inflated_construction_cost: f64,
    pub total_cost: f64,
    pub price_per_area: f64,
    pub future_revenue: f64,
    pub npv_revenue: f64,
    pub profit: f64,
    pub roi: f64,
    pub profit_margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub optimistic: ScenarioResult,
    pub realistic: ScenarioResult,
    pub pessimistic: ScenarioResult,
    /// Probability-weighted profit across the three scenarios.
    pub expected_profit: f64,
    /// Optimistic minus pessimistic profit.
    pub profit_spread: f64,
}

impl ScenarioSet {
    pub fn iter(&self) -> impl Iterator<Item = &ScenarioResult> {
        [&self.optimistic, &self.realistic, &self.pessimistic].into_iter()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Longest projection horizon accepted, construction plus sales (fifty years).
pub const MAX_TIMELINE_MONTHS: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub construction_months: u32,
    pub sales_months: u32,
    pub start_date: NaiveDate,
}

impl TimelineConfig {
    pub fn new(construction_months: u32, sales_months: u32, start_date: NaiveDate) -> Self {
        Self {
            construction_months,
            sales_months,
            start_date,
        }
    }

    /// `None` when the two durations overflow `u32`.
    pub fn total_months(&self) -> Option<u32> {
        self.construction_months.checked_add(self.sales_months)
    }
}

/// Annual rates supplied by the caller. Converted to monthly rates exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionRates {
    pub annual_cost_inflation: f64,
    pub annual_appreciation: f64,
    /// Opportunity cost of capital tied up in the project.
    pub annual_interest: f64,
    pub annual_discount: f64,
}

impl Default for ProjectionRates {
    fn default() -> Self {
        Self {
            annual_cost_inflation: 0.35,
            annual_appreciation: 0.30,
            annual_interest: 0.35,
            annual_discount: 0.40,
        }
    }
}

impl ProjectionRates {
    pub fn zero() -> Self {
        Self {
            annual_cost_inflation: 0.0,
            annual_appreciation: 0.0,
            annual_interest: 0.0,
            annual_discount: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRates {
    pub cost_inflation: f64,
    pub appreciation: f64,
    pub interest: f64,
    pub discount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Planning,
    Foundation,
    Structure,
    Finishing,
    Sales,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Planning => "planning",
            Phase::Foundation => "foundation",
            Phase::Structure => "structure",
            Phase::Finishing => "finishing",
            Phase::Sales => "sales",
        }
    }
}

/// Where a construction phase falls on the calendar and how much it spends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    pub phase: Phase,
    pub start_month: u32,
    pub end_month: u32,
    pub cost_weight: f64,
    pub nominal_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub month: u32,
    pub date: NaiveDate,
    pub phase: Phase,
    /// Construction progress in percent.
    pub progress: f64,
    pub nominal_cost: f64,
    pub cost_this_month: f64,
    pub cumulative_cost: f64,
    pub interest_cost: f64,
    pub cumulative_interest: f64,
    /// Revenue weighted by construction progress, before appreciation.
    pub property_value: f64,
    pub appreciated_value: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTimeline {
    pub config: TimelineConfig,
    pub monthly_rates: MonthlyRates,
    pub phases: Vec<PhaseSchedule>,
    pub months: Vec<MonthlyProjection>,
    pub total_nominal_cost: f64,
    pub total_nominal_revenue: f64,
    pub total_inflated_cost: f64,
    pub inflation_impact: f64,
    pub total_interest: f64,
    pub optimal_sale_month: u32,
    pub break_even_month: u32,
    pub completion_month: u32,
    pub end_date: NaiveDate,
}

impl ProjectTimeline {
    pub fn month(&self, month: u32) -> Option<&MonthlyProjection> {
        self.months.get(month as usize)
    }

    pub fn final_month(&self) -> Option<&MonthlyProjection> {
        self.months.last()
    }

    pub fn optimal_sale(&self) -> Option<&MonthlyProjection> {
        self.month(self.optimal_sale_month)
    }
}

use crate::domain::cost::{CostEstimate, CostInputs};
use crate::domain::zoning::ZoningResult;
use crate::errors::{FeasibilityError, Result};
use crate::utils::ensure_finite;

/// Splits project cost into land and nominal construction cost at today's prices.
pub fn estimate_costs(zoning: &ZoningResult, inputs: &CostInputs) -> Result<CostEstimate> {
    if !inputs.land_cost.is_finite() || inputs.land_cost < 0.0 {
        return Err(FeasibilityError::InvalidCost(format!(
            "land cost must be finite and non-negative, got {}",
            inputs.land_cost
        )));
    }
    if !inputs.construction_cost_per_area.is_finite() || inputs.construction_cost_per_area <= 0.0 {
        return Err(FeasibilityError::InvalidCost(format!(
            "construction cost per m² must be positive, got {}",
            inputs.construction_cost_per_area
        )));
    }
    if !inputs.soft_cost_ratio.is_finite() || !(0.0..=1.0).contains(&inputs.soft_cost_ratio) {
        return Err(FeasibilityError::InvalidCost(format!(
            "soft cost ratio must lie within [0, 1], got {}",
            inputs.soft_cost_ratio
        )));
    }

    let construction_area = zoning.total_construction_area;
    let construction_cost = ensure_finite(
        "cost",
        "construction_cost",
        construction_area * inputs.construction_cost_per_area,
    )?;
    let soft_costs = construction_cost * inputs.soft_cost_ratio;
    let nominal_construction_cost = construction_cost + soft_costs;
    let total_cost = ensure_finite(
        "cost",
        "total_cost",
        inputs.land_cost + nominal_construction_cost,
    )?;

    tracing::debug!(construction_area, nominal_construction_cost, total_cost, "costs estimated");

    Ok(CostEstimate {
        land_cost: inputs.land_cost,
        construction_area,
        construction_cost,
        soft_costs,
        nominal_construction_cost,
        total_cost,
    })
}

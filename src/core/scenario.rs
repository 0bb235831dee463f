use crate::core::inflation::{future_value, inflate_cost_uniform, present_value};
use crate::domain::cost::CostEstimate;
use crate::domain::scenario::{
    ScenarioBaseline, ScenarioConfig, ScenarioPresets, ScenarioResult, ScenarioSet,
};
use crate::domain::timeline::{ProjectTimeline, MAX_TIMELINE_MONTHS};
use crate::domain::unit::UnitMixResult;
use crate::errors::{FeasibilityError, Result};
use crate::utils::ensure_finite;

const STAGE: &str = "scenario";

impl ScenarioBaseline {
    /// Collects the already-separated cost and price figures of a completed projection.
    pub fn from_parts(
        timeline: &ProjectTimeline,
        costs: &CostEstimate,
        unit_mix: &UnitMixResult,
    ) -> Self {
        Self {
            land_cost: costs.land_cost,
            nominal_construction_cost: costs.nominal_construction_cost,
            price_per_area: unit_mix.average_price_per_area(),
            sellable_area: unit_mix.total_gross_area,
            construction_months: timeline.config.construction_months,
            sales_months: timeline.config.sales_months,
            monthly_inflation: timeline.monthly_rates.cost_inflation,
            monthly_appreciation: timeline.monthly_rates.appreciation,
            monthly_discount: timeline.monthly_rates.discount,
        }
    }
}

/// Re-prices a baseline under one scenario.
///
/// Only the inflation accumulation and the discounted sales figure are recomputed. Zoning,
/// unit mix and the phase-based cost distribution stay as they were in the baseline.
pub fn evaluate_scenario(
    baseline: &ScenarioBaseline,
    scenario: &ScenarioConfig,
) -> Result<ScenarioResult> {
    validate_baseline(baseline)?;
    validate_scenario(scenario)?;

    let nominal_construction_cost = baseline.nominal_construction_cost * scenario.cost_variance;
    let construction_months = ((baseline.construction_months as f64 * scenario.timeline_variance)
        .round() as u32)
        .max(1);
    let total_months = construction_months
        .checked_add(baseline.sales_months)
        .filter(|months| *months <= MAX_TIMELINE_MONTHS)
        .ok_or_else(|| {
            FeasibilityError::InvalidScenario(format!(
                "{}: {} construction plus {} sales months exceeds the {} month horizon",
                scenario.name, construction_months, baseline.sales_months, MAX_TIMELINE_MONTHS
            ))
        })?;
    let monthly_inflation = baseline.monthly_inflation + scenario.inflation_delta;
    let inflated_construction_cost =
        inflate_cost_uniform(nominal_construction_cost, construction_months, monthly_inflation)
            .map_err(|err| invalid_scenario(scenario, err))?;

    let price_per_area = baseline.price_per_area * scenario.sales_variance;
    let monthly_appreciation = baseline.monthly_appreciation + scenario.appreciation_delta;
    if monthly_appreciation <= -1.0 {
        return Err(FeasibilityError::InvalidScenario(format!(
            "{}: appreciation of {} per month is below -100%",
            scenario.name, monthly_appreciation
        )));
    }
    let future_revenue = finite(
        "future_revenue",
        future_value(
            baseline.sellable_area * price_per_area,
            monthly_appreciation,
            total_months,
        ),
    )?;
    let npv_revenue = finite(
        "npv_revenue",
        present_value(future_revenue, baseline.monthly_discount, total_months),
    )?;

    let total_cost = baseline.land_cost + inflated_construction_cost;
    let profit = npv_revenue - total_cost;
    let roi = if total_cost != 0.0 { profit / total_cost } else { 0.0 };
    let profit_margin = if npv_revenue != 0.0 {
        profit / npv_revenue
    } else {
        0.0
    };

    tracing::debug!(
        scenario = %scenario.name,
        construction_months,
        inflated_construction_cost,
        npv_revenue,
        profit,
        "scenario evaluated"
    );

    Ok(ScenarioResult {
        name: scenario.name.clone(),
        kind: scenario.kind,
        construction_months,
        total_months,
        monthly_inflation,
        monthly_appreciation,
        nominal_construction_cost,
        inflated_construction_cost,
        total_cost,
        price_per_area,
        future_revenue,
        npv_revenue,
        profit: finite("profit", profit)?,
        roi: finite("roi", roi)?,
        profit_margin: finite("profit_margin", profit_margin)?,
    })
}

/// Evaluates the optimistic, realistic and pessimistic presets against one baseline.
pub fn evaluate_standard_scenarios(
    baseline: &ScenarioBaseline,
    presets: &ScenarioPresets,
) -> Result<ScenarioSet> {
    let optimistic = evaluate_scenario(baseline, &presets.optimistic)?;
    let realistic = evaluate_scenario(baseline, &presets.realistic)?;
    let pessimistic = evaluate_scenario(baseline, &presets.pessimistic)?;

    let weights = [
        presets.optimistic.probability,
        presets.realistic.probability,
        presets.pessimistic.probability,
    ];
    let weight_total: f64 = weights.iter().sum();
    let expected_profit = if weight_total > 0.0 {
        (optimistic.profit * weights[0]
            + realistic.profit * weights[1]
            + pessimistic.profit * weights[2])
            / weight_total
    } else {
        realistic.profit
    };
    let profit_spread = optimistic.profit - pessimistic.profit;

    Ok(ScenarioSet {
        optimistic,
        realistic,
        pessimistic,
        expected_profit: finite("expected_profit", expected_profit)?,
        profit_spread: finite("profit_spread", profit_spread)?,
    })
}

fn validate_baseline(baseline: &ScenarioBaseline) -> Result<()> {
    let fields = [
        ("land_cost", baseline.land_cost),
        ("nominal_construction_cost", baseline.nominal_construction_cost),
        ("price_per_area", baseline.price_per_area),
        ("sellable_area", baseline.sellable_area),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(FeasibilityError::InvalidScenario(format!(
                "baseline `{}` must be finite and non-negative, got {}",
                field, value
            )));
        }
    }
    if baseline.construction_months == 0 {
        return Err(FeasibilityError::InvalidScenario(
            "baseline construction duration must be positive".into(),
        ));
    }
    let rates = [
        ("monthly_inflation", baseline.monthly_inflation),
        ("monthly_appreciation", baseline.monthly_appreciation),
        ("monthly_discount", baseline.monthly_discount),
    ];
    for (field, value) in rates {
        if !value.is_finite() || value <= -1.0 {
            return Err(FeasibilityError::InvalidScenario(format!(
                "baseline `{}` must be finite and above -100%, got {}",
                field, value
            )));
        }
    }
    Ok(())
}

fn validate_scenario(scenario: &ScenarioConfig) -> Result<()> {
    let multipliers = [
        ("cost_variance", scenario.cost_variance),
        ("sales_variance", scenario.sales_variance),
        ("timeline_variance", scenario.timeline_variance),
    ];
    for (field, value) in multipliers {
        if !value.is_finite() || value <= 0.0 {
            return Err(FeasibilityError::InvalidScenario(format!(
                "{}: `{}` must be a positive multiplier, got {}",
                scenario.name, field, value
            )));
        }
    }
    for (field, value) in [
        ("inflation_delta", scenario.inflation_delta),
        ("appreciation_delta", scenario.appreciation_delta),
        ("probability", scenario.probability),
    ] {
        if !value.is_finite() {
            return Err(FeasibilityError::InvalidScenario(format!(
                "{}: `{}` must be finite",
                scenario.name, field
            )));
        }
    }
    if scenario.probability < 0.0 {
        return Err(FeasibilityError::InvalidScenario(format!(
            "{}: probability cannot be negative",
            scenario.name
        )));
    }
    Ok(())
}

fn invalid_scenario(scenario: &ScenarioConfig, err: FeasibilityError) -> FeasibilityError {
    match err {
        FeasibilityError::InvalidTimelineInput(message) => {
            FeasibilityError::InvalidScenario(format!("{}: {}", scenario.name, message))
        }
        other => other,
    }
}

fn finite(field: &str, value: f64) -> Result<f64> {
    ensure_finite(STAGE, field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inflation::{annual_to_monthly, compound_factor};

    fn baseline() -> ScenarioBaseline {
        ScenarioBaseline {
            land_cost: 20_000_000.0,
            nominal_construction_cost: 60_000_000.0,
            price_per_area: 40_000.0,
            sellable_area: 3_500.0,
            construction_months: 20,
            sales_months: 6,
            monthly_inflation: annual_to_monthly(0.35),
            monthly_appreciation: annual_to_monthly(0.30),
            monthly_discount: annual_to_monthly(0.40),
        }
    }

    #[test]
    fn realistic_preset_reproduces_baseline_inputs() {
        let base = baseline();
        let result = evaluate_scenario(&base, &ScenarioConfig::realistic()).expect("realistic");
        assert_eq!(result.construction_months, 20);
        assert_eq!(result.total_months, 26);
        assert_eq!(result.nominal_construction_cost, base.nominal_construction_cost);
        let expected_cost =
            inflate_cost_uniform(60_000_000.0, 20, base.monthly_inflation).expect("inflate");
        assert_eq!(result.inflated_construction_cost, expected_cost);
        let expected_revenue = 3_500.0 * 40_000.0 * compound_factor(base.monthly_appreciation, 26)
            / compound_factor(base.monthly_discount, 26);
        assert!((result.npv_revenue - expected_revenue).abs() < 1e-3);
        assert!((result.profit - (result.npv_revenue - result.total_cost)).abs() < 1e-6);
    }

    #[test]
    fn duration_shift_is_rounded() {
        let base = baseline();
        let pessimistic =
            evaluate_scenario(&base, &ScenarioConfig::pessimistic()).expect("pessimistic");
        assert_eq!(pessimistic.construction_months, 24);
        let optimistic =
            evaluate_scenario(&base, &ScenarioConfig::optimistic()).expect("optimistic");
        assert_eq!(optimistic.construction_months, 18);
    }

    #[test]
    fn standard_set_is_ordered() {
        let set = evaluate_standard_scenarios(&baseline(), &ScenarioPresets::default())
            .expect("scenarios");
        assert!(set.pessimistic.profit <= set.realistic.profit);
        assert!(set.realistic.profit <= set.optimistic.profit);
        assert!(set.profit_spread >= 0.0);
        let expected = 0.25 * set.optimistic.profit
            + 0.5 * set.realistic.profit
            + 0.25 * set.pessimistic.profit;
        assert!((set.expected_profit - expected).abs() < 1e-3);
    }

    #[test]
    fn presets_can_be_overridden() {
        let mut presets = ScenarioPresets::default();
        presets.pessimistic.cost_variance = 2.0;
        let set = evaluate_standard_scenarios(&baseline(), &presets).expect("scenarios");
        let default_set = evaluate_standard_scenarios(&baseline(), &ScenarioPresets::default())
            .expect("scenarios");
        assert!(set.pessimistic.total_cost > default_set.pessimistic.total_cost);
    }

    #[test]
    fn rejects_non_positive_multipliers() {
        let mut scenario = ScenarioConfig::realistic();
        scenario.cost_variance = 0.0;
        let err = evaluate_scenario(&baseline(), &scenario).expect_err("invalid");
        assert!(matches!(err, FeasibilityError::InvalidScenario(_)));
    }

    #[test]
    fn inflation_delta_below_minus_one_is_a_scenario_error() {
        let mut scenario = ScenarioConfig::realistic();
        scenario.inflation_delta = -2.0;
        let err = evaluate_scenario(&baseline(), &scenario).expect_err("invalid");
        assert!(matches!(err, FeasibilityError::InvalidScenario(_)));
    }

    #[test]
    fn oversized_sales_period_is_a_scenario_error() {
        let base = ScenarioBaseline {
            sales_months: u32::MAX - 3,
            ..baseline()
        };
        let err = evaluate_scenario(&base, &ScenarioConfig::realistic()).expect_err("overflow");
        assert!(matches!(err, FeasibilityError::InvalidScenario(_)));
    }

    #[test]
    fn stretched_duration_beyond_horizon_is_a_scenario_error() {
        let mut scenario = ScenarioConfig::pessimistic();
        scenario.timeline_variance = 1e12;
        let err = evaluate_scenario(&baseline(), &scenario).expect_err("horizon");
        assert!(matches!(err, FeasibilityError::InvalidScenario(_)));

        scenario.timeline_variance = (MAX_TIMELINE_MONTHS - 6) as f64 / 20.0;
        let result = evaluate_scenario(&baseline(), &scenario).expect("at horizon");
        assert_eq!(result.total_months, MAX_TIMELINE_MONTHS);
    }
}

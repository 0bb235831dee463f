use crate::config::EngineConfig;
use crate::core::{
    cost::estimate_costs,
    scenario::evaluate_standard_scenarios,
    timeline::project_timeline,
    unit_mix::allocate_unit_mix_with,
    zoning::compute_zoning_with,
};
use crate::domain::{
    project::{FeasibilityReport, FeasibilityRequest, FeasibilitySummary, ReportWarning},
    scenario::ScenarioBaseline,
    timeline::ProjectTimeline,
    unit::UnitMixResult,
};
use crate::errors::{FeasibilityError, Result};

/// Runs zoning, unit mix, costs, timeline and scenarios in order.
pub struct FeasibilityService;

impl FeasibilityService {
    pub fn analyze(
        request: &FeasibilityRequest,
        config: &EngineConfig,
    ) -> Result<FeasibilityReport> {
        let zoning = compute_zoning_with(&request.zoning, &config.zoning)?;
        let mix_config = request.unit_mix.as_ref().unwrap_or(&config.unit_mix);
        let unit_mix = allocate_unit_mix_with(
            zoning.net_usable_area,
            Some(mix_config),
            &config.catalog,
            &config.unit_mix_rules,
        )?;
        let costs = estimate_costs(&zoning, &request.costs)?;
        let rates = request.rates.as_ref().unwrap_or(&config.rates);
        let timeline = project_timeline(
            costs.nominal_construction_cost,
            unit_mix.total_revenue,
            &request.timeline,
            rates,
        )?;
        let baseline = ScenarioBaseline::from_parts(&timeline, &costs, &unit_mix);
        let presets = request.scenarios.as_ref().unwrap_or(&config.scenarios);
        let scenarios = evaluate_standard_scenarios(&baseline, presets)?;

        let summary = summarize(&timeline, costs.land_cost)?;
        let warnings = collect_warnings(request, config, &unit_mix, &summary);

        tracing::info!(
            units = unit_mix.total_units,
            net_profit = summary.net_profit,
            roi = summary.roi,
            sale_month = summary.sale_month,
            "feasibility analysis complete"
        );

        Ok(FeasibilityReport {
            project_id: request.project_id,
            parcel: request.parcel.clone(),
            zoning,
            unit_mix,
            costs,
            timeline,
            scenarios,
            summary,
            warnings,
        })
    }
}

fn summarize(timeline: &ProjectTimeline, land_cost: f64) -> Result<FeasibilitySummary> {
    let row = timeline.optimal_sale().ok_or_else(|| {
        FeasibilityError::ArithmeticAnomaly(format!(
            "optimal sale month {} is missing from the projection",
            timeline.optimal_sale_month
        ))
    })?;
    let total_investment = land_cost + row.cumulative_cost;
    let projected_revenue = row.appreciated_value;
    let financing_cost = row.cumulative_interest;
    let net_profit = projected_revenue - total_investment - financing_cost;
    let roi = if total_investment > 0.0 {
        net_profit / total_investment
    } else {
        0.0
    };
    let profit_margin = if projected_revenue > 0.0 {
        net_profit / projected_revenue
    } else {
        0.0
    };
    Ok(FeasibilitySummary {
        sale_month: row.month,
        total_investment,
        projected_revenue,
        financing_cost,
        net_profit,
        roi,
        profit_margin,
    })
}

fn collect_warnings(
    request: &FeasibilityRequest,
    config: &EngineConfig,
    unit_mix: &UnitMixResult,
    summary: &FeasibilitySummary,
) -> Vec<ReportWarning> {
    let mut warnings: Vec<ReportWarning> = unit_mix
        .warnings
        .iter()
        .map(|warning| ReportWarning::UnitMix {
            message: warning.message(),
        })
        .collect();

    if let Some(as_of) = request.pricing_as_of {
        let age_days = (request.timeline.start_date - as_of).num_days();
        if age_days > config.pricing_staleness_days {
            tracing::warn!(%as_of, age_days, "pricing snapshot is stale");
            warnings.push(ReportWarning::StalePricing { as_of, age_days });
        }
    }

    if summary.net_profit < 0.0 {
        warnings.push(ReportWarning::Unprofitable {
            net_profit: summary.net_profit,
        });
    }
    warnings
}

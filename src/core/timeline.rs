use chrono::{Months, NaiveDate};

use crate::core::inflation::{compound_factor, to_monthly_rates};
use crate::core::s_curve::{s_curve, s_curve_delta};
use crate::domain::timeline::{
    MonthlyProjection, MonthlyRates, Phase, PhaseSchedule, ProjectTimeline, ProjectionRates,
    TimelineConfig, MAX_TIMELINE_MONTHS,
};
use crate::errors::{FeasibilityError, Result};
use crate::utils::ensure_finite;

const STAGE: &str = "timeline";
const BOUNDARY_EPSILON: f64 = 1e-9;

/// A construction phase: share of total cost and its window as fractions of the duration.
#[derive(Debug, Clone, Copy)]
pub struct PhaseSpec {
    pub phase: Phase,
    pub cost_weight: f64,
    pub start: f64,
    pub end: f64,
}

pub const CONSTRUCTION_PHASES: [PhaseSpec; 4] = [
    PhaseSpec {
        phase: Phase::Planning,
        cost_weight: 0.05,
        start: 0.0,
        end: 0.10,
    },
    PhaseSpec {
        phase: Phase::Foundation,
        cost_weight: 0.20,
        start: 0.10,
        end: 0.30,
    },
    PhaseSpec {
        phase: Phase::Structure,
        cost_weight: 0.45,
        start: 0.30,
        end: 0.75,
    },
    PhaseSpec {
        phase: Phase::Finishing,
        cost_weight: 0.30,
        start: 0.75,
        end: 1.0,
    },
];

/// Projects cost, value and profit month by month from project start to the end of sales.
pub fn project_timeline(
    total_nominal_cost: f64,
    total_nominal_revenue: f64,
    config: &TimelineConfig,
    rates: &ProjectionRates,
) -> Result<ProjectTimeline> {
    let total_months = validate_inputs(total_nominal_cost, total_nominal_revenue, config)?;
    let monthly_rates = to_monthly_rates(rates).map_err(|err| {
        tracing::warn!(%err, "rejected projection rates");
        err
    })?;

    let base_costs = distribute_cost(total_nominal_cost, config.construction_months);
    let phases = phase_schedule(total_nominal_cost, config.construction_months);

    let context = ProjectionContext {
        total_nominal_revenue,
        construction_months: config.construction_months,
        start_date: config.start_date,
        rates: monthly_rates,
    };
    let months = (0..=total_months).try_fold(
        Accumulator::default(),
        |acc, month| {
            let nominal_cost = if month == 0 {
                0.0
            } else {
                base_costs.get(month as usize - 1).copied().unwrap_or(0.0)
            };
            project_month(acc, month, nominal_cost, &context)
        },
    )?;
    let months = months.rows;

    let completion_month = config.construction_months;
    let optimal_sale_month = optimal_sale_month(&months, completion_month);
    let break_even_month = break_even_month(&months);
    let (total_inflated_cost, total_interest, end_date) = months
        .last()
        .map(|row| (row.cumulative_cost, row.cumulative_interest, row.date))
        .unwrap_or((0.0, 0.0, config.start_date));

    tracing::debug!(
        total_nominal_cost,
        total_inflated_cost,
        optimal_sale_month,
        break_even_month,
        "timeline projected"
    );

    Ok(ProjectTimeline {
        config: config.clone(),
        monthly_rates,
        phases,
        months,
        total_nominal_cost,
        total_nominal_revenue,
        total_inflated_cost,
        inflation_impact: total_inflated_cost - total_nominal_cost,
        total_interest,
        optimal_sale_month,
        break_even_month,
        completion_month,
        end_date,
    })
}

/// Returns the total month count once the inputs are known to be projectable.
fn validate_inputs(cost: f64, revenue: f64, config: &TimelineConfig) -> Result<u32> {
    let problem = if !cost.is_finite() || cost <= 0.0 {
        Some(format!("total nominal cost must be positive, got {}", cost))
    } else if !revenue.is_finite() || revenue < 0.0 {
        Some(format!(
            "total nominal revenue must be finite and non-negative, got {}",
            revenue
        ))
    } else if config.construction_months == 0 {
        Some("construction duration must be at least one month".to_string())
    } else if config.sales_months == 0 {
        Some("sales duration must be at least one month".to_string())
    } else {
        None
    };
    let total_months = config
        .total_months()
        .filter(|months| *months <= MAX_TIMELINE_MONTHS);
    match (problem, total_months) {
        (None, Some(total)) => Ok(total),
        (Some(message), _) => {
            tracing::warn!(%message, "rejected timeline input");
            Err(FeasibilityError::InvalidTimelineInput(message))
        }
        (None, None) => {
            let message = format!(
                "{} construction plus {} sales months exceeds the {} month horizon",
                config.construction_months, config.sales_months, MAX_TIMELINE_MONTHS
            );
            tracing::warn!(%message, "rejected timeline input");
            Err(FeasibilityError::InvalidTimelineInput(message))
        }
    }
}

/// Fraction of total construction cost spent in each construction month (1-based order).
///
/// Each phase spends its weight along its own S-curve; the result sums to one.
pub fn monthly_cost_shares(construction_months: u32) -> Vec<f64> {
    if construction_months == 0 {
        return Vec::new();
    }
    let duration = construction_months as f64;
    let raw: Vec<f64> = (1..=construction_months)
        .map(|month| {
            let from = (month - 1) as f64 / duration;
            let to = month as f64 / duration;
            CONSTRUCTION_PHASES
                .iter()
                .map(|spec| {
                    let low = from.max(spec.start);
                    let high = to.min(spec.end);
                    if high <= low {
                        return 0.0;
                    }
                    let span = spec.end - spec.start;
                    spec.cost_weight
                        * s_curve_delta((low - spec.start) / span, (high - spec.start) / span)
                })
                .sum()
        })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|share| share / total).collect()
}

/// Nominal cost per construction month; the final month absorbs rounding so the sum is exact.
fn distribute_cost(total: f64, construction_months: u32) -> Vec<f64> {
    let mut costs: Vec<f64> = monthly_cost_shares(construction_months)
        .into_iter()
        .map(|share| total * share)
        .collect();
    if let Some((last, rest)) = costs.split_last_mut() {
        let spent: f64 = rest.iter().sum();
        *last = total - spent;
    }
    costs
}

pub fn phase_schedule(total_cost: f64, construction_months: u32) -> Vec<PhaseSchedule> {
    let duration = construction_months as f64;
    CONSTRUCTION_PHASES
        .iter()
        .map(|spec| PhaseSchedule {
            phase: spec.phase,
            start_month: (spec.start * duration + BOUNDARY_EPSILON).floor() as u32 + 1,
            end_month: ((spec.end * duration - BOUNDARY_EPSILON).ceil() as u32)
                .clamp(1, construction_months.max(1)),
            cost_weight: spec.cost_weight,
            nominal_cost: total_cost * spec.cost_weight,
        })
        .collect()
}

/// Construction progress in percent at the end of `month`.
pub fn construction_progress(month: u32, construction_months: u32) -> f64 {
    if construction_months == 0 || month >= construction_months {
        return 100.0;
    }
    100.0 * s_curve(month as f64 / construction_months as f64)
}

fn phase_for_month(month: u32, construction_months: u32) -> Phase {
    if month == 0 {
        return Phase::Planning;
    }
    if month > construction_months {
        return Phase::Sales;
    }
    let midpoint = (month as f64 - 0.5) / construction_months as f64;
    CONSTRUCTION_PHASES
        .iter()
        .find(|spec| midpoint >= spec.start && midpoint < spec.end)
        .map(|spec| spec.phase)
        .unwrap_or(Phase::Finishing)
}

struct ProjectionContext {
    total_nominal_revenue: f64,
    construction_months: u32,
    start_date: NaiveDate,
    rates: MonthlyRates,
}

#[derive(Debug, Default)]
struct Accumulator {
    cumulative_cost: f64,
    cumulative_interest: f64,
    rows: Vec<MonthlyProjection>,
}

fn project_month(
    acc: Accumulator,
    month: u32,
    nominal_cost: f64,
    ctx: &ProjectionContext,
) -> Result<Accumulator> {
    let date = ctx
        .start_date
        .checked_add_months(Months::new(month))
        .ok_or_else(|| {
            FeasibilityError::InvalidTimelineInput(format!(
                "month {} after {} is outside the calendar",
                month, ctx.start_date
            ))
        })?;

    let cost_this_month = finite(
        "cost_this_month",
        nominal_cost * compound_factor(ctx.rates.cost_inflation, month),
    )?;
    let cumulative_cost = finite("cumulative_cost", acc.cumulative_cost + cost_this_month)?;
    let interest_cost = finite("interest_cost", cumulative_cost * ctx.rates.interest)?;
    let cumulative_interest = finite(
        "cumulative_interest",
        acc.cumulative_interest + interest_cost,
    )?;

    let progress = construction_progress(month, ctx.construction_months);
    let property_value = ctx.total_nominal_revenue * (progress / 100.0);
    let appreciated_value = finite(
        "appreciated_value",
        property_value * compound_factor(ctx.rates.appreciation, month),
    )?;

    let gross_profit = appreciated_value - cumulative_cost;
    let net_profit = gross_profit - cumulative_interest;
    let profit_margin = if appreciated_value != 0.0 {
        gross_profit / appreciated_value
    } else {
        0.0
    };
    let roi = if cumulative_cost != 0.0 {
        net_profit / cumulative_cost
    } else {
        0.0
    };

    let mut rows = acc.rows;
    rows.push(MonthlyProjection {
        month,
        date,
        phase: phase_for_month(month, ctx.construction_months),
        progress,
        nominal_cost,
        cost_this_month,
        cumulative_cost,
        interest_cost,
        cumulative_interest,
        property_value,
        appreciated_value,
        gross_profit: finite("gross_profit", gross_profit)?,
        net_profit: finite("net_profit", net_profit)?,
        profit_margin: finite("profit_margin", profit_margin)?,
        roi: finite("roi", roi)?,
    });
    Ok(Accumulator {
        cumulative_cost,
        cumulative_interest,
        rows,
    })
}

fn optimal_sale_month(months: &[MonthlyProjection], completion_month: u32) -> u32 {
    months
        .iter()
        .filter(|row| row.month >= completion_month)
        .fold(None::<&MonthlyProjection>, |best, row| match best {
            Some(current) if row.roi <= current.roi => Some(current),
            _ => Some(row),
        })
        .map(|row| row.month)
        .unwrap_or(completion_month)
}

fn break_even_month(months: &[MonthlyProjection]) -> u32 {
    months
        .iter()
        .find(|row| row.gross_profit > 0.0)
        .or_else(|| months.last())
        .map(|row| row.month)
        .unwrap_or(0)
}

fn finite(field: &str, value: f64) -> Result<f64> {
    ensure_finite(STAGE, field, value)
}

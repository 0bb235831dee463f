use std::collections::BTreeMap;

use crate::domain::unit::{
    AllocationStrategy, UnitAllocation, UnitMixConfig, UnitMixResult, UnitMixRules,
    UnitMixWarning, UnitType,
};
use crate::errors::{FeasibilityError, Result};
use crate::utils::ensure_finite;

const STAGE: &str = "unit_mix";
const CUSTOM_STRATEGY: &str = "custom";

/// Named ratio presets tried by revenue optimization.
#[derive(Debug, Clone, Copy)]
pub struct MixTemplate {
    pub name: &'static str,
    pub ratios: &'static [(&'static str, f64)],
}

pub const MIX_TEMPLATES: [MixTemplate; 4] = [
    MixTemplate {
        name: "family",
        ratios: &[("2+1", 0.30), ("3+1", 0.45), ("4+1", 0.25)],
    },
    MixTemplate {
        name: "investment",
        ratios: &[("1+0", 0.20), ("1+1", 0.50), ("2+1", 0.30)],
    },
    MixTemplate {
        name: "luxury",
        ratios: &[("3+1", 0.35), ("4+1", 0.40), ("5+1", 0.25)],
    },
    MixTemplate {
        name: "balanced",
        ratios: &[("1+1", 0.25), ("2+1", 0.35), ("3+1", 0.30), ("4+1", 0.10)],
    },
];

/// Splits `net_area` into unit counts with the default rules.
///
/// `None` uses [`UnitMixConfig::default`]. The config's strategy decides whether the
/// ratios are packed as given or the revenue templates are tried.
pub fn allocate_unit_mix(
    net_area: f64,
    config: Option<&UnitMixConfig>,
    catalog: &[UnitType],
) -> Result<UnitMixResult> {
    allocate_unit_mix_with(net_area, config, catalog, &UnitMixRules::default())
}

pub fn allocate_unit_mix_with(
    net_area: f64,
    config: Option<&UnitMixConfig>,
    catalog: &[UnitType],
    rules: &UnitMixRules,
) -> Result<UnitMixResult> {
    let fallback = UnitMixConfig::default();
    let config = config.unwrap_or(&fallback);
    match config.strategy {
        AllocationStrategy::Ratio => {
            validate_area(net_area)?;
            allocate_by_ratio(net_area, config, catalog, rules, CUSTOM_STRATEGY)
        }
        AllocationStrategy::OptimizeRevenue => {
            optimize_unit_mix_with(net_area, config, catalog, rules)
        }
    }
}

/// Picks the template with the highest revenue among sufficiently utilized mixes.
pub fn optimize_unit_mix(
    net_area: f64,
    config: &UnitMixConfig,
    catalog: &[UnitType],
) -> Result<UnitMixResult> {
    optimize_unit_mix_with(net_area, config, catalog, &UnitMixRules::default())
}

pub fn optimize_unit_mix_with(
    net_area: f64,
    config: &UnitMixConfig,
    catalog: &[UnitType],
    rules: &UnitMixRules,
) -> Result<UnitMixResult> {
    validate_area(net_area)?;

    let mut best: Option<UnitMixResult> = None;
    for template in MIX_TEMPLATES.iter() {
        let candidate = allocate_by_ratio(
            net_area,
            &config.with_ratios(template.ratios),
            catalog,
            rules,
            template.name,
        )?;
        tracing::debug!(
            template = template.name,
            revenue = candidate.total_revenue,
            utilization = candidate.utilization,
            "evaluated mix template"
        );
        if candidate.utilization <= rules.optimization_utilization_floor {
            continue;
        }
        let better = best
            .as_ref()
            .map_or(true, |current| candidate.total_revenue > current.total_revenue);
        if better {
            best = Some(candidate);
        }
    }

    match best {
        Some(result) => Ok(result),
        None => {
            tracing::info!("no template reached the utilization floor; using caller ratios");
            allocate_by_ratio(net_area, config, catalog, rules, CUSTOM_STRATEGY)
        }
    }
}

fn validate_area(net_area: f64) -> Result<()> {
    if net_area.is_finite() && net_area > 0.0 {
        Ok(())
    } else {
        tracing::warn!(net_area, "rejected net area");
        Err(FeasibilityError::InvalidArea(format!(
            "net area must be a positive finite number, got {}",
            net_area
        )))
    }
}

/// One unit type, sized and bounded, waiting to be packed.
#[derive(Debug, Clone)]
struct PlannedType<'a> {
    unit: &'a UnitType,
    ratio: f64,
    size: f64,
    price_per_area: f64,
    target_count: u32,
    max_count: u32,
}

/// Accumulator threaded through the greedy packing fold.
#[derive(Debug, Clone)]
struct PackingState {
    remaining: f64,
    rows: Vec<UnitAllocation>,
}

fn allocate_by_ratio(
    net_area: f64,
    config: &UnitMixConfig,
    catalog: &[UnitType],
    rules: &UnitMixRules,
    strategy: &str,
) -> Result<UnitMixResult> {
    let plans = plan_types(net_area, config, catalog, rules)?;
    let packed = plans.iter().fold(
        PackingState {
            remaining: net_area,
            rows: Vec::with_capacity(plans.len()),
        },
        pack_step,
    );
    summarize(net_area, strategy, packed.rows, rules)
}

fn plan_types<'a>(
    net_area: f64,
    config: &UnitMixConfig,
    catalog: &'a [UnitType],
    rules: &UnitMixRules,
) -> Result<Vec<PlannedType<'a>>> {
    for (code, ratio) in &config.ratios {
        if !ratio.is_finite() || *ratio < 0.0 {
            return Err(FeasibilityError::Configuration(format!(
                "ratio for `{}` must be a finite non-negative number, got {}",
                code, ratio
            )));
        }
        if !catalog.iter().any(|unit| &unit.code == code) {
            tracing::warn!(code = %code, "ratio refers to a unit type missing from the catalog");
        }
    }

    let weight_total: f64 = catalog
        .iter()
        .filter_map(|unit| config.ratios.get(&unit.code))
        .filter(|ratio| **ratio > 0.0)
        .sum();
    if weight_total <= 0.0 {
        return Ok(Vec::new());
    }

    let mut plans = Vec::new();
    for unit in catalog {
        let ratio = match config.ratios.get(&unit.code) {
            Some(ratio) if *ratio > 0.0 => *ratio / weight_total,
            _ => continue,
        };
        let size = unit_size(unit, &config.preferred_sizes)?;
        let price_per_area = config
            .price_overrides
            .get(&unit.code)
            .copied()
            .unwrap_or(unit.price_per_area);
        if !price_per_area.is_finite() || price_per_area < 0.0 {
            return Err(FeasibilityError::Configuration(format!(
                "price per area for `{}` must be finite and non-negative, got {}",
                unit.code, price_per_area
            )));
        }
        if !unit.net_to_gross_multiplier.is_finite() || unit.net_to_gross_multiplier < 1.0 {
            return Err(FeasibilityError::Configuration(format!(
                "net-to-gross multiplier for `{}` must be at least 1.0, got {}",
                unit.code, unit.net_to_gross_multiplier
            )));
        }

        let min_count = config
            .min_units
            .get(&unit.code)
            .copied()
            .unwrap_or(rules.min_units_per_type);
        let max_count = config
            .max_units
            .get(&unit.code)
            .copied()
            .unwrap_or(rules.max_units_per_type);
        if min_count > max_count {
            return Err(FeasibilityError::Configuration(format!(
                "minimum unit count {} exceeds maximum {} for `{}`",
                min_count, max_count, unit.code
            )));
        }

        let target_area = net_area * ratio;
        let raw_count = (target_area / size).floor().max(0.0);
        let target_count = (raw_count.min(u32::MAX as f64) as u32).clamp(min_count, max_count);

        plans.push(PlannedType {
            unit,
            ratio,
            size,
            price_per_area,
            target_count,
            max_count,
        });
    }

    // Stable sort: catalog order breaks ties between equal ratios.
    plans.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    Ok(plans)
}

fn unit_size(unit: &UnitType, preferred: &BTreeMap<String, f64>) -> Result<f64> {
    if !unit.typical_net_area.is_finite() || unit.typical_net_area <= 0.0 {
        return Err(FeasibilityError::Configuration(format!(
            "typical net area for `{}` must be positive, got {}",
            unit.code, unit.typical_net_area
        )));
    }
    match preferred.get(&unit.code) {
        None => Ok(unit.typical_net_area),
        Some(size) if size.is_finite() && *size > 0.0 => {
            let low = unit.min_net_area.min(unit.max_net_area);
            let high = unit.max_net_area.max(unit.min_net_area);
            Ok(if low > 0.0 { size.clamp(low, high) } else { *size })
        }
        Some(size) => Err(FeasibilityError::Configuration(format!(
            "preferred size for `{}` must be positive, got {}",
            unit.code, size
        ))),
    }
}

fn pack_step(state: PackingState, plan: &PlannedType<'_>) -> PackingState {
    let fits = (state.remaining / plan.size).floor().max(0.0);
    let mut count = plan
        .target_count
        .min(plan.max_count)
        .min(fits.min(u32::MAX as f64) as u32);
    while count > 0 && count as f64 * plan.size > state.remaining {
        count -= 1;
    }
    if count == 0 {
        return state;
    }

    let gross_area = plan.size * plan.unit.net_to_gross_multiplier;
    let mut rows = state.rows;
    rows.push(UnitAllocation {
        code: plan.unit.code.clone(),
        net_area: plan.size,
        gross_area,
        price_per_area: plan.price_per_area,
        unit_price: gross_area * plan.price_per_area,
        count,
    });
    PackingState {
        remaining: state.remaining - count as f64 * plan.size,
        rows,
    }
}

fn summarize(
    net_area: f64,
    strategy: &str,
    allocations: Vec<UnitAllocation>,
    rules: &UnitMixRules,
) -> Result<UnitMixResult> {
    let total_units: u32 = allocations.iter().map(|row| row.count).sum();
    let total_net_area = finite(
        "total_net_area",
        allocations.iter().map(UnitAllocation::total_net_area).sum(),
    )?;
    let total_gross_area = finite(
        "total_gross_area",
        allocations.iter().map(UnitAllocation::total_gross_area).sum(),
    )?;
    let total_revenue = finite(
        "total_revenue",
        allocations.iter().map(UnitAllocation::revenue).sum(),
    )?;
    let (average_unit_size, average_unit_price) = if total_units > 0 {
        (
            total_net_area / total_units as f64,
            total_revenue / total_units as f64,
        )
    } else {
        (0.0, 0.0)
    };
    let utilization = finite("utilization", total_net_area / net_area)?;
    let diversity = allocations.len();
    let leftover_area = (net_area - total_net_area).max(0.0);

    let mut warnings = Vec::new();
    if utilization < rules.low_utilization_threshold {
        warnings.push(UnitMixWarning::LowUtilization { utilization });
    }
    if diversity < rules.min_distinct_types {
        warnings.push(UnitMixWarning::LowDiversity {
            distinct_types: diversity,
        });
    }
    if total_units < rules.min_total_units {
        warnings.push(UnitMixWarning::UneconomicalScale {
            total_units,
            minimum: rules.min_total_units,
        });
    }
    if leftover_area > rules.leftover_area_threshold {
        warnings.push(UnitMixWarning::UnallocatedArea {
            area: leftover_area,
        });
    }
    for warning in &warnings {
        tracing::warn!(strategy, "{}", warning.message());
    }

    tracing::debug!(
        strategy,
        total_units,
        total_revenue,
        utilization,
        "unit mix allocated"
    );

    Ok(UnitMixResult {
        strategy: strategy.to_string(),
        allocations,
        available_net_area: net_area,
        total_units,
        total_net_area,
        total_gross_area,
        total_revenue,
        average_unit_size,
        average_unit_price,
        utilization,
        diversity,
        leftover_area,
        warnings,
    })
}

fn finite(field: &str, value: f64) -> Result<f64> {
    ensure_finite(STAGE, field, value)
}

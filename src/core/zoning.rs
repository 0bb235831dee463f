use crate::domain::zoning::{AppliedCoefficients, ZoningParams, ZoningResult, ZoningRules};
use crate::errors::{FeasibilityError, Result};
use crate::utils::ensure_finite;

const STAGE: &str = "zoning";

/// Absorbs binary rounding in ratios such as 0.6 / 0.3 before flooring.
const FLOOR_EPSILON: f64 = 1e-9;

/// Derives buildable areas and floor count using the default zoning rules.
pub fn compute_zoning(params: &ZoningParams) -> Result<ZoningResult> {
    compute_zoning_with(params, &ZoningRules::default())
}

pub fn compute_zoning_with(params: &ZoningParams, rules: &ZoningRules) -> Result<ZoningResult> {
    validate_rules(rules)?;
    let applied = validate_params(params, rules)?;

    let ground_coverage_area = finite("ground_coverage_area", params.parcel_area * applied.taks)?;
    let total_construction_area = finite(
        "total_construction_area",
        params.parcel_area * applied.kaks * applied.projection_coefficient,
    )?;

    let floors_by_kaks = if applied.taks > 0.0 {
        whole_floors(applied.kaks / applied.taks)
    } else {
        0
    };
    let mut floor_count = floors_by_kaks;

    let floors_by_height = params
        .max_height
        .map(|height| whole_floors(height / applied.typical_floor_height));
    let mut height_limited = false;
    if let Some(by_height) = floors_by_height {
        if by_height < floor_count {
            height_limited = true;
            floor_count = by_height;
        }
    }

    let mut floor_limited = false;
    if let Some(max_floors) = params.max_floors {
        if max_floors < floor_count {
            floor_limited = true;
            floor_count = max_floors;
        }
    }

    let exempt_area_ceiling = finite(
        "exempt_area_ceiling",
        total_construction_area * applied.exempt_area_ratio,
    )?;
    let gross_usable_area = finite(
        "gross_usable_area",
        total_construction_area - exempt_area_ceiling,
    )?;
    let net_usable_area = finite(
        "net_usable_area",
        gross_usable_area * applied.net_to_gross_ratio,
    )?;

    tracing::debug!(
        parcel_area = params.parcel_area,
        total_construction_area,
        net_usable_area,
        floor_count,
        height_limited,
        floor_limited,
        "zoning computed"
    );

    Ok(ZoningResult {
        parcel_area: params.parcel_area,
        ground_coverage_area,
        total_construction_area,
        floor_count,
        floors_by_kaks,
        floors_by_height,
        height_limited,
        floor_limited,
        exempt_area_ceiling,
        gross_usable_area,
        net_usable_area,
        applied,
    })
}

/// Parcel area needed to reach `target_construction_area` under the given coefficients.
pub fn required_parcel_area(
    target_construction_area: f64,
    kaks: f64,
    projection_coefficient: f64,
) -> Result<f64> {
    if !target_construction_area.is_finite() || target_construction_area < 0.0 {
        return Err(FeasibilityError::InvalidArea(format!(
            "target construction area must be a finite non-negative number, got {}",
            target_construction_area
        )));
    }
    if !kaks.is_finite() || kaks <= 0.0 {
        return Err(FeasibilityError::Configuration(format!(
            "kaks must be positive to size a parcel, got {}",
            kaks
        )));
    }
    if !projection_coefficient.is_finite() || projection_coefficient <= 0.0 {
        return Err(FeasibilityError::Configuration(format!(
            "projection coefficient must be positive to size a parcel, got {}",
            projection_coefficient
        )));
    }
    finite(
        "required_parcel_area",
        target_construction_area / (kaks * projection_coefficient),
    )
}

fn whole_floors(ratio: f64) -> u32 {
    (ratio + FLOOR_EPSILON).floor().max(0.0) as u32
}

fn finite(field: &str, value: f64) -> Result<f64> {
    ensure_finite(STAGE, field, value)
}

fn invalid(message: String) -> FeasibilityError {
    tracing::warn!(%message, "rejected zoning parameters");
    FeasibilityError::InvalidZoningParameters(message)
}

fn validate_rules(rules: &ZoningRules) -> Result<()> {
    if !rules.typical_floor_height.is_finite() || rules.typical_floor_height <= 0.0 {
        return Err(FeasibilityError::Configuration(format!(
            "typical floor height must be positive, got {}",
            rules.typical_floor_height
        )));
    }
    if !rules.max_kaks.is_finite() || rules.max_kaks <= 0.0 {
        return Err(FeasibilityError::Configuration(format!(
            "kaks ceiling must be positive, got {}",
            rules.max_kaks
        )));
    }
    Ok(())
}

fn validate_params(params: &ZoningParams, rules: &ZoningRules) -> Result<AppliedCoefficients> {
    if !params.parcel_area.is_finite() || params.parcel_area <= 0.0 {
        return Err(invalid(format!(
            "parcel area must be a positive finite number, got {}",
            params.parcel_area
        )));
    }
    if !params.taks.is_finite() || !(0.0..=1.0).contains(&params.taks) {
        return Err(invalid(format!(
            "taks must lie within [0, 1], got {}",
            params.taks
        )));
    }
    if !params.kaks.is_finite() || params.kaks < 0.0 {
        return Err(invalid(format!(
            "kaks must be a finite non-negative number, got {}",
            params.kaks
        )));
    }
    if params.kaks > rules.max_kaks {
        return Err(invalid(format!(
            "kaks {} exceeds the ceiling of {}",
            params.kaks, rules.max_kaks
        )));
    }
    if !params.projection_coefficient.is_finite() || params.projection_coefficient < 1.0 {
        return Err(invalid(format!(
            "projection coefficient must be at least 1.0, got {}",
            params.projection_coefficient
        )));
    }
    if let Some(height) = params.max_height {
        if !height.is_finite() || height <= 0.0 {
            return Err(invalid(format!(
                "maximum height must be positive, got {}",
                height
            )));
        }
    }
    if params.max_floors == Some(0) {
        return Err(invalid("maximum floors must be positive".into()));
    }

    let net_to_gross_ratio = params
        .net_to_gross_ratio
        .unwrap_or(rules.default_net_to_gross_ratio);
    if !net_to_gross_ratio.is_finite() || net_to_gross_ratio <= 0.0 || net_to_gross_ratio > 1.0 {
        return Err(invalid(format!(
            "net-to-gross ratio must lie within (0, 1], got {}",
            net_to_gross_ratio
        )));
    }
    let exempt_area_ratio = params
        .exempt_area_ratio
        .unwrap_or(rules.default_exempt_area_ratio);
    if !exempt_area_ratio.is_finite() || !(0.0..=1.0).contains(&exempt_area_ratio) {
        return Err(invalid(format!(
            "exempt area ratio must lie within [0, 1], got {}",
            exempt_area_ratio
        )));
    }

    Ok(AppliedCoefficients {
        taks: params.taks,
        kaks: params.kaks,
        projection_coefficient: params.projection_coefficient,
        net_to_gross_ratio,
        exempt_area_ratio,
        typical_floor_height: rules.typical_floor_height,
    })
}

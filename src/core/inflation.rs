use crate::domain::timeline::{MonthlyRates, ProjectionRates, MAX_TIMELINE_MONTHS};
use crate::errors::{FeasibilityError, Result};
use crate::utils::ensure_finite;

const STAGE: &str = "inflation";

/// Converts an annual rate to the equivalent compound monthly rate.
pub fn annual_to_monthly(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Converts a monthly rate back to its compound annual equivalent.
pub fn monthly_to_annual(monthly: f64) -> f64 {
    (1.0 + monthly).powi(12) - 1.0
}

/// Growth multiplier after compounding `monthly_rate` for `months` months.
pub fn compound_factor(monthly_rate: f64, months: u32) -> f64 {
    match i32::try_from(months) {
        Ok(exponent) => (1.0 + monthly_rate).powi(exponent),
        Err(_) => (1.0 + monthly_rate).powf(f64::from(months)),
    }
}

pub fn future_value(present: f64, monthly_rate: f64, months: u32) -> f64 {
    present * compound_factor(monthly_rate, months)
}

pub fn present_value(future: f64, monthly_discount: f64, months: u32) -> f64 {
    future / compound_factor(monthly_discount, months)
}

/// Normalizes caller-supplied annual rates into the monthly rates used everywhere else.
pub fn to_monthly_rates(rates: &ProjectionRates) -> Result<MonthlyRates> {
    let checked = [
        ("annual_cost_inflation", rates.annual_cost_inflation),
        ("annual_appreciation", rates.annual_appreciation),
        ("annual_interest", rates.annual_interest),
        ("annual_discount", rates.annual_discount),
    ];
    for (field, value) in checked {
        validate_rate(field, value)?;
    }
    Ok(MonthlyRates {
        cost_inflation: annual_to_monthly(rates.annual_cost_inflation),
        appreciation: annual_to_monthly(rates.annual_appreciation),
        interest: annual_to_monthly(rates.annual_interest),
        discount: annual_to_monthly(rates.annual_discount),
    })
}

/// Spends `nominal` evenly over `months` months and compounds each payment from project start.
///
/// Month `m` (1-based) costs `nominal / months × (1 + rate)^m`.
pub fn inflate_cost_uniform(nominal: f64, months: u32, monthly_rate: f64) -> Result<f64> {
    if months == 0 {
        return Err(FeasibilityError::InvalidTimelineInput(
            "cannot spread cost over zero months".into(),
        ));
    }
    if months > MAX_TIMELINE_MONTHS {
        return Err(FeasibilityError::InvalidTimelineInput(format!(
            "cannot spread cost over {} months, the horizon is {}",
            months, MAX_TIMELINE_MONTHS
        )));
    }
    validate_rate("monthly_inflation", monthly_rate)?;
    let installment = nominal / months as f64;
    let total = (1..=months)
        .map(|month| installment * compound_factor(monthly_rate, month))
        .sum();
    ensure_finite(STAGE, "inflated_cost", total)
}

fn validate_rate(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > -1.0 {
        Ok(())
    } else {
        tracing::warn!(field, value, "rejected rate");
        Err(FeasibilityError::InvalidTimelineInput(format!(
            "`{}` must be finite and greater than -100%, got {}",
            field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_conversion_compounds_back_to_annual() {
        for annual in [-0.5, -0.02, 0.0, 0.1, 0.35, 0.65, 1.2] {
            let round_trip = monthly_to_annual(annual_to_monthly(annual));
            assert!((round_trip - annual).abs() < 1e-12, "annual {annual}");
        }
    }

    #[test]
    fn twelve_percent_is_not_one_percent_monthly() {
        let monthly = annual_to_monthly(0.12);
        assert!(monthly < 0.01);
        assert!((monthly - 0.009_488_793).abs() < 1e-9);
    }

    #[test]
    fn negative_rates_are_kept() {
        let rates = ProjectionRates {
            annual_cost_inflation: -0.05,
            annual_appreciation: -0.10,
            annual_interest: 0.0,
            annual_discount: 0.0,
        };
        let monthly = to_monthly_rates(&rates).expect("valid");
        assert!(monthly.cost_inflation < 0.0);
        assert!(monthly.appreciation < 0.0);
    }

    #[test]
    fn rates_at_or_below_minus_one_are_rejected() {
        let rates = ProjectionRates {
            annual_cost_inflation: -1.0,
            ..ProjectionRates::default()
        };
        assert!(matches!(
            to_monthly_rates(&rates),
            Err(FeasibilityError::InvalidTimelineInput(_))
        ));
    }

    #[test]
    fn uniform_inflation_matches_closed_form() {
        let inflated = inflate_cost_uniform(1200.0, 12, 0.01).expect("valid");
        let expected: f64 = (1..=12).map(|m| 100.0 * 1.01f64.powi(m)).sum();
        assert!((inflated - expected).abs() < 1e-9);
        let flat = inflate_cost_uniform(1200.0, 12, 0.0).expect("valid");
        assert!((flat - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn present_value_undoes_future_value() {
        let future = future_value(1000.0, 0.02, 24);
        assert!((present_value(future, 0.02, 24) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn compound_factor_keeps_huge_exponents_positive() {
        let months = i32::MAX as u32 + 10;
        assert_eq!(compound_factor(0.0, months), 1.0);
        assert!(compound_factor(0.01, months) > 1.0);
        assert!(compound_factor(-0.01, months) < 1.0);
    }

    #[test]
    fn uniform_inflation_rejects_months_beyond_horizon() {
        assert!(inflate_cost_uniform(1200.0, MAX_TIMELINE_MONTHS, 0.01).is_ok());
        let err = inflate_cost_uniform(1200.0, u32::MAX, 0.01).expect_err("too long");
        assert!(matches!(err, FeasibilityError::InvalidTimelineInput(_)));
    }
}

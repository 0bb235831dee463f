use chrono::NaiveDate;
use feasibility_core::{
    annual_to_monthly,
    core::{
        inflation::compound_factor,
        timeline::{monthly_cost_shares, phase_schedule},
    },
    domain::{timeline::MAX_TIMELINE_MONTHS, Phase, ProjectionRates, TimelineConfig},
    monthly_to_annual, project_timeline, FeasibilityError,
};
use insta::assert_snapshot;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
}

#[test]
fn cumulative_series_are_non_decreasing() {
    let config = TimelineConfig::new(24, 12, start());
    let timeline =
        project_timeline(80_000_000.0, 140_000_000.0, &config, &ProjectionRates::default())
            .expect("timeline");
    for pair in timeline.months.windows(2) {
        assert!(pair[1].cumulative_cost >= pair[0].cumulative_cost);
        assert!(pair[1].cumulative_interest >= pair[0].cumulative_interest);
        assert!(pair[1].progress >= pair[0].progress);
    }
    assert_eq!(timeline.months.len(), 37);
    assert_eq!(timeline.completion_month, 24);
}

#[test]
fn zero_rates_leave_values_undrifted() {
    let config = TimelineConfig::new(12, 6, start());
    let timeline = project_timeline(1_000_000.0, 1_500_000.0, &config, &ProjectionRates::zero())
        .expect("timeline");
    for row in &timeline.months {
        assert_eq!(row.appreciated_value, row.property_value);
        assert_eq!(row.cost_this_month, row.nominal_cost);
        assert_eq!(row.interest_cost, 0.0);
    }
    let last = timeline.final_month().expect("last");
    assert_eq!(last.appreciated_value, 1_500_000.0);
    assert!((timeline.inflation_impact).abs() < 1e-6);
}

#[test]
fn negative_rates_propagate_unclamped() {
    let rates = ProjectionRates {
        annual_cost_inflation: -0.10,
        annual_appreciation: -0.20,
        annual_interest: 0.0,
        annual_discount: 0.0,
    };
    let config = TimelineConfig::new(10, 5, start());
    let timeline = project_timeline(1_000_000.0, 2_000_000.0, &config, &rates).expect("timeline");
    assert!(timeline.monthly_rates.cost_inflation < 0.0);
    assert!(timeline.inflation_impact < 0.0);
    for row in &timeline.months {
        let expected =
            row.nominal_cost * compound_factor(timeline.monthly_rates.cost_inflation, row.month);
        assert_eq!(row.cost_this_month, expected);
    }
    let last = timeline.final_month().expect("last");
    assert!(last.appreciated_value < 2_000_000.0);
}

#[test]
fn break_even_is_first_positive_gross_profit() {
    let config = TimelineConfig::new(18, 6, start());
    let timeline =
        project_timeline(50_000_000.0, 120_000_000.0, &config, &ProjectionRates::default())
            .expect("timeline");
    let month = timeline.break_even_month as usize;
    assert!(timeline.months[month].gross_profit > 0.0);
    assert!(timeline.months[..month].iter().all(|row| row.gross_profit <= 0.0));
}

#[test]
fn sales_months_are_tagged_and_complete() {
    let config = TimelineConfig::new(12, 3, start());
    let timeline =
        project_timeline(1_000.0, 2_000.0, &config, &ProjectionRates::default()).expect("timeline");
    for row in timeline.months.iter().skip(13) {
        assert_eq!(row.phase, Phase::Sales);
        assert_eq!(row.progress, 100.0);
        assert_eq!(row.nominal_cost, 0.0);
    }
}

#[test]
fn phase_schedule_for_twenty_months() {
    let rendered = phase_schedule(1_000.0, 20)
        .iter()
        .map(|p| {
            format!(
                "{} {}-{} {:.0}",
                p.phase.label(),
                p.start_month,
                p.end_month,
                p.nominal_cost
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    assert_snapshot!(rendered, @r"
    planning 1-2 50
    foundation 3-6 200
    structure 7-15 450
    finishing 16-20 300
    ");
}

#[test]
fn spending_is_slow_fast_slow_within_phases() {
    let shares = monthly_cost_shares(40);
    assert_eq!(shares.len(), 40);
    // Structure covers months 13..=30, finishing months 31..=40.
    let month = |m: usize| shares[m - 1];
    assert!(month(21) > month(13));
    assert!(month(21) > month(30));
    assert!(month(35) > month(31));
    assert!(month(35) > month(40));
}

#[test]
fn annual_monthly_round_trip() {
    let mut x = -0.5;
    while x < 3.0 {
        assert!((annual_to_monthly(monthly_to_annual(x)) - x).abs() < 1e-10, "x = {x}");
        x += 0.0137;
    }
}

#[test]
fn rejects_rates_at_minus_one_hundred_percent() {
    let rates = ProjectionRates {
        annual_appreciation: -1.5,
        ..ProjectionRates::default()
    };
    let err = project_timeline(1_000.0, 2_000.0, &TimelineConfig::new(12, 3, start()), &rates)
        .expect_err("rate below -100%");
    assert!(matches!(err, FeasibilityError::InvalidTimelineInput(_)));
}

#[test]
fn rejects_durations_beyond_the_horizon() {
    let rates = ProjectionRates::zero();
    let overflowing = TimelineConfig::new(10, u32::MAX - 3, start());
    let err = project_timeline(1_000.0, 2_000.0, &overflowing, &rates).expect_err("overflow");
    assert!(matches!(err, FeasibilityError::InvalidTimelineInput(_)));

    let too_long = TimelineConfig::new(480, MAX_TIMELINE_MONTHS - 479, start());
    let err = project_timeline(1_000.0, 2_000.0, &too_long, &rates).expect_err("horizon");
    assert!(err.to_string().contains("horizon"));

    let longest = TimelineConfig::new(480, MAX_TIMELINE_MONTHS - 480, start());
    let timeline = project_timeline(1_000.0, 2_000.0, &longest, &rates).expect("at horizon");
    assert_eq!(timeline.months.len() as u32, MAX_TIMELINE_MONTHS + 1);
}

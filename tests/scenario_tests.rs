mod common;

use feasibility_core::{
    analyze_feasibility,
    core::{inflation::inflate_cost_uniform, timeline::project_timeline},
    domain::{ScenarioBaseline, ScenarioConfig, ScenarioKind, ScenarioPresets},
    evaluate_scenario, evaluate_standard_scenarios,
};

#[test]
fn default_presets_order_profits() {
    let report = analyze_feasibility(&common::sample_request()).expect("analysis");
    let set = &report.scenarios;
    assert!(set.realistic.profit > 0.0, "baseline should be profitable");
    assert!(set.pessimistic.profit <= set.realistic.profit);
    assert!(set.realistic.profit <= set.optimistic.profit);
    let kinds: Vec<ScenarioKind> = set.iter().map(|result| result.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ScenarioKind::Optimistic,
            ScenarioKind::Realistic,
            ScenarioKind::Pessimistic
        ]
    );
}

#[test]
fn scenario_inflation_ignores_phase_distribution() {
    let report = analyze_feasibility(&common::sample_request()).expect("analysis");
    let baseline = ScenarioBaseline::from_parts(&report.timeline, &report.costs, &report.unit_mix);
    let realistic = evaluate_scenario(&baseline, &ScenarioConfig::realistic()).expect("realistic");

    let uniform = inflate_cost_uniform(
        baseline.nominal_construction_cost,
        baseline.construction_months,
        baseline.monthly_inflation,
    )
    .expect("uniform");
    assert_eq!(realistic.inflated_construction_cost, uniform);

    // The phase-weighted projection spends differently, so the two figures diverge.
    let construction_only = report
        .timeline
        .month(report.timeline.completion_month)
        .expect("completion row")
        .cumulative_cost;
    assert!((construction_only - uniform).abs() > 1.0);
}

#[test]
fn custom_scenario_can_stress_only_prices() {
    let report = analyze_feasibility(&common::sample_request()).expect("analysis");
    let baseline = ScenarioBaseline::from_parts(&report.timeline, &report.costs, &report.unit_mix);
    let price_shock = ScenarioConfig {
        name: "Price shock".into(),
        kind: ScenarioKind::Custom,
        sales_variance: 0.80,
        ..ScenarioConfig::realistic()
    };
    let shocked = evaluate_scenario(&baseline, &price_shock).expect("shock");
    let realistic = evaluate_scenario(&baseline, &ScenarioConfig::realistic()).expect("realistic");
    assert_eq!(shocked.total_cost, realistic.total_cost);
    assert!((shocked.npv_revenue - realistic.npv_revenue * 0.80).abs() < 1e-3);
}

#[test]
fn evaluation_is_deterministic() {
    let report = analyze_feasibility(&common::sample_request()).expect("analysis");
    let baseline = ScenarioBaseline::from_parts(&report.timeline, &report.costs, &report.unit_mix);
    let first = evaluate_standard_scenarios(&baseline, &ScenarioPresets::default()).expect("first");
    let second =
        evaluate_standard_scenarios(&baseline, &ScenarioPresets::default()).expect("second");
    assert_eq!(first, second);
}

#[test]
fn baseline_reflects_timeline_rates() {
    let report = analyze_feasibility(&common::sample_request()).expect("analysis");
    let baseline = ScenarioBaseline::from_parts(&report.timeline, &report.costs, &report.unit_mix);
    assert_eq!(baseline.monthly_inflation, report.timeline.monthly_rates.cost_inflation);
    assert_eq!(baseline.construction_months, 18);
    assert_eq!(baseline.sellable_area, report.unit_mix.total_gross_area);

    let rerun = project_timeline(
        report.costs.nominal_construction_cost,
        report.unit_mix.total_revenue,
        &report.timeline.config,
        &feasibility_core::domain::ProjectionRates::default(),
    )
    .expect("timeline");
    assert_eq!(rerun, report.timeline);
}

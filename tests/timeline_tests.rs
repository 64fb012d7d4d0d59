use chrono::NaiveDate;
use solar_timeline::{
    InjectionMode, InvestmentModel, Phase, ProjectConfig, Typology, compute_timeline,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// 200 kWc existing roof, total injection, own investment, self-executed,
/// no skips, no overrides.
fn reference_config() -> ProjectConfig {
    ProjectConfig::new("p1", "Demo", date(2025, 3, 1), 200.0)
}

#[test]
fn reference_scenario_phase_dates() {
    let result = compute_timeline(&reference_config());

    let negotiation = result.negotiation.expect("negotiation runs by default");
    assert_eq!(negotiation.start, date(2025, 2, 14)); // T0 - 15 days
    assert_eq!(negotiation.end, date(2025, 3, 1));
    assert_eq!(negotiation.duration_months, 0.5);

    let urbanism = result.urbanism.expect("urbanism runs by default");
    assert_eq!(urbanism.start, date(2025, 3, 1));
    assert_eq!(urbanism.end, date(2025, 7, 1)); // 4 months: <=3000 kWc, not new roof
    assert_eq!(urbanism.duration_months, 4.0);

    let tender = result.tender.expect("200 kWc total injection tenders");
    assert_eq!(tender.start, date(2025, 7, 1));
    assert_eq!(tender.end, date(2025, 11, 1));

    let lease = result.lease.expect("own_investment gates lease in");
    assert_eq!(lease.end, date(2025, 11, 1));

    // Security lock 2025-11-01; connection tier 200 <= 250 kWc -> 9 months.
    assert_eq!(result.connection.start, date(2025, 11, 1));
    assert_eq!(result.connection.end, date(2026, 8, 1));
    assert_eq!(result.connection.duration_months, 9.0);

    // Backward walk from 2026-07-17 for 3 productive months skips April.
    assert_eq!(result.construction.start, date(2026, 3, 17));
    assert_eq!(result.construction.end, date(2026, 7, 17));
    assert_eq!(result.construction.duration_months, 5.0);

    assert_eq!(result.operation.start, date(2026, 9, 1));
    assert_eq!(result.operation.end, date(2028, 9, 1));
    assert_eq!(result.operation.duration_months, 24.0);

    assert_eq!(result.total_duration_months, 19.0);
}

#[test]
fn reference_scenario_milestones() {
    let result = compute_timeline(&reference_config());
    let milestones = result.milestones;
    assert_eq!(milestones.letter_of_intent, Some(date(2025, 3, 1)));
    assert_eq!(milestones.signature, date(2025, 3, 1));
    assert_eq!(milestones.permit_cleared, Some(date(2025, 7, 1)));
    assert_eq!(milestones.tender_result, Some(date(2025, 11, 1)));
    assert_eq!(milestones.lease_signed, Some(date(2025, 11, 1)));
    assert_eq!(milestones.construction_complete, Some(date(2026, 7, 17)));
    assert_eq!(milestones.commercial_operation, Some(date(2026, 9, 1)));
}

#[test]
fn connection_duration_power_tiers_are_boundary_exact() {
    let cases = [
        (36.0, 6.0),
        (36.0001, 9.0),
        (250.0, 9.0),
        (250.5, 12.0),
        (1000.0, 12.0),
        (1001.0, 18.0),
    ];
    for (power, expected) in cases {
        let mut config = reference_config();
        config.power_kwc = power;
        let result = compute_timeline(&config);
        assert_eq!(
            result.connection.duration_months, expected,
            "power {power} kWc"
        );
    }
}

#[test]
fn self_consumption_connection_is_five_months() {
    let mut config = reference_config();
    config.injection = InjectionMode::SelfConsumption;
    let result = compute_timeline(&config);
    assert_eq!(result.connection.duration_months, 5.0);
    // Self-consumption also drops the tender regardless of power.
    assert!(result.tender.is_none());
    assert_eq!(result.milestones.tender_result, None);
}

#[test]
fn tender_power_threshold_is_strict() {
    let mut config = reference_config();
    config.power_kwc = 100.0;
    assert!(compute_timeline(&config).tender.is_none());
    config.power_kwc = 100.0001;
    assert!(compute_timeline(&config).tender.is_some());
}

#[test]
fn urbanism_duration_rules() {
    let mut config = reference_config();
    config.power_kwc = 3000.0;
    assert_eq!(
        compute_timeline(&config).urbanism.unwrap().duration_months,
        4.0
    );
    config.power_kwc = 3000.5;
    assert_eq!(
        compute_timeline(&config).urbanism.unwrap().duration_months,
        6.0
    );
    config.power_kwc = 200.0;
    config.typology = Typology::NewRoof;
    assert_eq!(
        compute_timeline(&config).urbanism.unwrap().duration_months,
        6.0
    );
}

#[test]
fn lease_gates_on_investment_model_identifier() {
    let mut config = reference_config();
    config.investment = InvestmentModel::ThirdPartyInvestment;
    let result = compute_timeline(&config);
    assert!(result.lease.is_none());
    assert_eq!(result.milestones.lease_signed, None);
}

#[test]
fn skipped_urbanism_still_anchors_security_phase_at_signature() {
    let mut config = reference_config();
    config.set_skipped(Phase::Urbanism, true);
    let result = compute_timeline(&config);
    assert!(result.urbanism.is_none());
    assert_eq!(result.milestones.permit_cleared, None);
    let tender = result.tender.expect("tender still runs");
    assert_eq!(tender.start, date(2025, 3, 1));
    assert_eq!(tender.end, date(2025, 7, 1));
    assert_eq!(result.connection.start, date(2025, 7, 1));
}

#[test]
fn skipped_negotiation_moves_total_anchor_to_signature() {
    let mut config = reference_config();
    config.set_skipped(Phase::Negotiation, true);
    let result = compute_timeline(&config);
    assert!(result.negotiation.is_none());
    assert_eq!(result.milestones.letter_of_intent, None);
    // Anchored at T0 (2025-03) instead of the negotiation start (2025-02).
    assert_eq!(result.total_duration_months, 18.0);
}

#[test]
fn skipped_construction_yields_zero_length_range_at_connection_start() {
    let mut config = reference_config();
    config.set_skipped(Phase::Construction, true);
    let result = compute_timeline(&config);
    assert_eq!(result.construction.start, result.connection.start);
    assert_eq!(result.construction.end, result.connection.start);
    assert_eq!(result.construction.duration_months, 0.0);
    assert_eq!(result.milestones.construction_complete, None);
}

#[test]
fn subcontracted_placement_ignores_restricted_months() {
    let mut config = reference_config();
    config.subcontracted = true;
    let result = compute_timeline(&config);
    // 3 plain months back from 2026-07-17, April included.
    assert_eq!(result.construction.start, date(2026, 4, 17));
}

#[test]
fn fractional_construction_override_needs_the_next_whole_productive_month() {
    let mut config = reference_config();
    config.set_duration_override(Phase::Construction, 3.5);
    let result = compute_timeline(&config);
    // Backward from 2026-07-17: Jun, May, Mar cover only 3.0 of 3.5, so the
    // walk takes February as well.
    assert_eq!(result.construction.start, date(2026, 2, 17));
    assert_eq!(result.construction.duration_months, 6.0);
}

#[test]
fn oversized_duration_overrides_saturate_instead_of_panicking() {
    let mut config = reference_config();
    config.set_duration_override(Phase::Urbanism, 4_000_000.0);
    let result = compute_timeline(&config);
    assert_eq!(result.urbanism.unwrap().end, NaiveDate::MAX);
    assert!(result.total_duration_months >= 0.0);

    let mut config = reference_config();
    config.subcontracted = true;
    config.set_duration_override(Phase::Construction, 1e18);
    let result = compute_timeline(&config);
    // The backward placement bottoms out before the security lock, so the
    // repair pass re-anchors there and the connection slides to the bound.
    assert_eq!(result.construction.start, date(2025, 11, 1));
    assert_eq!(result.connection.end, NaiveDate::MAX);

    let mut config = reference_config();
    config.set_duration_override(Phase::Negotiation, 1e18);
    let result = compute_timeline(&config);
    assert_eq!(result.negotiation.unwrap().start, NaiveDate::MIN);
}

#[test]
fn duration_overrides_take_precedence() {
    let mut config = reference_config();
    config.set_duration_override(Phase::Urbanism, 2.0);
    config.set_duration_override(Phase::Tender, 1.0);
    let result = compute_timeline(&config);
    assert_eq!(result.urbanism.unwrap().end, date(2025, 5, 1));
    let tender = result.tender.unwrap();
    assert_eq!(tender.end, date(2025, 6, 1));
    // Lease keeps its 4-month default, so it decides the security lock.
    assert_eq!(result.connection.start, date(2025, 9, 1));
}

/// Backward placement would start before the security lock; the repair pass
/// re-anchors construction at the lock and slides the connection window
/// forward, preserving its duration.
fn repair_config() -> ProjectConfig {
    let mut config = ProjectConfig::new("p2", "Repair", date(2025, 1, 15), 20.0);
    config.investment = InvestmentModel::ThirdPartyInvestment; // lease out
    config.set_skipped(Phase::Urbanism, true); // lock collapses to T0
    config.set_duration_override(Phase::Connection, 2.0);
    config.set_duration_override(Phase::Construction, 6.0);
    config
}

#[test]
fn constraint_repair_reanchors_construction_at_security_lock() {
    let result = compute_timeline(&repair_config());

    // Backward walk from 2025-02-28 needs 6 productive months and would
    // start in June 2024, before the 2025-01-15 lock.
    assert_eq!(result.construction.start, date(2025, 1, 15));

    // Forward walk from the lock skips April and August: ends 2025-09-15.
    assert_eq!(result.construction.end, date(2025, 9, 15));
    assert_eq!(result.milestones.construction_complete, Some(date(2025, 9, 15)));

    // Connection window slid to end 15 days after construction, duration
    // preserved at 2 months.
    assert_eq!(result.connection.end, date(2025, 9, 30));
    assert_eq!(result.connection.start, date(2025, 7, 30));
    assert_eq!(result.connection.duration_months, 2.0);

    assert_eq!(result.construction.duration_months, 8.0);
    assert_eq!(result.milestones.commercial_operation, Some(date(2025, 10, 30)));
}

#[test]
fn oversized_work_requirement_truncates_silently() {
    let mut config = repair_config();
    config.set_duration_override(Phase::Construction, 120.0);
    let result = compute_timeline(&config);
    // Both walks stop at the 36-step budget instead of looping.
    assert_eq!(result.construction.start, date(2025, 1, 15));
    assert_eq!(result.construction.end, date(2028, 1, 15));
    assert_eq!(result.connection.end, date(2028, 1, 30));
    assert_eq!(result.construction.duration_months, 36.0);
}

#[test]
fn degenerate_inputs_still_produce_a_result() {
    let mut config = reference_config();
    config.power_kwc = -5.0;
    config.set_duration_override(Phase::Urbanism, 0.0);
    let result = compute_timeline(&config);
    assert!(result.total_duration_months >= 0.0);
    assert_eq!(result.urbanism.unwrap().duration_months, 0.0);
}

#[test]
fn engine_is_deterministic() {
    let config = reference_config();
    assert_eq!(compute_timeline(&config), compute_timeline(&config));
    let repair = repair_config();
    assert_eq!(compute_timeline(&repair), compute_timeline(&repair));
}

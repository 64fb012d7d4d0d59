use crate::calculations::{BackwardPlacement, ForwardRepair};
use crate::calendar::{add_months, diff_months, months_to_days, shift_days, sub_months};
use crate::project::{InjectionMode, InvestmentModel, Phase, ProjectConfig, Typology};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Half-month buffer separating construction completion from the grid
/// connection date.
pub const CONNECTION_LEAD_DAYS: i64 = 15;

/// Months between connection and commercial operation.
const COD_OFFSET_MONTHS: i32 = 1;

/// Fixed display horizon for the operation window, not a modeled end of
/// operation.
const OPERATION_DISPLAY_MONTHS: i32 = 24;

const NEGOTIATION_DEFAULT_MONTHS: f64 = 0.5;
const TENDER_DEFAULT_MONTHS: f64 = 4.0;
const LEASE_DEFAULT_MONTHS: f64 = 4.0;

/// A phase window. `duration_months` is the *requested* duration used to
/// derive the dates; it does not always equal the elapsed span between
/// `start` and `end` to the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_months: f64,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate, duration_months: f64) -> Self {
        Self {
            start,
            end,
            duration_months,
        }
    }
}

/// Gate dates. Each optional milestone is present iff its owning phase ran.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestones {
    pub letter_of_intent: Option<NaiveDate>,
    pub signature: NaiveDate,
    pub permit_cleared: Option<NaiveDate>,
    pub tender_result: Option<NaiveDate>,
    pub lease_signed: Option<NaiveDate>,
    pub construction_complete: Option<NaiveDate>,
    pub commercial_operation: Option<NaiveDate>,
}

/// Complete derived plan for one project. Recomputed from scratch on every
/// input change; carries no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub negotiation: Option<DateRange>,
    pub urbanism: Option<DateRange>,
    pub tender: Option<DateRange>,
    pub lease: Option<DateRange>,
    pub connection: DateRange,
    pub construction: DateRange,
    pub operation: DateRange,
    pub milestones: Milestones,
    pub total_duration_months: f64,
}

/// Per-phase durations with the sparse skip/override maps already applied.
/// `None` means the phase does not run (skipped, or excluded by its gating
/// condition). Resolved once so the stage computations stay total and free
/// of configuration lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PhaseInputs {
    negotiation: Option<f64>,
    urbanism: Option<f64>,
    tender: Option<f64>,
    lease: Option<f64>,
    connection: f64,
    connection_skipped: bool,
    /// Productive work months required on site, possibly fractional; `None`
    /// when construction is skipped.
    construction: Option<f64>,
    subcontracted: bool,
}

impl PhaseInputs {
    fn resolve(config: &ProjectConfig) -> Self {
        let negotiation = (!config.is_skipped(Phase::Negotiation)).then(|| {
            config
                .duration_override(Phase::Negotiation)
                .unwrap_or(NEGOTIATION_DEFAULT_MONTHS)
        });

        let urbanism = (!config.is_skipped(Phase::Urbanism)).then(|| {
            config.duration_override(Phase::Urbanism).unwrap_or({
                if config.power_kwc > 3000.0 || config.typology == Typology::NewRoof {
                    6.0
                } else {
                    4.0
                }
            })
        });

        let tender_included = !config.is_skipped(Phase::Tender)
            && config.power_kwc > 100.0
            && config.injection == InjectionMode::TotalInjection;
        let tender = tender_included.then(|| {
            config
                .duration_override(Phase::Tender)
                .unwrap_or(TENDER_DEFAULT_MONTHS)
        });

        let lease_included = !config.is_skipped(Phase::LeaseManagement)
            && config.investment == InvestmentModel::OwnInvestment;
        let lease = lease_included.then(|| {
            config
                .duration_override(Phase::LeaseManagement)
                .unwrap_or(LEASE_DEFAULT_MONTHS)
        });

        let connection_skipped = config.is_skipped(Phase::Connection);
        let connection = if connection_skipped {
            0.0
        } else {
            config
                .duration_override(Phase::Connection)
                .unwrap_or_else(|| connection_duration_months(config))
        };

        let construction = (!config.is_skipped(Phase::Construction)).then(|| {
            config
                .duration_override(Phase::Construction)
                .unwrap_or_else(|| work_months_needed(config.power_kwc))
        });

        Self {
            negotiation,
            urbanism,
            tender,
            lease,
            connection,
            connection_skipped,
            construction,
            subcontracted: config.subcontracted,
        }
    }
}

fn connection_duration_months(config: &ProjectConfig) -> f64 {
    if config.injection == InjectionMode::SelfConsumption {
        return 5.0;
    }
    match config.power_kwc {
        power if power <= 36.0 => 6.0,
        power if power <= 250.0 => 9.0,
        power if power <= 1000.0 => 12.0,
        _ => 18.0,
    }
}

fn work_months_needed(power_kwc: f64) -> f64 {
    if power_kwc > 2000.0 {
        6.0
    } else if power_kwc > 500.0 {
        4.0
    } else {
        3.0
    }
}

/// Derive the full phase plan for one project. Pure and total: every input
/// produces a result, degenerate configurations included, and identical
/// inputs always produce identical dates.
pub fn compute_timeline(config: &ProjectConfig) -> PhaseResult {
    let t0 = config.signature_date;
    let inputs = PhaseInputs::resolve(config);

    // Negotiation runs backward from signature.
    let negotiation = inputs.negotiation.map(|months| {
        let start = shift_days(t0, months_to_days(months).saturating_neg());
        DateRange::new(start, t0, months)
    });

    let urbanism = inputs
        .urbanism
        .map(|months| DateRange::new(t0, add_months(t0, months as i32), months));
    // A skipped permitting phase still anchors downstream phases at T0.
    let urban_end = urbanism.as_ref().map_or(t0, |range| range.end);

    // Tender and lease management run in parallel off the permitting end.
    let tender = inputs
        .tender
        .map(|months| DateRange::new(urban_end, add_months(urban_end, months as i32), months));
    let lease = inputs
        .lease
        .map(|months| DateRange::new(urban_end, add_months(urban_end, months as i32), months));

    // Earliest date any physical-implementation phase may begin.
    let security_lock = {
        let tender_end = tender.as_ref().map_or(urban_end, |range| range.end);
        let lease_end = lease.as_ref().map_or(urban_end, |range| range.end);
        tender_end.max(lease_end)
    };

    let mut connection = DateRange::new(
        security_lock,
        add_months(security_lock, inputs.connection as i32),
        inputs.connection,
    );

    let construction = match inputs.construction {
        None => DateRange::new(connection.start, connection.start, 0.0),
        Some(work_months) => {
            let target_end = shift_days(connection.end, -CONNECTION_LEAD_DAYS);
            let mut start =
                BackwardPlacement::new(target_end, work_months, inputs.subcontracted).execute();

            if start < security_lock {
                // The backward placement cannot start this early; re-anchor
                // at the lock and push the connection window out by the same
                // shift, keeping its duration.
                let repaired_end =
                    ForwardRepair::new(security_lock, work_months, inputs.subcontracted).execute();
                start = security_lock;
                if !inputs.connection_skipped {
                    connection.end = shift_days(repaired_end, CONNECTION_LEAD_DAYS);
                    connection.start =
                        sub_months(connection.end, connection.duration_months as i32);
                }
            }

            let end = shift_days(connection.end, -CONNECTION_LEAD_DAYS);
            // Duration is measured to the connection end, not the
            // construction end; downstream displays rely on this figure.
            let duration_months = diff_months(start, connection.end) as f64;
            DateRange::new(start, end, duration_months)
        }
    };

    let cod = add_months(connection.end, COD_OFFSET_MONTHS);
    let operation = DateRange::new(
        cod,
        add_months(cod, OPERATION_DISPLAY_MONTHS),
        f64::from(OPERATION_DISPLAY_MONTHS),
    );

    let milestones = Milestones {
        letter_of_intent: negotiation.as_ref().map(|range| range.end),
        signature: t0,
        permit_cleared: urbanism.as_ref().map(|range| range.end),
        tender_result: tender.as_ref().map(|range| range.end),
        lease_signed: lease.as_ref().map(|range| range.end),
        construction_complete: inputs.construction.map(|_| construction.end),
        commercial_operation: Some(cod),
    };

    let planning_start = negotiation.as_ref().map_or(t0, |range| range.start);
    let total_duration_months = diff_months(planning_start, cod) as f64;

    PhaseResult {
        negotiation,
        urbanism,
        tender,
        lease,
        connection,
        construction,
        operation,
        milestones,
        total_duration_months,
    }
}

use super::PersistenceResult;
use crate::portfolio::{Portfolio, ProjectTimeline};
use crate::project::ProjectConfig;
use crate::timeline::{DateRange, PhaseResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// The portfolio is persisted as a plain JSON array of project records.
pub fn save_portfolio_to_json<P: AsRef<Path>>(
    portfolio: &Portfolio,
    path: P,
) -> PersistenceResult<()> {
    super::validate_projects(portfolio.projects())?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, portfolio.projects())?;
    Ok(())
}

pub fn load_portfolio_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Portfolio> {
    let file = File::open(path)?;
    let projects: Vec<ProjectConfig> = serde_json::from_reader(file)?;
    super::validate_projects(&projects)?;
    Ok(Portfolio::from_projects(projects))
}

#[derive(Serialize)]
struct TimelineCsvRecord {
    project_id: String,
    project_name: String,
    phase: String,
    start: String,
    end: String,
    duration_months: f64,
    milestone: String,
}

impl TimelineCsvRecord {
    fn from_range(
        timeline: &ProjectTimeline,
        phase: &str,
        range: &DateRange,
        milestone: Option<NaiveDate>,
    ) -> Self {
        Self {
            project_id: timeline.project_id.clone(),
            project_name: timeline.project_name.clone(),
            phase: phase.to_string(),
            start: format_date(range.start),
            end: format_date(range.end),
            duration_months: range.duration_months,
            milestone: format_option_date(milestone),
        }
    }
}

fn phase_records(timeline: &ProjectTimeline) -> Vec<TimelineCsvRecord> {
    let result: &PhaseResult = &timeline.result;
    let milestones = &result.milestones;
    let mut records = Vec::with_capacity(7);

    if let Some(range) = &result.negotiation {
        records.push(TimelineCsvRecord::from_range(
            timeline,
            "negotiation",
            range,
            milestones.letter_of_intent,
        ));
    }
    if let Some(range) = &result.urbanism {
        records.push(TimelineCsvRecord::from_range(
            timeline,
            "urbanism",
            range,
            milestones.permit_cleared,
        ));
    }
    if let Some(range) = &result.tender {
        records.push(TimelineCsvRecord::from_range(
            timeline,
            "tender",
            range,
            milestones.tender_result,
        ));
    }
    if let Some(range) = &result.lease {
        records.push(TimelineCsvRecord::from_range(
            timeline,
            "lease_management",
            range,
            milestones.lease_signed,
        ));
    }
    records.push(TimelineCsvRecord::from_range(
        timeline,
        "connection",
        &result.connection,
        None,
    ));
    records.push(TimelineCsvRecord::from_range(
        timeline,
        "construction",
        &result.construction,
        milestones.construction_complete,
    ));
    records.push(TimelineCsvRecord::from_range(
        timeline,
        "operation",
        &result.operation,
        milestones.commercial_operation,
    ));
    records
}

/// Flatten computed timelines into delimited rows, one per present phase.
pub fn export_timelines_to_csv<P: AsRef<Path>>(
    timelines: &[ProjectTimeline],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for timeline in timelines {
        for record in phase_records(timeline) {
            writer.serialize(record)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_option_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

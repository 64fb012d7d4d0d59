pub mod calculations;
pub mod calendar;
pub mod chart;
pub mod persistence;
pub mod portfolio;
pub mod project;
pub mod timeline;

pub use calculations::{BackwardPlacement, ForwardRepair, MAX_SEARCH_STEPS};
pub use chart::{ChartViewport, MonthCell};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqlitePortfolioStore;
pub use persistence::{
    PersistenceError, PortfolioStore, export_timelines_to_csv, load_portfolio_from_json,
    save_portfolio_to_json, validate_projects,
};
pub use portfolio::{Portfolio, ProjectTimeline};
pub use project::{InjectionMode, InvestmentModel, Phase, ProjectConfig, Typology};
pub use timeline::{DateRange, Milestones, PhaseResult, compute_timeline};

use crate::portfolio::Portfolio;
use crate::project::ProjectConfig;
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
    NotFound,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::NotFound => write!(f, "no portfolio stored"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage backend for the persisted project list.
pub trait PortfolioStore {
    fn save_portfolio(&self, portfolio: &Portfolio) -> PersistenceResult<()>;
    fn load_portfolio(&self) -> PersistenceResult<Option<Portfolio>>;
}

/// Duplicate or empty ids break upsert/delete semantics, so they are
/// rejected at the storage boundary. The engine itself validates nothing.
pub fn validate_projects(projects: &[ProjectConfig]) -> PersistenceResult<()> {
    let mut seen = HashSet::new();
    for project in projects {
        if project.id.trim().is_empty() {
            return Err(PersistenceError::InvalidData(
                "project with empty id".into(),
            ));
        }
        if !seen.insert(project.id.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate project id '{}'",
                project.id
            )));
        }
    }
    Ok(())
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{export_timelines_to_csv, load_portfolio_from_json, save_portfolio_to_json};

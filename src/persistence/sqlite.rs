use super::{PersistenceResult, PortfolioStore};
use crate::portfolio::Portfolio;
use crate::project::ProjectConfig;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// SQLite-backed project list. Each portfolio is one JSON array stored
/// under an application-chosen storage key, so several portfolios can share
/// a database file.
pub struct SqlitePortfolioStore {
    connection: Mutex<Connection>,
    storage_key: String,
}

impl SqlitePortfolioStore {
    pub const DEFAULT_STORAGE_KEY: &'static str = "solar_projects";

    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        Self::with_storage_key(path, Self::DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key<P: AsRef<std::path::Path>>(
        path: P,
        storage_key: impl Into<String>,
    ) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
            storage_key: storage_key.into(),
        })
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS portfolios (
                storage_key TEXT PRIMARY KEY,
                projects_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl PortfolioStore for SqlitePortfolioStore {
    fn save_portfolio(&self, portfolio: &Portfolio) -> PersistenceResult<()> {
        super::validate_projects(portfolio.projects())?;
        let json = serde_json::to_string(portfolio.projects())?;
        let connection = self.connection.lock().expect("sqlite mutex poisoned");
        connection.execute(
            "INSERT OR REPLACE INTO portfolios (storage_key, projects_json) VALUES (?1, ?2)",
            params![self.storage_key, json],
        )?;
        Ok(())
    }

    fn load_portfolio(&self) -> PersistenceResult<Option<Portfolio>> {
        let connection = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt =
            connection.prepare("SELECT projects_json FROM portfolios WHERE storage_key = ?1")?;
        let json_opt: Option<String> = stmt
            .query_row(params![self.storage_key], |row| row.get(0))
            .optional()?;

        let Some(json) = json_opt else {
            return Ok(None);
        };

        let projects: Vec<ProjectConfig> = serde_json::from_str(&json)?;
        super::validate_projects(&projects)?;
        Ok(Some(Portfolio::from_projects(projects)))
    }
}

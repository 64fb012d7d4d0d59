use crate::project::ProjectConfig;
use crate::timeline::{PhaseResult, compute_timeline};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A computed plan paired with the identity of the project it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTimeline {
    pub project_id: String,
    pub project_name: String,
    pub result: PhaseResult,
}

/// The mutable project list. Owns selection-independent state so the engine
/// can stay a pure function of one configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    projects: Vec<ProjectConfig>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_projects(projects: Vec<ProjectConfig>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[ProjectConfig] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn find_project(&self, id: &str) -> Option<&ProjectConfig> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn find_project_mut(&mut self, id: &str) -> Option<&mut ProjectConfig> {
        self.projects.iter_mut().find(|project| project.id == id)
    }

    /// Replace the project with the same id, or append when absent.
    pub fn upsert_project(&mut self, config: ProjectConfig) {
        match self.find_project_mut(&config.id) {
            Some(existing) => *existing = config,
            None => self.projects.push(config),
        }
    }

    pub fn delete_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|project| project.id != id);
        self.projects.len() != before
    }

    /// Compute one timeline per project, preserving list order. The engine
    /// is pure, so projects compute independently in parallel.
    pub fn compute_all(&self) -> Vec<ProjectTimeline> {
        self.projects
            .par_iter()
            .map(|project| ProjectTimeline {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                result: compute_timeline(project),
            })
            .collect()
    }
}

use crate::config::RunnerConfig;
use crate::error::{LabError, Result};
use crate::runner::ExperimentRunner;
use crate::store::{Entity, EntityStore};
use crate::types::{ExperimentStatus, ModelType};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Hyperparameters in the order they were entered.
pub type Parameters = IndexMap<String, String>;
pub type Metrics = BTreeMap<String, f64>;

pub const PROJECT_PREFIX: char = 'P';
pub const EXPERIMENT_PREFIX: char = 'E';

// ---------------------------------------------------------------------------
// Experiment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub model_type: ModelType,
    pub dataset_name: String,
    pub parameters: Parameters,
    pub status: ExperimentStatus,
    pub metrics: Metrics,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Experiment {
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        name: impl Into<String>,
        model_type: impl Into<ModelType>,
        dataset_name: impl Into<String>,
        parameters: Parameters,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            model_type: model_type.into(),
            dataset_name: dataset_name.into(),
            parameters,
            status: ExperimentStatus::Created,
            metrics: Metrics::new(),
            start_time: None,
            end_time: None,
        }
    }

    pub(crate) fn mark_running(&mut self, at: DateTime<Utc>) {
        self.status = ExperimentStatus::Running;
        self.start_time = Some(at);
        self.end_time = None;
        self.metrics.clear();
    }

    pub(crate) fn mark_completed(&mut self, at: DateTime<Utc>, metrics: Metrics) {
        self.status = ExperimentStatus::Completed;
        self.end_time = Some(at);
        self.metrics = metrics;
    }

    /// Wall time of the last run, once it has completed.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.status, self.start_time, self.end_time) {
            (ExperimentStatus::Completed, Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

impl Entity for Experiment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Experiment ID: {}, Name: {}, Status: {}, Model: {}, Metrics: ",
            self.id, self.name, self.status, self.model_type
        )?;
        if self.metrics.is_empty() {
            f.write_str("N/A")
        } else {
            f.write_str(&format_metrics(&self.metrics))
        }
    }
}

/// `{accuracy: 0.9123, precision: 0.8012}`
pub fn format_metrics(metrics: &Metrics) -> String {
    let parts: Vec<String> = metrics
        .iter()
        .map(|(name, value)| format!("{name}: {value:.4}"))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

/// `{learning_rate: 0.01, epochs: 10}`, in entry order.
pub fn format_parameters(parameters: &Parameters) -> String {
    let parts: Vec<String> = parameters
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub experiments: EntityStore<Experiment>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            experiments: EntityStore::new(EXPERIMENT_PREFIX),
        }
    }

    pub fn create_experiment(
        &mut self,
        name: impl Into<String>,
        model_type: impl Into<ModelType>,
        dataset_name: impl Into<String>,
        parameters: Parameters,
    ) -> String {
        let project_id = self.id.clone();
        let id = self.experiments.create(|id| {
            Experiment::new(id, project_id, name, model_type, dataset_name, parameters)
        });
        tracing::debug!(project = %self.id, experiment = %id, "experiment created");
        id
    }

    pub fn get_experiment(&self, experiment_id: &str) -> Option<&Experiment> {
        self.experiments.get(experiment_id)
    }

    pub fn list_experiments(&self) -> &[Experiment] {
        self.experiments.list_all()
    }
}

impl Entity for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Project ID: {}, Name: {}, Description: {}",
            self.id, self.name, self.description
        )
    }
}

// ---------------------------------------------------------------------------
// ProjectRegistry
// ---------------------------------------------------------------------------

/// All projects of one lab session, plus the runner that executes their
/// experiments.
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    projects: EntityStore<Project>,
    runner: ExperimentRunner,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl ProjectRegistry {
    pub fn new(runner_config: RunnerConfig) -> Self {
        Self::with_runner(ExperimentRunner::new(runner_config))
    }

    pub fn with_runner(runner: ExperimentRunner) -> Self {
        Self {
            projects: EntityStore::new(PROJECT_PREFIX),
            runner,
        }
    }

    pub fn create_project(&mut self, name: impl Into<String>, description: impl Into<String>) -> String {
        let id = self.projects.create(|id| Project::new(id, name, description));
        tracing::debug!(project = %id, "project created");
        id
    }

    pub fn get_project(&self, project_id: &str) -> Option<&Project> {
        self.projects.get(project_id)
    }

    pub fn list_all_projects(&self) -> &[Project] {
        self.projects.list_all()
    }

    /// Add an experiment to an existing project. Unknown project IDs are
    /// rejected and nothing is created.
    pub fn create_experiment(
        &mut self,
        project_id: &str,
        name: impl Into<String>,
        model_type: impl Into<ModelType>,
        dataset_name: impl Into<String>,
        parameters: Parameters,
    ) -> Result<String> {
        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| LabError::ProjectNotFound(project_id.to_string()))?;
        Ok(project.create_experiment(name, model_type, dataset_name, parameters))
    }

    pub fn get_experiment(&self, project_id: &str, experiment_id: &str) -> Result<&Experiment> {
        let project = self
            .get_project(project_id)
            .ok_or_else(|| LabError::ProjectNotFound(project_id.to_string()))?;
        project
            .get_experiment(experiment_id)
            .ok_or_else(|| LabError::ExperimentNotFound {
                project: project_id.to_string(),
                experiment: experiment_id.to_string(),
            })
    }

    /// Run an experiment to completion and return it with fresh metrics.
    pub fn run_experiment(&mut self, project_id: &str, experiment_id: &str) -> Result<&Experiment> {
        let project = self
            .projects
            .get_mut(project_id)
            .ok_or_else(|| LabError::ProjectNotFound(project_id.to_string()))?;
        let experiment = project
            .experiments
            .get_mut(experiment_id)
            .ok_or_else(|| LabError::ExperimentNotFound {
                project: project_id.to_string(),
                experiment: experiment_id.to_string(),
            })?;
        self.runner.run(experiment);
        Ok(&*experiment)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

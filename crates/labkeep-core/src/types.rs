use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ExperimentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperimentStatus {
    Created,
    Running,
    Completed,
}

impl ExperimentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperimentStatus::Created => "Created",
            ExperimentStatus::Running => "Running",
            ExperimentStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ModelType
// ---------------------------------------------------------------------------

/// Model-type tag of an experiment. Selects the shape of its metrics.
///
/// Any tag other than `classification` or `regression` is kept verbatim in
/// `Generic` so listings show what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelType {
    Classification,
    Regression,
    Generic(String),
}

impl ModelType {
    pub fn as_str(&self) -> &str {
        match self {
            ModelType::Classification => "classification",
            ModelType::Regression => "regression",
            ModelType::Generic(tag) => tag,
        }
    }
}

impl From<&str> for ModelType {
    fn from(s: &str) -> Self {
        match s {
            "classification" => ModelType::Classification,
            "regression" => ModelType::Regression,
            other => ModelType::Generic(other.to_string()),
        }
    }
}

impl From<String> for ModelType {
    fn from(s: String) -> Self {
        ModelType::from(s.as_str())
    }
}

impl From<ModelType> for String {
    fn from(m: ModelType) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AppointmentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => f.write_str("Scheduled"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

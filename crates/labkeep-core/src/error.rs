use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("experiment {experiment} not found in project {project}")]
    ExperimentNotFound { project: String, experiment: String },

    #[error("patient not found: {0}")]
    PatientNotFound(String),

    #[error("invalid date/time '{0}': use YYYY-MM-DD HH:MM")]
    InvalidDateTime(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Coarse classification of a [`LabError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced project, experiment, or patient does not exist.
    NotFound,
    /// Caller-supplied text failed to parse.
    InvalidFormat,
    /// Configuration could not be read or is inconsistent.
    Config,
}

impl LabError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabError::ProjectNotFound(_)
            | LabError::ExperimentNotFound { .. }
            | LabError::PatientNotFound(_) => ErrorKind::NotFound,
            LabError::InvalidDateTime(_) => ErrorKind::InvalidFormat,
            LabError::InvalidConfig(_) | LabError::Io(_) | LabError::Yaml(_) => ErrorKind::Config,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, LabError>;

pub mod clinic;
pub mod config;
pub mod datetime;
pub mod error;
pub mod id;
pub mod lab;
pub mod runner;
pub mod store;
pub mod types;

pub use clinic::{Appointment, ClinicRegistry, Patient};
pub use error::{ErrorKind, LabError, Result};
pub use lab::{Experiment, Metrics, Parameters, Project, ProjectRegistry};
pub use runner::ExperimentRunner;

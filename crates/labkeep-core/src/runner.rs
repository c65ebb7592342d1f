use crate::config::{RunnerConfig, SimulationMode, MAX_DELAY_MS};
use crate::lab::{Experiment, Metrics};
use crate::types::ModelType;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Drives an experiment through `Running` to `Completed` and fabricates
/// metrics for it.
///
/// Running an already completed experiment is allowed: it starts over and
/// overwrites the previous timestamps and metrics.
#[derive(Debug, Clone)]
pub struct ExperimentRunner {
    config: RunnerConfig,
    rng: StdRng,
}

impl Default for ExperimentRunner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl ExperimentRunner {
    pub fn new(config: RunnerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Execute `experiment` and return the recorded duration.
    pub fn run(&mut self, experiment: &mut Experiment) -> chrono::Duration {
        let start = Utc::now();
        experiment.mark_running(start);
        tracing::info!(
            experiment = %experiment.id,
            project = %experiment.project_id,
            model_type = %experiment.model_type,
            "experiment started"
        );

        let delay = self.draw_delay();
        let simulated = chrono::Duration::milliseconds(delay.as_millis() as i64);
        let end = match self.config.mode {
            SimulationMode::Sleep => {
                std::thread::sleep(delay);
                // The wall clock may step backwards; never report less than the delay.
                Utc::now().max(start + simulated)
            }
            SimulationMode::Logical => start + simulated,
        };

        let metrics = simulate_metrics(&experiment.model_type, &mut self.rng);
        experiment.mark_completed(end, metrics);

        let duration = end - start;
        tracing::info!(
            experiment = %experiment.id,
            duration_ms = duration.num_milliseconds(),
            metrics = ?experiment.metrics,
            "experiment completed"
        );
        duration
    }

    fn draw_delay(&mut self) -> Duration {
        let min = self.config.min_delay_ms.min(MAX_DELAY_MS);
        let max = self.config.max_delay_ms.min(MAX_DELAY_MS);
        let ms = if min >= max {
            min
        } else {
            self.rng.gen_range(min..=max)
        };
        Duration::from_millis(ms)
    }
}

/// Metric set for one run. Keys are fixed by the model type.
pub fn simulate_metrics<R: Rng>(model_type: &ModelType, rng: &mut R) -> Metrics {
    let mut metrics = Metrics::new();
    match model_type {
        ModelType::Classification => {
            metrics.insert("accuracy".to_string(), rng.gen_range(0.75..0.99));
            metrics.insert("precision".to_string(), rng.gen_range(0.70..0.95));
        }
        ModelType::Regression => {
            metrics.insert("mae".to_string(), rng.gen_range(0.1..1.5));
            metrics.insert("rmse".to_string(), rng.gen_range(0.2..2.0));
        }
        ModelType::Generic(_) => {
            metrics.insert("dummy_score".to_string(), rng.gen_range(0.5..1.0));
        }
    }
    metrics
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use anyhow::Context;
use labkeep_core::config::{Config, RunnerConfig};
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "labkeep.yaml";

/// Resolve the config file to read.
///
/// Priority:
/// 1. `--config` flag / `LABKEEP_CONFIG` env var (passed in as `explicit`)
/// 2. `labkeep.yaml` in `cwd`, if present
/// 3. None: built-in defaults
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let local = cwd.join(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match resolve_config_path(explicit, &cwd) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Config::load(&path).with_context(|| format!("failed to load config {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

/// Command-line overrides layered over the runner section of a config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerOverrides {
    pub fast: bool,
    pub seed: Option<u64>,
}

pub fn runner_config(config: &Config, overrides: RunnerOverrides) -> RunnerConfig {
    let mut runner = if overrides.fast {
        RunnerConfig {
            seed: config.runner.seed,
            ..RunnerConfig::instant()
        }
    } else {
        config.runner.clone()
    };
    if let Some(seed) = overrides.seed {
        runner.seed = Some(seed);
    }
    runner
}

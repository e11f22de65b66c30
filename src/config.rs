//! Experiment Configuration
//!
//! Defaults, optionally overridden by a YAML file and then by environment
//! variables (a `.env` file is honoured by the binary).

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::display::Canvas;
use crate::error::{ExperimentError, Result};
use crate::results::ResponseLogger;

/// Used when `EXPERIMENT_CONFIG` is unset and the file exists
pub const DEFAULT_CONFIG_FILE: &str = "experiment.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// CSV file responses are appended to
    pub results_file: PathBuf,
    /// Directory stimulus image paths are resolved against
    pub asset_dir: PathBuf,
    /// Directory for the diagnostic log
    pub log_dir: PathBuf,
    /// Fixed RNG seed for reproducible pilot runs
    pub seed: Option<u64>,
    pub canvas: Canvas,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            results_file: ResponseLogger::default_path(),
            asset_dir: PathBuf::from("."),
            log_dir: PathBuf::from("logs"),
            seed: None,
            canvas: Canvas::default(),
        }
    }
}

impl ExperimentConfig {
    /// Defaults, then the config file, then environment overrides.
    /// Also returns the file that was read, if any.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        let source = Self::source_file(std::env::var("EXPERIMENT_CONFIG").ok());
        let mut config = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok((config, source))
    }

    /// The explicit path if given, otherwise the default file when it exists
    fn source_file(explicit: Option<String>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                default.exists().then(|| default.to_path_buf())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ExperimentError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ExperimentError::Config(e.to_string()))
    }

    /// Apply `EXPERIMENT_*` overrides from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("EXPERIMENT_RESULTS_FILE") {
            self.results_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("EXPERIMENT_ASSET_DIR") {
            self.asset_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("EXPERIMENT_LOG_DIR") {
            self.log_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("EXPERIMENT_SEED") {
            let seed = v
                .trim()
                .parse::<u64>()
                .map_err(|e| ExperimentError::Config(format!("EXPERIMENT_SEED={:?}: {}", v, e)))?;
            self.seed = Some(seed);
        }
        Ok(())
    }

    /// Seeded RNG when a seed is configured, entropy otherwise
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

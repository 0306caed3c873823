use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{invalid_input_error, Error};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub data_dir: Option<PathBuf>,
    pub concurrency: usize,
    pub fail_fast: bool,
    pub spatial_tolerance_km: f64,
    pub max_deviation_km: f64,
    pub weights: ScoreWeights,
    pub api_base: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub request_timeout_secs: u64,
    pub annotations_path: Option<PathBuf>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub accuracy: f64,
    pub spatial_accuracy: f64,
    pub semantic_similarity: f64,
    pub route_deviation: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            concurrency: 4,
            fail_fast: false,
            spatial_tolerance_km: 0.5,
            max_deviation_km: 10.0,
            weights: ScoreWeights::default(),
            api_base: None,
            temperature: 0.0,
            max_tokens: 1024,
            request_timeout_secs: 60,
            annotations_path: None,
            extra: Map::new(),
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            accuracy: 0.3,
            spatial_accuracy: 0.3,
            semantic_similarity: 0.2,
            route_deviation: 0.2,
        }
    }
}

impl BenchmarkConfig {
    #[tracing::instrument]
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        let config: BenchmarkConfig = serde_json::from_str(&contents)?;

        config.validate()?;

        tracing::debug!("loaded config from {}", path.display());

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.spatial_tolerance_km > 0.0) {
            return Err(invalid_input_error("spatial_tolerance_km must be positive"));
        }

        if !(self.max_deviation_km > 0.0) {
            return Err(invalid_input_error("max_deviation_km must be positive"));
        }

        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        match env::var("TURNBACK_DATA_DIR") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    pub fn api_base(&self) -> String {
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }

        match env::var("TURNBACK_API_BASE") {
            Ok(base) if !base.is_empty() => base.trim_end_matches('/').to_string(),
            _ => DEFAULT_API_BASE.into(),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

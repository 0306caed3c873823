use std::fs;
use std::path::Path;

use crate::{
    config::BenchmarkConfig,
    dataset::RouteDataset,
    entities::EvaluationResults,
    error::Error,
    evaluation::RouteEvaluator,
    models::DynModel,
};

/// Entry point for running TurnBack: holds the configuration and the
/// evaluator built from it.
#[derive(Debug)]
pub struct TurnBackBenchmark {
    evaluator: RouteEvaluator,
}

impl TurnBackBenchmark {
    pub fn new(config: Option<BenchmarkConfig>) -> Self {
        let evaluator = RouteEvaluator::new(config.unwrap_or_default());

        tracing::info!("TurnBack benchmark initialized");

        Self { evaluator }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        self.evaluator.config()
    }

    #[tracing::instrument(skip_all)]
    pub async fn evaluate(
        &self,
        model: DynModel,
        dataset: &RouteDataset,
    ) -> Result<EvaluationResults, Error> {
        tracing::info!(
            "starting evaluation of {} on {} samples",
            model.name(),
            dataset.len()
        );

        let results = self.evaluator.evaluate(model, dataset).await?;

        tracing::info!(
            "evaluation completed, overall score: {:.3}, accuracy: {:.3}",
            results.overall_score,
            results.metrics.accuracy
        );

        Ok(results)
    }

    pub fn load_config(&mut self, config_path: &Path) -> Result<(), Error> {
        let config = BenchmarkConfig::from_file(config_path)?;
        self.evaluator = RouteEvaluator::new(config);

        Ok(())
    }

    #[tracing::instrument(skip(self, results))]
    pub fn save_results(&self, results: &EvaluationResults, output_path: &Path) -> Result<(), Error> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(results)?;
        fs::write(output_path, contents)?;

        tracing::info!("results saved to {}", output_path.display());

        Ok(())
    }
}

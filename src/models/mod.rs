mod human_baseline;
mod llm;
pub mod prompt;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::BenchmarkConfig,
    dataset::DataLayout,
    entities::{Prediction, RouteQuery},
    error::Error,
};

pub use human_baseline::{HumanBaselineModel, HUMAN_BASELINE};
pub use llm::LlmModel;

#[async_trait]
pub trait RouteModel: Send + Sync {
    fn name(&self) -> &str;
    fn prepare_input(&self, query: &RouteQuery) -> String;
    async fn predict(&self, query: &RouteQuery) -> Result<Prediction, Error>;
}

pub type DynModel = Arc<dyn RouteModel>;

#[tracing::instrument(skip(api_key, config))]
pub fn initialize_model(
    model_name: &str,
    api_key: Option<String>,
    config: &BenchmarkConfig,
) -> Result<DynModel, Error> {
    if model_name != HUMAN_BASELINE {
        return Ok(Arc::new(LlmModel::new(model_name, api_key, config)?));
    }

    if let Some(path) = &config.annotations_path {
        return Ok(Arc::new(HumanBaselineModel::from_file(path)?));
    }

    let default_path = DataLayout::from_config(config).annotations_path();
    if default_path.is_file() {
        return Ok(Arc::new(HumanBaselineModel::from_file(&default_path)?));
    }

    tracing::warn!("no human annotations found, baseline predictions will be empty");

    Ok(Arc::new(HumanBaselineModel::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Coordinates, Difficulty};
    use tokio_test::block_on;

    #[test]
    fn picks_model_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchmarkConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..BenchmarkConfig::default()
        };

        let baseline = initialize_model(HUMAN_BASELINE, None, &config).unwrap();
        let llm = initialize_model("gpt-4", None, &config).unwrap();

        assert_eq!(baseline.name(), "human_baseline");
        assert_eq!(llm.name(), "gpt-4");
    }

    #[test]
    fn baseline_falls_back_to_sample_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("samples");
        std::fs::create_dir_all(&samples).unwrap();
        std::fs::write(
            samples.join("example_annotations.json"),
            r#"{"r1": {"predicted_route": "over the bridge", "intermediate_points": [[40.5, -73.5]]}}"#,
        )
        .unwrap();
        let config = BenchmarkConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..BenchmarkConfig::default()
        };

        let model = initialize_model(HUMAN_BASELINE, None, &config).unwrap();
        let query = RouteQuery {
            route_id: "r1".into(),
            start_point: Coordinates::new(40.0, -74.0).unwrap(),
            end_point: Coordinates::new(41.0, -73.0).unwrap(),
            difficulty: Difficulty::Easy,
            region: "Test Region".into(),
        };
        let prediction = block_on(model.predict(&query)).unwrap();

        assert_eq!(prediction.predicted_route, "over the bridge");
        assert_eq!(
            prediction.intermediate_points,
            vec![Coordinates::new(40.5, -73.5).unwrap()]
        );
    }

    #[test]
    fn explicit_annotations_must_exist() {
        let config = BenchmarkConfig {
            annotations_path: Some("/nonexistent/annotations.json".into()),
            ..BenchmarkConfig::default()
        };

        let err = initialize_model(HUMAN_BASELINE, None, &config).err().unwrap();
        assert_eq!(err.code, 2);
    }
}

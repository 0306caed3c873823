use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;

use crate::{
    entities::{Prediction, RouteQuery},
    error::{json_file_error, Error},
    models::RouteModel,
};

pub const HUMAN_BASELINE: &str = "human_baseline";

/// Replays pre-collected human annotations keyed by route id.
#[derive(Debug, Default)]
pub struct HumanBaselineModel {
    annotations: HashMap<String, Prediction>,
}

impl HumanBaselineModel {
    pub fn new(annotations: HashMap<String, Prediction>) -> Self {
        Self { annotations }
    }

    #[tracing::instrument]
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read(path)?;
        let annotations: HashMap<String, Prediction> =
            serde_json::from_slice(&contents).map_err(|err| json_file_error(path, err))?;

        tracing::info!(
            "loaded {} human annotations from {}",
            annotations.len(),
            path.display()
        );

        Ok(Self::new(annotations))
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[async_trait]
impl RouteModel for HumanBaselineModel {
    fn name(&self) -> &str {
        HUMAN_BASELINE
    }

    fn prepare_input(&self, query: &RouteQuery) -> String {
        format!(
            "Trace the route you would most likely take from ({}, {}) to ({}, {}) in {}. \
             Describe it step by step and mark the key waypoints on the map.",
            query.start_point.latitude,
            query.start_point.longitude,
            query.end_point.latitude,
            query.end_point.longitude,
            query.region,
        )
    }

    async fn predict(&self, query: &RouteQuery) -> Result<Prediction, Error> {
        match self.annotations.get(&query.route_id) {
            Some(prediction) => Ok(prediction.clone()),
            None => {
                tracing::debug!("no human annotation for route {}", query.route_id);
                Ok(Prediction::empty())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Coordinates, Difficulty};
    use tokio_test::block_on;

    fn query(route_id: &str) -> RouteQuery {
        RouteQuery {
            route_id: route_id.into(),
            start_point: Coordinates::new(40.0, -74.0).unwrap(),
            end_point: Coordinates::new(41.0, -73.0).unwrap(),
            difficulty: Difficulty::Easy,
            region: "Test Region".into(),
        }
    }

    #[test]
    fn replays_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example_annotations.json");
        fs::write(
            &path,
            r#"{"r1": {"predicted_route": "along the river", "confidence": 0.9, "intermediate_points": [[40.5, -73.5]]}}"#,
        )
        .unwrap();

        let model = HumanBaselineModel::from_file(&path).unwrap();
        assert_eq!(model.name(), "human_baseline");
        assert_eq!(model.len(), 1);

        let prediction = block_on(model.predict(&query("r1"))).unwrap();
        assert_eq!(prediction.predicted_route, "along the river");
        assert_eq!(prediction.confidence, 0.9);
        assert_eq!(prediction.intermediate_points.len(), 1);
    }

    #[test]
    fn malformed_annotations_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example_annotations.json");
        fs::write(&path, r#"{"r1": [}"#).unwrap();

        let err = HumanBaselineModel::from_file(&path).unwrap_err();

        assert_eq!(err.code, 6);
        assert!(err.message.contains("example_annotations.json"), "got {}", err);
    }

    #[test]
    fn missing_annotation_is_empty() {
        let model = HumanBaselineModel::default();

        let prediction = block_on(model.predict(&query("unknown"))).unwrap();

        assert_eq!(prediction, Prediction::empty());
        assert!(model.prepare_input(&query("unknown")).contains("Test Region"));
    }
}

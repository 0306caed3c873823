use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Difficulty;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub run_id: Uuid,
    pub model_name: String,
    pub dataset_size: usize,
    pub evaluated_at: DateTime<Utc>,
    pub metrics: Metrics,
    pub overall_score: f64,
    pub failed_predictions: usize,
    pub routes: Vec<RouteScore>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub spatial_accuracy: f64,
    /// Mean deviation from the ground-truth path, in kilometres.
    pub route_deviation: f64,
    pub semantic_similarity: f64,
    pub landmark_recognition: Option<f64>,
    pub by_difficulty: BTreeMap<Difficulty, DifficultyMetrics>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMetrics {
    pub accuracy: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteScore {
    pub route_id: String,
    pub difficulty: Difficulty,
    pub deviation_km: f64,
    pub spatial_accuracy: f64,
    pub semantic_similarity: Option<f64>,
    pub landmark_recognition: Option<f64>,
    pub correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Metrics {
    /// Scalar metrics in display order, `by_difficulty` excluded.
    pub fn summary(&self) -> Vec<(&'static str, f64)> {
        let mut summary = vec![
            ("accuracy", self.accuracy),
            ("spatial_accuracy", self.spatial_accuracy),
            ("route_deviation", self.route_deviation),
            ("semantic_similarity", self.semantic_similarity),
        ];

        if let Some(landmark_recognition) = self.landmark_recognition {
            summary.push(("landmark_recognition", landmark_recognition));
        }

        summary
    }
}

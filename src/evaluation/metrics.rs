use std::collections::{BTreeMap, HashSet};

use geo::{algorithm::Distance, Closest, ClosestPoint, Haversine, LineString, Point};

use crate::{
    config::BenchmarkConfig,
    entities::{Coordinates, Difficulty, DifficultyMetrics, Metrics, Prediction, Route, RouteScore},
};

pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b)) / 1000.0
}

/// Distance in km from `point` to the nearest part of `path`.
pub fn point_deviation_km(point: Coordinates, path: &[Coordinates]) -> f64 {
    let nearest_vertex = path
        .iter()
        .map(|vertex| haversine_km(point, *vertex))
        .fold(f64::INFINITY, f64::min);

    if path.len() < 2 {
        return nearest_vertex;
    }

    let line: LineString<f64> = path.iter().map(|c| geo_types::Coord::from(*c)).collect();
    let target = Point::from(point);

    // projection is planar in lon/lat, so never trust it over a vertex hit
    let projected = match line.closest_point(&target) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => Haversine.distance(target, p) / 1000.0,
        Closest::Indeterminate => f64::INFINITY,
    };

    projected.min(nearest_vertex)
}

fn tokens(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a = tokens(a);
    let b = tokens(b);

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }

    a.intersection(&b).count() as f64 / union as f64
}

pub fn landmark_recall(prediction: &Prediction, landmarks: &[&str]) -> Option<f64> {
    if landmarks.is_empty() {
        return None;
    }

    let haystack = format!("{} {}", prediction.predicted_route, prediction.reasoning).to_lowercase();
    let found = landmarks
        .iter()
        .filter(|landmark| haystack.contains(&landmark.to_lowercase()))
        .count();

    Some(found as f64 / landmarks.len() as f64)
}

pub fn score_route(
    route: &Route,
    prediction: &Prediction,
    error: Option<String>,
    config: &BenchmarkConfig,
) -> RouteScore {
    let path = route.path();
    let max = config.max_deviation_km;
    let tolerance = config.spatial_tolerance_km;

    let deviations: Vec<f64> = prediction
        .intermediate_points
        .iter()
        .map(|point| point_deviation_km(*point, &path).min(max))
        .collect();

    let (deviation_km, spatial_accuracy) = if deviations.is_empty() {
        (max, 0.0)
    } else {
        let n = deviations.len() as f64;
        let within = deviations.iter().filter(|d| **d <= tolerance).count() as f64;
        (deviations.iter().sum::<f64>() / n, within / n)
    };

    RouteScore {
        route_id: route.route_id.clone(),
        difficulty: route.difficulty,
        deviation_km,
        spatial_accuracy,
        semantic_similarity: route
            .description()
            .map(|reference| jaccard_similarity(&prediction.predicted_route, reference)),
        landmark_recognition: landmark_recall(prediction, &route.landmarks()),
        correct: !deviations.is_empty() && deviation_km <= tolerance,
        error,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return None;
    }

    Some(sum / count as f64)
}

pub fn aggregate(scores: &[RouteScore]) -> Metrics {
    let accuracy_of = |subset: &[&RouteScore]| -> f64 {
        if subset.is_empty() {
            return 0.0;
        }
        subset.iter().filter(|s| s.correct).count() as f64 / subset.len() as f64
    };

    let all: Vec<&RouteScore> = scores.iter().collect();

    let mut by_difficulty = BTreeMap::new();
    for difficulty in Difficulty::ALL {
        let subset: Vec<&RouteScore> = all
            .iter()
            .copied()
            .filter(|s| s.difficulty == difficulty)
            .collect();

        by_difficulty.insert(
            difficulty,
            DifficultyMetrics {
                accuracy: accuracy_of(&subset),
                count: subset.len(),
            },
        );
    }

    Metrics {
        accuracy: accuracy_of(&all),
        spatial_accuracy: mean(scores.iter().map(|s| s.spatial_accuracy)).unwrap_or(0.0),
        route_deviation: mean(scores.iter().map(|s| s.deviation_km)).unwrap_or(0.0),
        semantic_similarity: mean(scores.iter().filter_map(|s| s.semantic_similarity))
            .unwrap_or(0.0),
        landmark_recognition: mean(scores.iter().filter_map(|s| s.landmark_recognition)),
        by_difficulty,
    }
}

pub fn overall_score(metrics: &Metrics, config: &BenchmarkConfig) -> f64 {
    let weights = &config.weights;
    let deviation_normalized = (1.0 - metrics.route_deviation / config.max_deviation_km).max(0.0);

    let score = weights.accuracy * metrics.accuracy
        + weights.spatial_accuracy * metrics.spatial_accuracy
        + weights.semantic_similarity * metrics.semantic_similarity
        + weights.route_deviation * deviation_normalized;

    (score * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn c(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates::new(latitude, longitude).unwrap()
    }

    fn route() -> Route {
        Route::new("r1", c(0.0, 0.0), c(0.0, 0.02), Difficulty::Easy, "Equator")
            .with_intermediate_points(vec![c(0.0, 0.01)])
            .with_metadata("description", json!("Head east along the equator"))
            .with_metadata("landmarks", json!(["Lighthouse", "Pier"]))
    }

    fn prediction(points: Vec<Coordinates>) -> Prediction {
        Prediction {
            predicted_route: "head east past the lighthouse".into(),
            confidence: 0.5,
            reasoning: String::new(),
            intermediate_points: points,
        }
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(c(0.0, 0.0), c(1.0, 0.0));

        assert!((d - 111.195).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn deviation_measures_to_segment() {
        let path = vec![c(0.0, 0.0), c(0.0, 1.0)];

        // mid-segment, ~1.11 km north of the line
        let d = point_deviation_km(c(0.01, 0.5), &path);
        assert!((d - 1.112).abs() < 0.01, "got {}", d);

        assert_eq!(point_deviation_km(c(0.0, 0.0), &[c(0.0, 0.0)]), 0.0);
    }

    #[test]
    fn on_path_prediction_is_correct() {
        let config = BenchmarkConfig::default();
        let score = score_route(&route(), &prediction(vec![c(0.0, 0.005), c(0.0, 0.015)]), None, &config);

        assert!(score.deviation_km < 1e-6);
        assert_eq!(score.spatial_accuracy, 1.0);
        assert!(score.correct);
        assert_eq!(score.landmark_recognition, Some(0.5));
        // {head, east, the} shared out of {head, east, along, the, equator, past, lighthouse}
        assert!((score.semantic_similarity.unwrap() - 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn empty_prediction_takes_max_deviation() {
        let config = BenchmarkConfig::default();
        let score = score_route(&route(), &Prediction::empty(), Some("timeout".into()), &config);

        assert_eq!(score.deviation_km, 10.0);
        assert_eq!(score.spatial_accuracy, 0.0);
        assert!(!score.correct);
        assert_eq!(score.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn far_points_are_capped() {
        let config = BenchmarkConfig::default();
        let score = score_route(&route(), &prediction(vec![c(0.0, 0.01), c(10.0, 10.0)]), None, &config);

        assert!((score.deviation_km - 5.0).abs() < 1e-6);
        assert_eq!(score.spatial_accuracy, 0.5);
        assert!(!score.correct);
    }

    #[test]
    fn aggregate_by_difficulty() {
        let config = BenchmarkConfig::default();
        let mut hard = route();
        hard.route_id = "r2".into();
        hard.difficulty = Difficulty::Hard;
        hard.metadata.clear();

        let scores = vec![
            score_route(&route(), &prediction(vec![c(0.0, 0.01)]), None, &config),
            score_route(&hard, &Prediction::empty(), None, &config),
        ];

        let metrics = aggregate(&scores);

        assert_eq!(metrics.accuracy, 0.5);
        assert!((metrics.route_deviation - 5.0).abs() < 1e-6);
        assert_eq!(metrics.by_difficulty[&Difficulty::Easy].accuracy, 1.0);
        assert_eq!(metrics.by_difficulty[&Difficulty::Hard].count, 1);
        assert_eq!(metrics.by_difficulty[&Difficulty::Hard].accuracy, 0.0);
        assert_eq!(metrics.by_difficulty[&Difficulty::Medium].count, 0);
        // only the first route has a description or landmarks
        assert_eq!(metrics.landmark_recognition, Some(0.5));
        assert!((metrics.semantic_similarity - 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn aggregate_of_nothing() {
        let metrics = aggregate(&[]);

        assert_eq!(metrics.accuracy, 0.0);
        assert_eq!(metrics.route_deviation, 0.0);
        assert_eq!(metrics.landmark_recognition, None);
        assert_eq!(metrics.by_difficulty.len(), 3);
    }

    #[test]
    fn overall_score_weights() {
        let config = BenchmarkConfig::default();
        let metrics = Metrics {
            accuracy: 0.75,
            spatial_accuracy: 0.68,
            route_deviation: 2.5,
            semantic_similarity: 0.72,
            ..Metrics::default()
        };

        // 0.225 + 0.204 + 0.144 + 0.15
        assert_eq!(overall_score(&metrics, &config), 0.723);

        let far = Metrics {
            route_deviation: 25.0,
            ..Metrics::default()
        };
        assert_eq!(overall_score(&far, &config), 0.0);
    }

    #[test]
    fn jaccard_edges() {
        assert_eq!(jaccard_similarity("", ""), 0.0);
        assert_eq!(jaccard_similarity("Main St.", "main st"), 1.0);
    }
}

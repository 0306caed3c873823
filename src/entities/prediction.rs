use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::entities::{Coordinates, Difficulty};

/// What a model is allowed to see about a route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub route_id: String,
    pub start_point: Coordinates,
    pub end_point: Coordinates,
    pub difficulty: Difficulty,
    pub region: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub predicted_route: String,
    #[serde(default, deserialize_with = "deserialize_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default, deserialize_with = "deserialize_points")]
    pub intermediate_points: Vec<Coordinates>,
}

impl Prediction {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            predicted_route: text.into(),
            ..Self::default()
        }
    }

    pub fn has_points(&self) -> bool {
        !self.intermediate_points.is_empty()
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);

    if value.is_nan() {
        return Ok(0.0);
    }

    Ok(value.clamp(0.0, 1.0))
}

// invalid waypoints are dropped, the rest of the prediction is kept
fn deserialize_points<'de, D>(deserializer: D) -> Result<Vec<Coordinates>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

    let mut points = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<Coordinates>(value.clone()) {
            Ok(point) => points.push(point),
            Err(err) => tracing::warn!("dropping predicted point {}: {}", value, err),
        }
    }

    Ok(points)
}

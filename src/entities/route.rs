use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::entities::{Coordinates, RouteQuery};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Route {
    #[serde(deserialize_with = "deserialize_route_id")]
    pub route_id: String,
    pub start_point: Coordinates,
    pub end_point: Coordinates,
    #[serde(default)]
    pub intermediate_points: Vec<Coordinates>,
    pub difficulty: Difficulty,
    pub region: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!(
                "unknown difficulty '{}', expected one of easy, medium, hard",
                other
            )),
        }
    }
}

fn deserialize_route_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RouteId {
        Text(String),
        Number(i64),
    }

    match RouteId::deserialize(deserializer)? {
        RouteId::Text(id) => Ok(id),
        RouteId::Number(id) => Ok(id.to_string()),
    }
}

impl Route {
    pub fn new(
        route_id: impl Into<String>,
        start_point: Coordinates,
        end_point: Coordinates,
        difficulty: Difficulty,
        region: impl Into<String>,
    ) -> Self {
        Route {
            route_id: route_id.into(),
            start_point,
            end_point,
            intermediate_points: Vec::new(),
            difficulty,
            region: region.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_intermediate_points(mut self, points: Vec<Coordinates>) -> Self {
        self.intermediate_points = points;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Full ground-truth path: start, waypoints in order, end.
    pub fn path(&self) -> Vec<Coordinates> {
        let mut path = Vec::with_capacity(self.intermediate_points.len() + 2);
        path.push(self.start_point);
        path.extend(self.intermediate_points.iter().copied());
        path.push(self.end_point);
        path
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata.get("description").and_then(Value::as_str)
    }

    pub fn landmarks(&self) -> Vec<&str> {
        match self.metadata.get("landmarks") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn query(&self) -> RouteQuery {
        RouteQuery {
            route_id: self.route_id.clone(),
            start_point: self.start_point,
            end_point: self.end_point,
            difficulty: self.difficulty,
            region: self.region.clone(),
        }
    }
}

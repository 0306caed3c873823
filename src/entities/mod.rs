mod location;
mod prediction;
mod results;
mod route;

pub use location::{Coordinates, InvalidCoordinates};
pub use prediction::{Prediction, RouteQuery};
pub use results::{DifficultyMetrics, EvaluationResults, Metrics, RouteScore};
pub use route::{Difficulty, Route};

use serde_json::json;

use crate::{
    dataset::RouteDataset,
    entities::{Coordinates, Difficulty, Route},
    error::{unexpected_error, Error},
};

pub const DEMO_DATASET: &str = "demo";

/// Ten short routes across lower Manhattan, for smoke runs without data files.
pub fn demo_dataset() -> Result<RouteDataset, Error> {
    let mut routes = Vec::with_capacity(10);

    for i in 0..10 {
        let step = i as f64 * 0.01;
        let start = Coordinates::new(40.7128 + step, -74.0060 + step).map_err(unexpected_error)?;
        let end = Coordinates::new(40.7228 + step, -74.0160 + step).map_err(unexpected_error)?;

        let route = Route::new(
            format!("route_{:03}", i),
            start,
            end,
            Difficulty::ALL[i % 3],
            "New York",
        )
        .with_metadata("sample", json!(true));

        routes.push(route);
    }

    RouteDataset::new(routes)
}

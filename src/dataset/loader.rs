use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    config::BenchmarkConfig,
    dataset::{demo_dataset, RouteDataset, DEMO_DATASET},
    entities::Route,
    error::{invalid_dataset_error, not_found_error, Error},
};

const SEARCH_ORDER: [&str; 3] = ["processed", "samples", "raw"];

#[derive(Clone, Debug, PartialEq)]
pub struct DataLayout {
    pub root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(config.data_dir())
    }

    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let file_name = format!("{}.json", name);

        SEARCH_ORDER
            .iter()
            .map(|subdir| self.root.join(subdir).join(&file_name))
            .collect()
    }

    pub fn annotations_path(&self) -> PathBuf {
        self.root.join("samples").join("example_annotations.json")
    }

    pub fn resolve(&self, name: &str) -> Result<PathBuf, Error> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Ok(direct.to_path_buf());
        }

        let candidates = self.candidates(name);
        if let Some(path) = candidates.iter().find(|path| path.is_file()) {
            return Ok(path.clone());
        }

        let searched: Vec<String> = candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect();

        Err(not_found_error(format!(
            "dataset '{}' (searched {})",
            name,
            searched.join(", ")
        )))
    }
}

#[tracing::instrument]
pub fn load_dataset(name: &str, data_path: Option<&Path>) -> Result<RouteDataset, Error> {
    if name == DEMO_DATASET {
        return demo_dataset();
    }

    let layout = match data_path {
        Some(root) => DataLayout::new(root),
        None => DataLayout::from_config(&BenchmarkConfig::default()),
    };

    let path = layout.resolve(name)?;
    let dataset = read_routes(&path)?;

    tracing::info!("loaded {} routes from {}", dataset.len(), path.display());

    Ok(dataset)
}

fn read_routes(path: &Path) -> Result<RouteDataset, Error> {
    let contents = fs::read(path)?;
    let document: Value =
        serde_json::from_slice(&contents).map_err(|err| invalid_dataset_error(path, err))?;

    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut object) => match object.remove("routes") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(invalid_dataset_error(
                    path,
                    "expected an array of routes or an object with a 'routes' array",
                ))
            }
        },
        _ => {
            return Err(invalid_dataset_error(
                path,
                "expected an array of routes or an object with a 'routes' array",
            ))
        }
    };

    let mut routes = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        let route: Route = serde_json::from_value(record)
            .map_err(|err| invalid_dataset_error(path, format!("record {}: {}", idx, err)))?;
        routes.push(route);
    }

    RouteDataset::new(routes)
}

mod demo;
mod loader;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    entities::{Difficulty, Route},
    error::{duplicate_route_error, Error},
};

pub use demo::{demo_dataset, DEMO_DATASET};
pub use loader::{load_dataset, DataLayout};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteDataset {
    routes: Vec<Route>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub total_routes: usize,
    pub difficulty_distribution: BTreeMap<Difficulty, usize>,
    pub region_distribution: BTreeMap<String, usize>,
}

impl RouteDataset {
    pub fn new(routes: Vec<Route>) -> Result<Self, Error> {
        let mut seen = HashSet::with_capacity(routes.len());
        for route in &routes {
            if !seen.insert(route.route_id.as_str()) {
                return Err(duplicate_route_error(&route.route_id));
            }
        }

        tracing::debug!("initialized dataset with {} routes", routes.len());

        Ok(Self { routes })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Route> {
        self.routes.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn filter_by_difficulty(&self, difficulty: Difficulty) -> RouteDataset {
        self.filter(|route| route.difficulty == difficulty)
    }

    pub fn filter_by_region(&self, region: &str) -> RouteDataset {
        self.filter(|route| route.region == region)
    }

    // subsets of a valid dataset keep unique ids
    fn filter<F: Fn(&Route) -> bool>(&self, predicate: F) -> RouteDataset {
        RouteDataset {
            routes: self.routes.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    pub fn get_statistics(&self) -> DatasetStatistics {
        let mut difficulty_distribution = BTreeMap::new();
        let mut region_distribution = BTreeMap::new();

        for route in &self.routes {
            *difficulty_distribution.entry(route.difficulty).or_insert(0) += 1;
            *region_distribution
                .entry(route.region.clone())
                .or_insert(0) += 1;
        }

        DatasetStatistics {
            total_routes: self.routes.len(),
            difficulty_distribution,
            region_distribution,
        }
    }
}

impl<'a> IntoIterator for &'a RouteDataset {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Coordinates;

    fn sample_routes() -> Vec<Route> {
        (0..5)
            .map(|i| {
                let offset = i as f64;
                Route::new(
                    format!("test_route_{}", i),
                    Coordinates::new(40.0 + offset, -74.0 + offset).unwrap(),
                    Coordinates::new(41.0 + offset, -73.0 + offset).unwrap(),
                    Difficulty::ALL[i % 3],
                    if i < 4 { "Test Region" } else { "Elsewhere" },
                )
            })
            .collect()
    }

    #[test]
    fn length_and_indexing() {
        let dataset = RouteDataset::new(sample_routes()).unwrap();

        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.get(0).unwrap().route_id, "test_route_0");
        assert_eq!(dataset.get(0).unwrap().difficulty, Difficulty::Easy);
        assert!(dataset.get(5).is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut routes = sample_routes();
        routes[3].route_id = "test_route_1".into();

        let err = RouteDataset::new(routes).unwrap_err();
        assert_eq!(err.code, 104);
        assert!(err.message.contains("test_route_1"));
    }

    #[test]
    fn filters_preserve_order() {
        let dataset = RouteDataset::new(sample_routes()).unwrap();

        let easy = dataset.filter_by_difficulty(Difficulty::Easy);
        let ids: Vec<_> = easy.iter().map(|r| r.route_id.as_str()).collect();
        assert_eq!(ids, vec!["test_route_0", "test_route_3"]);

        assert_eq!(dataset.filter_by_region("Test Region").len(), 4);
        assert!(dataset.filter_by_region("test region").is_empty());
    }

    #[test]
    fn statistics() {
        let stats = RouteDataset::new(sample_routes()).unwrap().get_statistics();

        assert_eq!(stats.total_routes, 5);
        assert_eq!(stats.difficulty_distribution[&Difficulty::Easy], 2);
        assert_eq!(stats.difficulty_distribution[&Difficulty::Medium], 2);
        assert_eq!(stats.difficulty_distribution[&Difficulty::Hard], 1);
        assert_eq!(stats.region_distribution["Test Region"], 4);
        assert_eq!(stats.region_distribution["Elsewhere"], 1);
    }

    #[test]
    fn statistics_of_empty_dataset() {
        let stats = RouteDataset::default().get_statistics();

        assert_eq!(stats.total_routes, 0);
        assert!(stats.difficulty_distribution.is_empty());
        assert!(stats.region_distribution.is_empty());
    }
}

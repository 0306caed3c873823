pub mod benchmark;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod entities;
pub mod error;
pub mod evaluation;
pub mod external;
pub mod models;

pub use benchmark::TurnBackBenchmark;
pub use dataset::{load_dataset, RouteDataset};
pub use evaluation::{evaluate_model, RouteEvaluator};
pub use models::{HumanBaselineModel, LlmModel, RouteModel};

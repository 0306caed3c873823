mod handlers;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{entities::Difficulty, error::Error};

/// TurnBack: geospatial route cognition benchmark for large language models
#[derive(Debug, Parser)]
#[command(name = "turnback", version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a model on a dataset
    Evaluate(EvaluateArgs),
    /// Show dataset information
    Info(InfoArgs),
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Model name (e.g. gpt-4, llama2, human_baseline)
    #[arg(long)]
    pub model: String,

    /// Dataset name, or a path to a dataset file
    #[arg(long, default_value = "turnback_routes")]
    pub dataset: String,

    /// Filter by difficulty level
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Filter by geographic region
    #[arg(long)]
    pub region: Option<String>,

    /// API key for model access
    #[arg(long)]
    pub api_key: Option<String>,

    /// Output file for results
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Root of the data directory layout
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Maximum number of concurrent predictions
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Dataset name, or a path to a dataset file
    #[arg(long, default_value = "turnback_routes")]
    pub dataset: String,

    /// Root of the data directory layout
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Evaluate(args) => handlers::evaluate::run(args).await,
        Command::Info(args) => handlers::info::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluate() {
        let cli = Cli::try_parse_from([
            "turnback",
            "-v",
            "evaluate",
            "--model",
            "gpt-4",
            "--difficulty",
            "hard",
            "--concurrency",
            "2",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Evaluate(args) => {
                assert_eq!(args.model, "gpt-4");
                assert_eq!(args.dataset, "turnback_routes");
                assert_eq!(args.difficulty, Some(Difficulty::Hard));
                assert_eq!(args.concurrency, Some(2));
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_difficulty_and_missing_model() {
        assert!(Cli::try_parse_from(["turnback", "evaluate", "--model", "m", "--difficulty", "brutal"]).is_err());
        assert!(Cli::try_parse_from(["turnback", "evaluate"]).is_err());
        assert!(Cli::try_parse_from(["turnback"]).is_err());
    }
}

use crate::{
    benchmark::TurnBackBenchmark,
    cli::EvaluateArgs,
    config::BenchmarkConfig,
    dataset::load_dataset,
    entities::EvaluationResults,
    error::Error,
    models::initialize_model,
};

#[tracing::instrument(skip_all, fields(model = %args.model, dataset = %args.dataset))]
pub async fn run(args: EvaluateArgs) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => BenchmarkConfig::from_file(path)?,
        None => BenchmarkConfig::default(),
    };

    if let Some(data_dir) = args.data_dir {
        config.data_dir = Some(data_dir);
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }

    tracing::info!("loading dataset: {}", args.dataset);
    let data_dir = config.data_dir();
    let mut dataset = load_dataset(&args.dataset, Some(data_dir.as_path()))?;

    if let Some(difficulty) = args.difficulty {
        tracing::info!("filtering by difficulty: {}", difficulty);
        dataset = dataset.filter_by_difficulty(difficulty);
    }

    if let Some(region) = &args.region {
        tracing::info!("filtering by region: {}", region);
        dataset = dataset.filter_by_region(region);
    }

    tracing::info!("dataset size after filtering: {}", dataset.len());

    let model = initialize_model(&args.model, args.api_key, &config)?;
    let benchmark = TurnBackBenchmark::new(Some(config));

    let results = benchmark.evaluate(model, &dataset).await?;

    print!("{}", render_summary(&results));

    if let Some(output) = &args.output {
        benchmark.save_results(&results, output)?;
        println!("\nResults saved to: {}", output.display());
    }

    Ok(())
}

fn render_summary(results: &EvaluationResults) -> String {
    let mut out = String::new();

    out.push_str(&format!("\nEvaluation Results for {}\n", results.model_name));
    out.push_str(&format!("Overall Score: {:.3}\n", results.overall_score));
    out.push_str(&format!("Dataset Size: {}\n", results.dataset_size));
    if results.failed_predictions > 0 {
        out.push_str(&format!(
            "Failed Predictions: {}\n",
            results.failed_predictions
        ));
    }

    out.push_str("\nMetrics:\n");
    for (name, value) in results.metrics.summary() {
        out.push_str(&format!("  {}: {:.3}\n", name, value));
    }

    out.push_str("\nBy Difficulty:\n");
    for (difficulty, metrics) in &results.metrics.by_difficulty {
        out.push_str(&format!(
            "  {}: accuracy={:.3}, count={}\n",
            difficulty, metrics.accuracy, metrics.count
        ));
    }

    out
}

use crate::{
    cli::InfoArgs,
    config::BenchmarkConfig,
    dataset::{load_dataset, DatasetStatistics},
    error::Error,
};

pub fn run(args: InfoArgs) -> Result<(), Error> {
    let config = BenchmarkConfig {
        data_dir: args.data_dir,
        ..BenchmarkConfig::default()
    };

    let dataset = load_dataset(&args.dataset, Some(config.data_dir().as_path()))?;

    print!("{}", render_statistics(&args.dataset, &dataset.get_statistics()));

    Ok(())
}

fn render_statistics(name: &str, stats: &DatasetStatistics) -> String {
    let mut out = format!("Dataset: {}\nTotal Routes: {}\n", name, stats.total_routes);

    out.push_str("\nDifficulty Distribution:\n");
    for (difficulty, count) in &stats.difficulty_distribution {
        out.push_str(&format!("  {}: {}\n", difficulty, count));
    }

    out.push_str("\nRegion Distribution:\n");
    for (region, count) in &stats.region_distribution {
        out.push_str(&format!("  {}: {}\n", region, count));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::demo_dataset;

    #[test]
    fn renders_demo_statistics() {
        let stats = demo_dataset().unwrap().get_statistics();

        let out = render_statistics("demo", &stats);

        assert!(out.starts_with("Dataset: demo\nTotal Routes: 10\n"));
        assert!(out.contains("  easy: 4\n  medium: 3\n  hard: 3\n"));
        assert!(out.contains("  New York: 10\n"));
    }
}

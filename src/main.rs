use std::process;

use clap::Parser;
use tracing::Level;

use turnback::cli::{self, Cli};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Cli::parse();
    let verbose = args.verbose;

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli::run(args).await {
        tracing::error!("{}", err);
        if verbose {
            eprintln!("{:?}", err);
        }
        process::exit(1);
    }
}

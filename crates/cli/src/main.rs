//! `run-pipeline` - telemetry analytics pipeline CLI

use analytics_pipeline::Config;
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "run-pipeline")]
#[command(about = "Runs the telemetry analytics pipeline end to end")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: Config,
}

fn main() -> Result<()> {
    analytics_tracing::init();
    let cli = Cli::parse();

    if let Err(err) = analytics_pipeline::run(&cli.config) {
        eprintln!("run-pipeline: aborted: {err}");
        std::process::exit(1);
    }
    Ok(())
}

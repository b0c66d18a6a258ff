use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

mod config;
mod core;
mod gateway;
mod logging;
mod pipeline;

use config::RunConfig;

fn main() {
    logging::setup_logging();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .context("usage: trip-distribution <input-file> [output-file]")?;
    let output = args.next().map(PathBuf::from);

    info!("Starting trip distribution run for {:?}", input);
    let config = RunConfig::load();

    let summary = pipeline::run(&input, output.as_deref(), &config.slice)?;

    info!(
        "Run complete: {} zones, {} trips, results written to {:?}",
        summary.zone_count, summary.total_trips, summary.output_path
    );
    Ok(())
}

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use daily_brief::output::{write_digest, write_index};
use daily_brief::{BriefConfig, Fetcher, IngestionPipeline, RunState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Collect new feed and arXiv items into a dated Markdown digest.
#[derive(Debug, Parser)]
#[command(name = "daily-brief", version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    /// Seen-set state file, created on first run
    #[arg(long, default_value = "data/state.json")]
    state: PathBuf,

    /// Pointer page linking to the latest digest
    #[arg(long, default_value = "docs/index.md")]
    index: PathBuf,

    /// Print the digest instead of writing the digest, index and state
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    info!("Starting daily brief run");

    let config = BriefConfig::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let fetcher = Arc::new(Fetcher::new(config.http.clone()).context("building HTTP client")?);
    let pipeline = IngestionPipeline::from_config(&config, fetcher)?;

    let state = RunState::load(&cli.state);
    let (state, run) = pipeline.run(state, Utc::now()).await;

    if cli.dry_run {
        println!("{}", run.document);
        info!("Dry run: nothing written");
        return Ok(());
    }

    let digest_path = write_digest(&config.output_dir, &run.date, &run.document)
        .with_context(|| format!("writing digest to {}", config.output_dir.display()))?;
    write_index(&cli.index, &run.date, &digest_path)
        .with_context(|| format!("writing index {}", cli.index.display()))?;
    state
        .save(&cli.state)
        .with_context(|| format!("saving state to {}", cli.state.display()))?;

    println!("Generated: {}", digest_path.display());
    Ok(())
}

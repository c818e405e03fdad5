use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use log::info;
use pop_insights::display::{Palette, render_report};
use pop_insights::{
    EngineConfig, FilterConfiguration, RecordSnapshot, SearchSession, SyntheticPopulation,
    load_snapshot_async,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "insight-report",
    version,
    about = "Filter patient and insight records and print population statistics."
)]
struct Args {
    /// Patient records: a .json or .parquet file, or a directory of them
    #[arg(long, requires = "insights", conflicts_with = "synthetic")]
    patients: Option<PathBuf>,

    /// Insight records: a .json or .parquet file, or a directory of them
    #[arg(long, requires = "patients")]
    insights: Option<PathBuf>,

    /// Generate a synthetic population of this size instead of loading one
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for the synthetic population
    #[arg(long, requires = "synthetic")]
    seed: Option<u64>,

    /// Filter configuration as JSON; omitted means no constraint
    #[arg(long)]
    filter: Option<PathBuf>,

    /// Engine configuration as JSON; environment overrides still apply
    #[arg(long)]
    config: Option<PathBuf>,

    /// HRSN category driving the geographic estimates
    #[arg(long)]
    focus: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn read_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    let base = match path {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read engine configuration {}", path.display()))?;
            serde_json::from_str::<EngineConfig>(&data)
                .with_context(|| format!("Invalid engine configuration {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    Ok(base.with_overrides(|key| std::env::var(key).ok()))
}

fn read_filter(path: Option<&PathBuf>) -> anyhow::Result<FilterConfiguration> {
    let Some(path) = path else {
        return Ok(FilterConfiguration::unconstrained());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read filter configuration {}", path.display()))?;
    FilterConfiguration::from_json(&data)
        .with_context(|| format!("Invalid filter configuration {}", path.display()))
}

async fn read_snapshot(args: &Args, config: &EngineConfig) -> anyhow::Result<RecordSnapshot> {
    match (&args.patients, &args.insights, args.synthetic) {
        (Some(patients), Some(insights), _) => load_snapshot_async(patients, insights, config)
            .await
            .context("Failed to load records"),
        (_, _, Some(size)) => {
            let mut population = SyntheticPopulation::new(size);
            if let Some(seed) = args.seed {
                population = population.with_seed(seed);
            }
            Ok(population.snapshot())
        }
        _ => bail!("Provide --patients and --insights, or --synthetic <N>"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = read_config(args.config.as_ref())?;
    info!("{config}");

    let filter = read_filter(args.filter.as_ref())?;

    let start = Instant::now();
    let snapshot = read_snapshot(&args, &config).await?;
    info!(
        "Snapshot generation {} ready with {} patients and {} insights in {:?}",
        snapshot.generation(),
        snapshot.patients().len(),
        snapshot.insights().len(),
        start.elapsed()
    );

    let mut session = SearchSession::new(&snapshot);
    let report = session
        .run(&snapshot, &filter, &config, args.focus.as_deref())
        .context("Search result was superseded")?;

    match args.format {
        OutputFormat::Text => {
            let palette = Palette::default().with_levels(config.bucket_levels);
            print!("{}", render_report(&report, &palette));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

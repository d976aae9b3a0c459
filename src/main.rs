use anyhow::{Context, Result};
use flinsurance::{pipeline, PipelineConfig};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    // ─── init logging ────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    match summarize() {
        Ok(()) => {
            println!("Processing completed successfully.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn summarize() -> Result<()> {
    let config = PipelineConfig::default();
    let summary = pipeline::run(&config)
        .with_context(|| format!("summarizing {}", config.archive_path.display()))?;
    info!(
        counties = summary.distinct_counties,
        rows_kept = summary.stats.rows_kept(),
        "done"
    );
    Ok(())
}

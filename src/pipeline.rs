use rust_decimal::Decimal;
use std::time::Instant;
use tracing::{info, instrument};

use crate::aggregate::{count_distinct_counties, rank_by_tiv_change, total_tiv_2012, CountyChange};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::process::{load_insurance_zip, LoadStats};
use crate::report::{render_count, render_ranking, render_total, write_report};

/// What a completed run computed and wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub stats: LoadStats,
    pub distinct_counties: usize,
    pub total_tiv_2012: Decimal,
    pub ranking: Vec<CountyChange>,
}

/// Load the archive, then compute and write each report in turn.
///
/// Stops at the first failure. Reports written before the failure stay on
/// disk; later ones are never created.
#[instrument(level = "info", skip(config), fields(archive = %config.archive_path.display()))]
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let loaded = load_insurance_zip(config.archive_path())?;
    let records = &loaded.records;
    info!(records = records.len(), "loaded");

    let distinct_counties = count_distinct_counties(records);
    write_report(&config.count_path(), &render_count(distinct_counties))?;

    let total = total_tiv_2012(records)?;
    write_report(&config.total_path(), &render_total(total))?;

    let ranking = rank_by_tiv_change(records, config.top_n)?;
    write_report(&config.ranking_path(), &render_ranking(&ranking))?;

    info!(
        distinct_counties,
        total = %total,
        elapsed = ?start.elapsed(),
        "reports written"
    );
    Ok(RunSummary {
        stats: loaded.stats,
        distinct_counties,
        total_tiv_2012: total,
        ranking,
    })
}

use rust_decimal::{Decimal, RoundingStrategy};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::aggregate::CountyChange;
use crate::error::{PipelineError, Result};

/// Header line of the ranking report. "country" is the established label.
pub const RANKING_HEADER: &str = "country,value";

/// Two decimals, `.` separator, no grouping, ties rounded away from zero.
///
/// A negative value that rounds to zero prints as `0.00`, never `-0.00`,
/// unlike `%.2f` applied to a signed decimal.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // -0.001 rounds to "0.00", not "-0.00"
        rounded.set_sign_positive(true);
    }
    // pads 5 to 5.00; never rounds here since scale is already at most 2
    rounded.rescale(2);
    rounded.to_string()
}

pub fn render_count(count: usize) -> String {
    count.to_string()
}

pub fn render_total(total: Decimal) -> String {
    format_amount(total)
}

/// Header plus one `<county>,<value>` line per entry, no trailing newline.
pub fn render_ranking(ranking: &[CountyChange]) -> String {
    std::iter::once(RANKING_HEADER.to_string())
        .chain(
            ranking
                .iter()
                .map(|c| format!("{},{}", c.county, format_amount(c.change))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `contents` to `path` as-is, replacing any existing file.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| PipelineError::io(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote report");
    Ok(())
}

// src/process/mod.rs
use csv::{ByteRecord, ReaderBuilder};
use rust_decimal::Decimal;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;
use tracing::{debug, instrument, trace};

use crate::archive;
use crate::error::{PipelineError, Result};

pub mod columns;
pub mod utils;

use columns::{ColumnIndex, RecordColumns};
use utils::{decode_field, effective_width, parse_amount, AmountError};

/// One insured property: a valid data row of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    county: String,
    tiv_2011: Decimal,
    tiv_2012: Decimal,
}

impl Record {
    pub fn new(county: impl Into<String>, tiv_2011: Decimal, tiv_2012: Decimal) -> Self {
        Self {
            county: county.into(),
            tiv_2011,
            tiv_2012,
        }
    }

    pub fn county(&self) -> &str {
        &self.county
    }

    pub fn tiv_2011(&self) -> Decimal {
        self.tiv_2011
    }

    pub fn tiv_2012(&self) -> Decimal {
        self.tiv_2012
    }

    /// Year-over-year change, `tiv_2012 - tiv_2011`.
    ///
    /// `None` only if the difference leaves `Decimal`'s range.
    pub fn tiv_change(&self) -> Option<Decimal> {
        self.tiv_2012().checked_sub(self.tiv_2011())
    }

    fn from_fields(row: &ByteRecord, cols: RecordColumns) -> std::result::Result<Self, RowError> {
        if effective_width(row) < cols.min_width() {
            return Err(RowError::Rejected(RowRejection::TooFewFields));
        }
        let field = |i: usize| row.get(i).unwrap_or_default();
        let amount = |i: usize, column: &'static str| {
            parse_amount(field(i)).map_err(|e| match e {
                AmountError::NotANumber => RowError::Rejected(RowRejection::BadNumber),
                AmountError::OutOfRange => RowError::OutOfRange(column),
            })
        };

        let county = decode_field(field(cols.county)).trim().to_string();
        let tiv_2011 = amount(cols.tiv_2011, columns::TIV_2011)?;
        let tiv_2012 = amount(cols.tiv_2012, columns::TIV_2012)?;
        Ok(Self::new(county, tiv_2011, tiv_2012))
    }
}

/// Row-level problems that drop the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowRejection {
    TooFewFields,
    BadNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowError {
    Rejected(RowRejection),
    /// A well-formed amount `Decimal` cannot hold; fatal for the run.
    OutOfRange(&'static str),
}

/// Counters collected while loading; they never affect the aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data lines seen after the header.
    pub rows_read: u64,
    /// Lines dropped for covering too few columns.
    pub short_rows: u64,
    /// Lines dropped for an unparsable `tiv_2011`/`tiv_2012`.
    pub bad_numbers: u64,
}

impl LoadStats {
    pub fn rows_kept(&self) -> u64 {
        self.rows_read - self.short_rows - self.bad_numbers
    }

    fn reject(&mut self, reason: RowRejection) {
        match reason {
            RowRejection::TooFewFields => self.short_rows += 1,
            RowRejection::BadNumber => self.bad_numbers += 1,
        }
    }
}

/// Output of the loader: valid records in file order plus the discard tally.
#[derive(Debug, Default)]
pub struct Loaded {
    pub records: Vec<Record>,
    pub stats: LoadStats,
}

/// Parse the decoded CSV stream into records.
///
/// The first physical line is the header and must name `county`, `tiv_2011`
/// and `tiv_2012`; a blank first line names none of them. Fields are split
/// on bare commas: quotes have no special meaning, so a county containing a
/// comma shifts the remaining columns. Rows that are too short or carry a
/// non-numeric amount are dropped without an error. An amount that is a
/// valid number but too large for `Decimal` aborts with
/// [`PipelineError::Overflow`].
pub fn load_records<R: Read>(reader: R) -> Result<Loaded> {
    let mut reader = BufReader::new(reader);
    let mut first = Vec::new();
    if reader
        .read_until(b'\n', &mut first)
        .map_err(csv::Error::from)?
        == 0
    {
        return Ok(Loaded::default());
    }

    // the header ends at the first `\r` or `\n`; whatever follows goes back to the CSV reader
    let end = first
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .unwrap_or(first.len());
    let rest = first.split_off(end);
    let cols = ColumnIndex::from_header(first.split(|&b| b == b',')).resolve()?;
    debug!(?cols, "resolved header columns");

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(Cursor::new(rest).chain(reader));

    let mut loaded = Loaded::default();
    for row in rdr.byte_records() {
        let row = row?;
        loaded.stats.rows_read += 1;
        let row_no = loaded.stats.rows_read;
        match Record::from_fields(&row, cols) {
            Ok(record) => loaded.records.push(record),
            Err(RowError::Rejected(reason)) => {
                trace!(row = row_no, ?reason, "dropping row");
                loaded.stats.reject(reason);
            }
            Err(RowError::OutOfRange(column)) => {
                return Err(PipelineError::Overflow {
                    what: format!("{column} in data row {row_no}"),
                });
            }
        }
    }

    Ok(loaded)
}

/// Load every valid record from the first entry of the ZIP at `zip_path`.
#[instrument(level = "info", skip(zip_path), fields(path = %zip_path.as_ref().display()))]
pub fn load_insurance_zip<P: AsRef<Path>>(zip_path: P) -> Result<Loaded> {
    let loaded = archive::with_first_entry(zip_path, |entry| load_records(entry))?;
    debug!(
        rows_read = loaded.stats.rows_read,
        rows_kept = loaded.stats.rows_kept(),
        short_rows = loaded.stats.short_rows,
        bad_numbers = loaded.stats.bad_numbers,
        "loaded records"
    );
    Ok(loaded)
}

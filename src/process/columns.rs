use std::collections::HashMap;

use crate::error::{PipelineError, Result};
use crate::process::utils::decode_field;

pub const COUNTY: &str = "county";
pub const TIV_2011: &str = "tiv_2011";
pub const TIV_2012: &str = "tiv_2012";

/// Header name → position, built from the first CSV line.
#[derive(Debug, Default)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Names are trimmed; on duplicates the last position wins.
    pub fn from_header<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let positions = fields
            .into_iter()
            .enumerate()
            .map(|(i, raw)| (decode_field(raw).trim().to_string(), i))
            .collect();
        Self { positions }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Resolve the three columns a [`Record`](crate::process::Record) is built from.
    pub fn resolve(&self) -> Result<RecordColumns> {
        let lookup: Vec<(&str, Option<usize>)> = [COUNTY, TIV_2011, TIV_2012]
            .into_iter()
            .map(|name| (name, self.get(name)))
            .collect();

        match lookup.as_slice() {
            [(_, Some(county)), (_, Some(tiv_2011)), (_, Some(tiv_2012))] => Ok(RecordColumns {
                county: *county,
                tiv_2011: *tiv_2011,
                tiv_2012: *tiv_2012,
            }),
            _ => Err(PipelineError::MissingColumns {
                missing: lookup
                    .iter()
                    .filter(|(_, pos)| pos.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            }),
        }
    }
}

/// Resolved positions of the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordColumns {
    pub county: usize,
    pub tiv_2011: usize,
    pub tiv_2012: usize,
}

impl RecordColumns {
    /// Fewest fields a data line needs to cover every required column.
    pub fn min_width(&self) -> usize {
        self.county.max(self.tiv_2011).max(self.tiv_2012) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(line: &str) -> ColumnIndex {
        ColumnIndex::from_header(line.split(',').map(str::as_bytes))
    }

    #[test]
    fn resolves_columns_in_any_order_with_padding() {
        let cols = header("policyID, tiv_2012 ,statecode,county,tiv_2011")
            .resolve()
            .unwrap();
        assert_eq!(
            cols,
            RecordColumns {
                county: 3,
                tiv_2011: 4,
                tiv_2012: 1
            }
        );
        assert_eq!(cols.min_width(), 5);
    }

    #[test]
    fn last_duplicate_wins() {
        let idx = header("county,tiv_2011,tiv_2012,county");
        assert_eq!(idx.get("county"), Some(3));
    }

    #[test]
    fn reports_every_missing_column() {
        let err = header("county,tiv_2012").resolve().unwrap_err();
        match err {
            PipelineError::MissingColumns { missing } => assert_eq!(missing, vec!["tiv_2011"]),
            other => panic!("unexpected error: {other}"),
        }

        let err = header("policyID").resolve().unwrap_err();
        match err {
            PipelineError::MissingColumns { missing } => {
                assert_eq!(missing, vec!["county", "tiv_2011", "tiv_2012"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(header("County,tiv_2011,tiv_2012").resolve().is_err());
    }
}

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::error::{PipelineError, Result};
use crate::process::Record;

/// A county and its summed `tiv_2012 - tiv_2011`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyChange {
    pub county: String,
    pub change: Decimal,
}

/// Number of distinct county names (exact, case-sensitive).
pub fn count_distinct_counties(records: &[Record]) -> usize {
    records
        .iter()
        .map(Record::county)
        .collect::<HashSet<_>>()
        .len()
}

/// Exact decimal sum of `tiv_2012` over every record.
pub fn total_tiv_2012(records: &[Record]) -> Result<Decimal> {
    records.iter().try_fold(Decimal::ZERO, |acc, r| {
        acc.checked_add(r.tiv_2012()).ok_or_else(|| overflow("tiv_2012"))
    })
}

/// Counties ordered by summed year-over-year change, largest first, at most
/// `limit` of them.
///
/// Equal changes keep the order in which their counties first appear in
/// `records`.
pub fn rank_by_tiv_change(records: &[Record], limit: usize) -> Result<Vec<CountyChange>> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CountyChange> = Vec::new();

    for r in records {
        let change = r
            .tiv_change()
            .ok_or_else(|| overflow(format!("tiv change for {}", r.county())))?;
        let slot = *slots.entry(r.county()).or_insert_with(|| {
            groups.push(CountyChange {
                county: r.county().to_string(),
                change: Decimal::ZERO,
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.change = group
            .change
            .checked_add(change)
            .ok_or_else(|| overflow(format!("tiv change for {}", r.county())))?;
    }

    // stable: ties stay in first-seen order
    groups.sort_by(|a, b| b.change.cmp(&a.change));
    groups.truncate(limit);
    Ok(groups)
}

fn overflow(what: impl Into<String>) -> PipelineError {
    PipelineError::Overflow { what: what.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rec(county: &str, tiv_2011: &str, tiv_2012: &str) -> Record {
        Record::new(county, dec(tiv_2011), dec(tiv_2012))
    }

    fn sample() -> Vec<Record> {
        vec![
            rec("Dade", "100.00", "150.00"),
            rec("Dade", "50.00", "40.00"),
            rec("Lee", "10.00", "5.00"),
        ]
    }

    #[test]
    fn counts_distinct_counties() {
        assert_eq!(count_distinct_counties(&sample()), 2);
        assert_eq!(count_distinct_counties(&[]), 0);
        // case-sensitive
        let records = vec![rec("Dade", "1", "1"), rec("DADE", "1", "1")];
        assert_eq!(count_distinct_counties(&records), 2);
    }

    #[test]
    fn totals_tiv_2012() {
        assert_eq!(total_tiv_2012(&sample()).unwrap(), dec("195"));
        assert_eq!(total_tiv_2012(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn total_has_no_binary_float_drift() {
        let records: Vec<Record> = (0..10_000).map(|_| rec("Dade", "0", "0.1")).collect();
        assert_eq!(total_tiv_2012(&records).unwrap(), dec("1000"));

        let naive: f64 = (0..10_000).map(|_| 0.1_f64).sum();
        assert_ne!(naive, 1000.0);
    }

    #[test]
    fn total_overflow_is_an_error() {
        let big = Decimal::MAX;
        let records = vec![
            Record::new("Dade", Decimal::ZERO, big),
            Record::new("Dade", Decimal::ZERO, big),
        ];
        assert!(matches!(
            total_tiv_2012(&records),
            Err(PipelineError::Overflow { .. })
        ));
    }

    #[test]
    fn ranks_by_summed_change() {
        let ranked = rank_by_tiv_change(&sample(), 10).unwrap();
        assert_eq!(
            ranked,
            vec![
                CountyChange {
                    county: "Dade".into(),
                    change: dec("40")
                },
                CountyChange {
                    county: "Lee".into(),
                    change: dec("-5")
                },
            ]
        );
    }

    #[test]
    fn keeps_top_n_descending() {
        let records: Vec<Record> = (0..15)
            .map(|i| rec(&format!("C{i}"), "0", &i.to_string()))
            .collect();
        let ranked = rank_by_tiv_change(&records, 10).unwrap();
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].county, "C14");
        assert_eq!(ranked[9].county, "C5");
        assert!(ranked.windows(2).all(|w| w[0].change >= w[1].change));
    }

    #[test]
    fn ties_keep_first_appearance() {
        let records = vec![
            rec("Polk", "0", "1"),
            rec("Lee", "0", "5"),
            rec("Dade", "0", "1"),
            rec("Clay", "1", "2"),
        ];
        let counties: Vec<String> = rank_by_tiv_change(&records, 10)
            .unwrap()
            .into_iter()
            .map(|c| c.county)
            .collect();
        assert_eq!(counties, vec!["Lee", "Polk", "Dade", "Clay"]);
    }

    #[test]
    fn group_sums_match_recomputation() {
        let records = vec![
            rec("Dade", "1.10", "2.20"),
            rec("Lee", "3", "1"),
            rec("Dade", "0.05", "0.10"),
            rec("Lee", "0.3", "0.1"),
        ];
        for group in rank_by_tiv_change(&records, 10).unwrap() {
            let expected: Decimal = records
                .iter()
                .filter(|r| r.county() == group.county)
                .map(|r| r.tiv_2012() - r.tiv_2011())
                .sum();
            assert_eq!(group.change, expected);
        }
    }
}

// overlap.rs - Duplicate and overlap checks between two barcode lists

use crate::data::loaders::TwoColumnLists;
use crate::data::population::validate_entries;
use crate::data::Barcode;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashSet;

/// Repeats within each list and barcodes present in both
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlapReport {
    pub first_len: usize,
    pub second_len: usize,
    /// Barcodes occurring more than once in the first list, first-seen order
    pub first_repeated: Vec<Barcode>,
    pub second_repeated: Vec<Barcode>,
    /// Barcodes of the second list also in the first, in second-list order
    pub shared: Vec<Barcode>,
}

impl OverlapReport {
    pub fn is_clean(&self) -> bool {
        self.first_repeated.is_empty() && self.second_repeated.is_empty() && self.shared.is_empty()
    }

    /// One-line summary for the console
    pub fn summary(&self) -> String {
        format!(
            "{} barcodes are repeated in list 1, {} barcodes are repeated in list 2, and {} barcodes are shared between lists",
            self.first_repeated.len(),
            self.second_repeated.len(),
            self.shared.len()
        )
    }
}

/// Barcodes seen more than once, each reported once
fn repeated(barcodes: &[Barcode]) -> Vec<Barcode> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    barcodes
        .iter()
        .filter(|b| !seen.insert(*b) && reported.insert(*b))
        .cloned()
        .collect()
}

/// Compare two lists of length-`k` barcodes.
///
/// Both lists are validated before anything is compared, so a malformed entry
/// in either list fails the whole check.
pub fn check_lists(lists: &TwoColumnLists, k: usize) -> Result<OverlapReport> {
    let first = validate_entries(&lists.first, k)?;
    let second = validate_entries(&lists.second, k)?;

    let first_set: HashSet<&Barcode> = first.iter().collect();
    let mut reported = HashSet::new();
    let shared = second
        .iter()
        .filter(|b| first_set.contains(b) && reported.insert(*b))
        .cloned()
        .collect();

    Ok(OverlapReport {
        first_len: first.len(),
        second_len: second.len(),
        first_repeated: repeated(&first),
        second_repeated: repeated(&second),
        shared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loaders::csv::parse_two_column_lists;
    use crate::error::BarcodeError;

    fn names(barcodes: &[Barcode]) -> Vec<&str> {
        barcodes.iter().map(|b| b.as_str()).collect()
    }

    #[test]
    fn test_repeats_and_shared() {
        let input = "ACGT,TTTT\nACGT,GGCC\nTGCA,acgt\nGATC,TTTT\nACGT,TTTT\n,TGCA\n";
        let lists = parse_two_column_lists(input.as_bytes()).unwrap();
        let report = check_lists(&lists, 4).unwrap();

        assert_eq!(report.first_len, 5);
        assert_eq!(report.second_len, 6);
        assert_eq!(names(&report.first_repeated), vec!["ACGT"]);
        assert_eq!(names(&report.second_repeated), vec!["TTTT"]);
        assert_eq!(names(&report.shared), vec!["ACGT", "TGCA"]);
        assert_eq!(
            report.summary(),
            "1 barcodes are repeated in list 1, 1 barcodes are repeated in list 2, and 2 barcodes are shared between lists"
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_disjoint_lists_are_clean() {
        let lists = parse_two_column_lists("ACGT,TTGG\nTGCA,GGTT\n".as_bytes()).unwrap();
        let report = check_lists(&lists, 4).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_length_checked_before_comparison() {
        let lists = parse_two_column_lists("ACGT,TTGG\nTGCA,GGT\n".as_bytes()).unwrap();
        let err = check_lists(&lists, 4).unwrap_err();
        assert!(matches!(err, BarcodeError::InvalidLength { actual: 3, line: 2, .. }));
    }
}

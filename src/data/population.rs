// population.rs - Append-only, duplicate-free barcode population

use crate::data::barcode::Barcode;
use crate::data::loaders::ListEntry;
use crate::error::{BarcodeError, Result};
use std::collections::HashSet;
use tracing::warn;

/// Barcodes that appeared more than once in an input list, each listed once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub duplicates: Vec<Barcode>,
}

impl DuplicateReport {
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.duplicates.len()
    }
}

/// Ordered set of barcodes sharing one length `k`.
///
/// Only grows: barcodes are appended, never edited or removed.
#[derive(Debug, Clone)]
pub struct BarcodePopulation {
    k: usize,
    barcodes: Vec<Barcode>,
    members: HashSet<Barcode>,
}

/// Check one raw entry against the fixed length and the alphabet
pub fn validate_entry(entry: &ListEntry, k: usize) -> Result<Barcode> {
    let actual = entry.value.chars().count();
    if actual != k {
        return Err(BarcodeError::InvalidLength {
            barcode: entry.value.clone(),
            expected: k,
            actual,
            line: entry.line,
        });
    }
    Barcode::parse(&entry.value)
}

/// Validate every entry, stopping at the first offending one
pub fn validate_entries(entries: &[ListEntry], k: usize) -> Result<Vec<Barcode>> {
    entries.iter().map(|entry| validate_entry(entry, k)).collect()
}

/// Split a validated list into its unique members (first occurrence kept, in
/// order) and the barcodes that occur more than once.
pub fn split_duplicates(barcodes: Vec<Barcode>) -> (Vec<Barcode>, DuplicateReport) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut uniques = Vec::with_capacity(barcodes.len());
    let mut report = DuplicateReport::default();

    for barcode in barcodes {
        if seen.insert(barcode.clone()) {
            uniques.push(barcode);
        } else if reported.insert(barcode.clone()) {
            report.duplicates.push(barcode);
        }
    }

    (uniques, report)
}

impl BarcodePopulation {
    /// Create an empty population of barcode length `k`
    pub fn new(k: usize) -> Self {
        Self {
            k,
            barcodes: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Build the unique working set from raw list entries.
    ///
    /// Wrong length or foreign symbols abort with an error naming the entry;
    /// duplicates are only reported.
    pub fn from_entries(entries: &[ListEntry], k: usize) -> Result<(Self, DuplicateReport)> {
        let barcodes = validate_entries(entries, k)?;
        let (uniques, report) = split_duplicates(barcodes);

        for barcode in &report.duplicates {
            warn!("barcode {} appears more than once in the input list", barcode);
        }

        let mut population = Self::new(k);
        for barcode in uniques {
            population.push(barcode)?;
        }
        Ok((population, report))
    }

    /// Convenience constructor numbering entries from line 1
    pub fn from_strs<S: AsRef<str>>(raw: &[S], k: usize) -> Result<(Self, DuplicateReport)> {
        let entries: Vec<ListEntry> = raw
            .iter()
            .enumerate()
            .map(|(i, s)| ListEntry {
                line: i + 1,
                value: s.as_ref().to_string(),
            })
            .collect();
        Self::from_entries(&entries, k)
    }

    /// Append a barcode, keeping the length and uniqueness invariants
    pub fn push(&mut self, barcode: Barcode) -> Result<()> {
        if barcode.len() != self.k {
            return Err(BarcodeError::InvalidLength {
                expected: self.k,
                actual: barcode.len(),
                barcode: barcode.to_string(),
                line: self.barcodes.len() + 1,
            });
        }
        if !self.members.insert(barcode.clone()) {
            return Err(BarcodeError::DuplicateBarcode(barcode.to_string()));
        }
        self.barcodes.push(barcode);
        Ok(())
    }

    pub fn contains(&self, barcode: &Barcode) -> bool {
        self.members.contains(barcode)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.barcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barcodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Barcode> {
        self.barcodes.iter()
    }

    pub fn as_slice(&self) -> &[Barcode] {
        &self.barcodes
    }
}

impl<'a> IntoIterator for &'a BarcodePopulation {
    type Item = &'a Barcode;
    type IntoIter = std::slice::Iter<'a, Barcode>;

    fn into_iter(self) -> Self::IntoIter {
        self.barcodes.iter()
    }
}

// frequency.rs - Position-wise nucleotide composition of a barcode population

use crate::data::{Barcode, Nucleotide};
use crate::error::{BarcodeError, Result};
use serde::Serialize;

/// Round a percentage to one decimal place.
///
/// Rounds the exact binary value, sending exact ties to the even digit
/// (6.25 -> 6.2, 18.75 -> 18.8), the way `{:.1}` formats it.
fn round_percent(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Nucleotide counts and percentages at one barcode position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionProbability {
    /// 1-based position
    pub position: usize,
    /// Counts indexed by [`Nucleotide::index`]
    pub counts: [usize; 4],
    /// Percentages rounded to one decimal; rounding error is not redistributed
    pub percentages: [f64; 4],
}

impl PositionProbability {
    fn from_counts(position: usize, counts: [usize; 4]) -> Self {
        let total: usize = counts.iter().sum();
        let mut percentages = [0.0; 4];
        if total > 0 {
            for (pct, &count) in percentages.iter_mut().zip(counts.iter()) {
                *pct = round_percent(count as f64 / total as f64 * 100.0);
            }
        }
        Self {
            position,
            counts,
            percentages,
        }
    }

    pub fn percent(&self, base: Nucleotide) -> f64 {
        self.percentages[base.index()]
    }

    /// (base, percentage) pairs in A, G, C, T order
    pub fn pairs(&self) -> [(Nucleotide, f64); 4] {
        Nucleotide::ALL.map(|base| (base, self.percent(base)))
    }
}

/// Empirical nucleotide frequencies for every position 1..=k
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    rows: Vec<PositionProbability>,
}

impl FrequencyTable {
    /// Tally the unique population column by column
    pub fn from_population(barcodes: &[Barcode]) -> Result<Self> {
        let first = barcodes.first().ok_or(BarcodeError::EmptyPopulation)?;
        let k = first.len();

        let mut counts = vec![[0usize; 4]; k];
        for barcode in barcodes {
            if barcode.len() != k {
                return Err(BarcodeError::LengthMismatch {
                    left: first.to_string(),
                    right: barcode.to_string(),
                });
            }
            for (column, base) in counts.iter_mut().zip(barcode.bases()) {
                column[base.index()] += 1;
            }
        }

        let rows = counts
            .into_iter()
            .enumerate()
            .map(|(i, column)| PositionProbability::from_counts(i + 1, column))
            .collect();

        Ok(Self { rows })
    }

    /// Row for a 1-based position
    pub fn row(&self, position: usize) -> Option<&PositionProbability> {
        position.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    pub fn rows(&self) -> &[PositionProbability] {
        &self.rows
    }

    /// Barcode length the table describes
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

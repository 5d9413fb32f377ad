// distance.rs - Pairwise Hamming distance analysis over a barcode population

use crate::data::Barcode;
use crate::error::{BarcodeError, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

/// Default threshold below which a pair is reported as too close
pub const DEFAULT_WARN_THRESHOLD: usize = 2;

/// Number of positions at which two sequences differ, ignoring case.
///
/// Fails when the lengths differ.
pub fn hamming_distance(a: &str, b: &str) -> Result<usize> {
    if a.len() != b.len() {
        return Err(BarcodeError::LengthMismatch {
            left: a.to_string(),
            right: b.to_string(),
        });
    }

    Ok(a.bytes()
        .zip(b.bytes())
        .filter(|(x, y)| !x.eq_ignore_ascii_case(y))
        .count())
}

/// Median of a set of distances; the mean of the two central values for even
/// counts. `None` for an empty set.
pub fn median(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    } else {
        Some(sorted[mid] as f64)
    }
}

/// Distance summary for one barcode against the rest of the population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceStat {
    pub barcode: Barcode,
    pub median_distance: f64,
    pub min_distance: usize,
}

/// Unordered pair of barcodes closer than the warning threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadPair {
    pub first: Barcode,
    pub second: Barcode,
    pub distance: usize,
}

/// Result of analysing a population
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    /// Per-barcode statistics ranked by ascending median (worst-connected first)
    pub stats: Vec<DistanceStat>,
    pub bad_pairs: Vec<BadPair>,
    /// Mean of the per-barcode medians; the initial generation target
    pub mean_median: f64,
    /// Smallest distance between any two barcodes
    pub global_min: usize,
}

/// Computes all pairwise Hamming distances and derived statistics
#[derive(Debug, Clone, Copy)]
pub struct HammingAnalyzer {
    warn_threshold: usize,
}

impl Default for HammingAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_WARN_THRESHOLD)
    }
}

impl HammingAnalyzer {
    pub fn new(warn_threshold: usize) -> Self {
        Self { warn_threshold }
    }

    pub fn warn_threshold(&self) -> usize {
        self.warn_threshold
    }

    /// Distances from `candidate` to every member of `population`, in order
    pub fn distances_to(candidate: &Barcode, population: &[Barcode]) -> Result<Vec<usize>> {
        population
            .iter()
            .map(|member| hamming_distance(member.as_str(), candidate.as_str()))
            .collect()
    }

    /// Full symmetric distance matrix with a zero diagonal
    pub fn distance_matrix(barcodes: &[Barcode]) -> Result<Vec<Vec<usize>>> {
        let n = barcodes.len();

        // Upper triangle in parallel; collect keeps (i, j) order deterministic
        let upper_triangle: Vec<(usize, usize, usize)> = (0..n)
            .into_par_iter()
            .flat_map(|i| {
                (i + 1..n).into_par_iter().map(move |j| {
                    hamming_distance(barcodes[i].as_str(), barcodes[j].as_str()).map(|d| (i, j, d))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut matrix = vec![vec![0; n]; n];
        for (i, j, distance) in upper_triangle {
            matrix[i][j] = distance;
            matrix[j][i] = distance;
        }
        Ok(matrix)
    }

    /// Analyse a population of unique barcodes.
    ///
    /// Needs at least two barcodes: with a single one there are no pairs and
    /// the statistics are undefined.
    pub fn analyze(&self, barcodes: &[Barcode]) -> Result<DistanceReport> {
        if barcodes.len() < 2 {
            return Err(BarcodeError::TooFewBarcodes {
                found: barcodes.len(),
            });
        }

        let matrix = Self::distance_matrix(barcodes)?;
        let n = barcodes.len();

        let mut stats = Vec::with_capacity(n);
        let mut bad_pairs = Vec::new();

        for (i, row) in matrix.iter().enumerate() {
            let others: Vec<usize> = row
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &d)| d)
                .collect();

            // Both are Some: others has n - 1 >= 1 entries
            let median_distance = median(&others).unwrap_or(0.0);
            let min_distance = others.iter().copied().min().unwrap_or(0);

            stats.push(DistanceStat {
                barcode: barcodes[i].clone(),
                median_distance,
                min_distance,
            });

            for (j, &distance) in row.iter().enumerate().skip(i + 1) {
                if distance < self.warn_threshold {
                    bad_pairs.push(BadPair {
                        first: barcodes[i].clone(),
                        second: barcodes[j].clone(),
                        distance,
                    });
                }
            }
        }

        let mean_median = stats.iter().map(|s| s.median_distance).sum::<f64>() / n as f64;
        let global_min = stats.iter().map(|s| s.min_distance).min().unwrap_or(0);

        // Stable sort keeps input order among equal medians
        stats.sort_by(|a, b| {
            a.median_distance
                .partial_cmp(&b.median_distance)
                .unwrap_or(Ordering::Equal)
        });

        Ok(DistanceReport {
            stats,
            bad_pairs,
            mean_median,
            global_min,
        })
    }
}

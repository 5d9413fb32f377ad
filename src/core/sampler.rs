// sampler.rs - Composition-balancing nucleotide sampler

use crate::core::frequency::{FrequencyTable, PositionProbability};
use crate::data::{Barcode, Nucleotide};
use crate::error::{BarcodeError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;

/// Create the generator RNG, seeded for reproducible runs or from OS entropy
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Sampling weights that favour the least frequent bases.
///
/// Bases are sorted by ascending frequency (stable, so ties keep A, G, C, T
/// order) and the sorted frequencies are handed out in reverse: the rarest
/// base receives the largest frequency as its weight. This swaps ranks; it is
/// not a `1/p` inversion.
pub fn rank_inverted_weights(row: &PositionProbability) -> [(Nucleotide, f64); 4] {
    let mut sorted = row.pairs();
    sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let mut weights = sorted;
    for (slot, (_, p)) in weights.iter_mut().zip(sorted.iter().rev()) {
        slot.1 = *p;
    }
    weights
}

/// Draws bases position by position from rank-inverted weights
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    positions: Vec<([Nucleotide; 4], WeightedIndex<f64>)>,
}

impl WeightedSampler {
    /// Precompute one weighted distribution per position of `table`
    pub fn new(table: &FrequencyTable) -> Result<Self> {
        let positions = table
            .rows()
            .iter()
            .map(|row| {
                let weights = rank_inverted_weights(row);
                let symbols = weights.map(|(base, _)| base);
                let index = WeightedIndex::new(weights.iter().map(|(_, w)| *w)).map_err(|e| {
                    BarcodeError::Sampling(format!(
                        "No usable weights at position {}: {}",
                        row.position, e
                    ))
                })?;
                Ok((symbols, index))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { positions })
    }

    /// Number of positions, i.e. the length of sampled barcodes
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Draw one base for the 0-based `position`
    pub fn sample_position<R: Rng + ?Sized>(&self, rng: &mut R, position: usize) -> Nucleotide {
        let (symbols, index) = &self.positions[position];
        symbols[index.sample(rng)]
    }

    /// Draw a full-length candidate, each position independently
    pub fn sample_barcode<R: Rng + ?Sized>(&self, rng: &mut R) -> Barcode {
        let bases: Vec<Nucleotide> = (0..self.positions.len())
            .map(|position| self.sample_position(rng, position))
            .collect();
        Barcode::from_nucleotides(&bases)
    }
}

/// Draw a single base for one position row
pub fn sample_nucleotide<R: Rng + ?Sized>(rng: &mut R, row: &PositionProbability) -> Result<Nucleotide> {
    let weights = rank_inverted_weights(row);
    let index = WeightedIndex::new(weights.iter().map(|(_, w)| *w)).map_err(|e| {
        BarcodeError::Sampling(format!("No usable weights at position {}: {}", row.position, e))
    })?;
    Ok(weights[index.sample(rng)].0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(raw: &[&str]) -> FrequencyTable {
        let barcodes: Vec<Barcode> = raw.iter().map(|s| Barcode::parse(s).unwrap()).collect();
        FrequencyTable::from_population(&barcodes).unwrap()
    }

    #[test]
    fn test_rank_swap_not_reciprocal() {
        // Position 1 of ACGT/TGCA/ACGA: A=66.7, G=0, C=0, T=33.3
        let t = table(&["ACGT", "TGCA", "ACGA"]);
        let weights = rank_inverted_weights(t.row(1).unwrap());

        assert_eq!(
            weights,
            [
                (Nucleotide::G, 66.7),
                (Nucleotide::C, 33.3),
                (Nucleotide::T, 0.0),
                (Nucleotide::A, 0.0),
            ]
        );
    }

    #[test]
    fn test_uniform_row_keeps_uniform_weights() {
        let t = table(&["A", "G", "C", "T"]);
        let weights = rank_inverted_weights(t.row(1).unwrap());
        for (_, w) in weights {
            assert_eq!(w, 25.0);
        }
    }

    #[test]
    fn test_draws_favour_rare_bases() {
        // A=60, G=30, C=10, T=0 -> T gets 60, C gets 30, G gets 10, A gets 0
        let raw: Vec<String> = std::iter::repeat("A")
            .take(6)
            .chain(std::iter::repeat("G").take(3))
            .chain(std::iter::once("C"))
            .map(String::from)
            .collect();
        let refs: Vec<&str> = raw.iter().map(|s| s.as_str()).collect();
        let t = table(&refs);

        let mut rng = create_rng(Some(7));
        let mut counts = [0usize; 4];
        for _ in 0..5000 {
            let base = sample_nucleotide(&mut rng, t.row(1).unwrap()).unwrap();
            counts[base.index()] += 1;
        }

        assert_eq!(counts[Nucleotide::A.index()], 0);
        assert!(counts[Nucleotide::T.index()] > counts[Nucleotide::C.index()]);
        assert!(counts[Nucleotide::C.index()] > counts[Nucleotide::G.index()]);
    }

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let t = table(&["ACGTACGT", "TTGACCAG", "GATCGATC", "CCATGGTA"]);
        let sampler = WeightedSampler::new(&t).unwrap();

        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        let first: Vec<Barcode> = (0..20).map(|_| sampler.sample_barcode(&mut rng1)).collect();
        let second: Vec<Barcode> = (0..20).map(|_| sampler.sample_barcode(&mut rng2)).collect();

        assert_eq!(first, second);
        assert!(first.iter().all(|b| b.len() == 8));
    }
}

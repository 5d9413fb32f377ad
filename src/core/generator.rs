// generator.rs - Adaptive rejection sampling of new barcodes

use crate::core::distance::{median, HammingAnalyzer};
use crate::core::sampler::WeightedSampler;
use crate::data::{Barcode, BarcodePopulation};
use crate::error::{BarcodeError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use tracing::{debug, trace};

pub const DEFAULT_MIN_HAMMING: usize = 2;
pub const DEFAULT_MAX_TRIES: usize = 10;
/// Longest allowed run of one base; runs of 4 or more are rejected
pub const DEFAULT_MAX_HOMOPOLYMER: usize = 3;
/// Generation gives up once the relaxed target falls below this
pub const DEFAULT_MIN_TARGET: f64 = 3.0;

/// Acceptance constraints and relaxation policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Every distance to the population must be at least this
    pub min_hamming: usize,
    /// Failed attempts allowed before the target is lowered by one
    pub max_tries: usize,
    pub max_homopolymer: usize,
    pub min_target: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_hamming: DEFAULT_MIN_HAMMING,
            max_tries: DEFAULT_MAX_TRIES,
            max_homopolymer: DEFAULT_MAX_HOMOPOLYMER,
            min_target: DEFAULT_MIN_TARGET,
        }
    }
}

/// Why a candidate was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Duplicate,
    Homopolymer,
    MinDistance,
    MedianDistance,
}

/// Rejection counts per reason. Diagnostic only; every reason counts the same
/// towards relaxation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionTally {
    pub duplicate: usize,
    pub homopolymer: usize,
    pub min_distance: usize,
    pub median_distance: usize,
}

impl RejectionTally {
    pub fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Duplicate => self.duplicate += 1,
            Rejection::Homopolymer => self.homopolymer += 1,
            Rejection::MinDistance => self.min_distance += 1,
            Rejection::MedianDistance => self.median_distance += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.duplicate + self.homopolymer + self.min_distance + self.median_distance
    }
}

impl AddAssign for RejectionTally {
    fn add_assign(&mut self, other: Self) {
        self.duplicate += other.duplicate;
        self.homopolymer += other.homopolymer;
        self.min_distance += other.min_distance;
        self.median_distance += other.median_distance;
    }
}

/// States of one generation call
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorState {
    Searching { target: f64, tries: usize },
    Accepted(Barcode),
    Failed,
}

/// Result of one generation call. A failure carries no barcode, so it cannot
/// be mistaken for one.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Accepted {
        barcode: Barcode,
        attempts: usize,
        /// Target in force when the barcode was accepted
        target: f64,
        rejections: RejectionTally,
    },
    Failed {
        attempts: usize,
        /// Last target tried before falling below the floor
        last_target: f64,
        rejections: RejectionTally,
    },
}

impl GenerationOutcome {
    pub fn barcode(&self) -> Option<&Barcode> {
        match self {
            GenerationOutcome::Accepted { barcode, .. } => Some(barcode),
            GenerationOutcome::Failed { .. } => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, GenerationOutcome::Accepted { .. })
    }

    pub fn attempts(&self) -> usize {
        match self {
            GenerationOutcome::Accepted { attempts, .. } | GenerationOutcome::Failed { attempts, .. } => *attempts,
        }
    }

    pub fn rejections(&self) -> RejectionTally {
        match self {
            GenerationOutcome::Accepted { rejections, .. } | GenerationOutcome::Failed { rejections, .. } => *rejections,
        }
    }
}

/// Proposes candidates with a [`WeightedSampler`] and accepts the first one
/// meeting the distance and composition constraints, lowering the median
/// target after every `max_tries` failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarcodeGenerator {
    config: GeneratorConfig,
}

impl BarcodeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Check a candidate against the population and the current target.
    ///
    /// `None` means the candidate is acceptable.
    pub fn check_candidate(
        &self,
        candidate: &Barcode,
        population: &BarcodePopulation,
        target: f64,
    ) -> Result<Option<Rejection>> {
        if population.contains(candidate) {
            return Ok(Some(Rejection::Duplicate));
        }
        if candidate.has_homopolymer(self.config.max_homopolymer) {
            return Ok(Some(Rejection::Homopolymer));
        }

        let distances = HammingAnalyzer::distances_to(candidate, population.as_slice())?;
        let min_distance = distances.iter().copied().min().ok_or(BarcodeError::EmptyPopulation)?;
        let median_distance = median(&distances).ok_or(BarcodeError::EmptyPopulation)?;

        if min_distance < self.config.min_hamming {
            return Ok(Some(Rejection::MinDistance));
        }
        if median_distance < target {
            return Ok(Some(Rejection::MedianDistance));
        }
        Ok(None)
    }

    /// Generate one barcode that fits `population`.
    ///
    /// Starts at `target_dist` and runs until a candidate is accepted or the
    /// relaxed target drops below `min_target`, so at most
    /// `max_tries * (target_dist - min_target + 1)` candidates are drawn.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        population: &BarcodePopulation,
        target_dist: f64,
        sampler: &WeightedSampler,
        rng: &mut R,
    ) -> Result<GenerationOutcome> {
        if population.is_empty() {
            return Err(BarcodeError::EmptyPopulation);
        }
        if sampler.len() != population.k() {
            return Err(BarcodeError::Config(format!(
                "Sampler covers {} positions but barcodes have length {}",
                sampler.len(),
                population.k()
            )));
        }

        let mut state = GeneratorState::Searching {
            target: target_dist,
            tries: 0,
        };
        // Target of the most recent draw
        let mut tried_target = target_dist;
        let mut attempts = 0;
        let mut rejections = RejectionTally::default();

        loop {
            state = match state {
                GeneratorState::Searching { mut target, mut tries } => {
                    if tries >= self.config.max_tries {
                        target -= 1.0;
                        tries = 0;
                        debug!("relaxing median target to {} after {} attempts", target, attempts);
                    }
                    // Floor check after the relax step, before drawing
                    if target < self.config.min_target {
                        GeneratorState::Failed
                    } else {
                        attempts += 1;
                        tried_target = target;
                        let candidate = sampler.sample_barcode(rng);
                        match self.check_candidate(&candidate, population, target)? {
                            None => GeneratorState::Accepted(candidate),
                            Some(rejection) => {
                                trace!("rejected {} ({:?})", candidate, rejection);
                                rejections.record(rejection);
                                GeneratorState::Searching {
                                    target,
                                    tries: tries + 1,
                                }
                            }
                        }
                    }
                }
                GeneratorState::Accepted(barcode) => {
                    debug!("accepted {} after {} attempts at target {}", barcode, attempts, tried_target);
                    return Ok(GenerationOutcome::Accepted {
                        barcode,
                        attempts,
                        target: tried_target,
                        rejections,
                    });
                }
                GeneratorState::Failed => {
                    debug!("giving up after {} attempts at target {}", attempts, tried_target);
                    return Ok(GenerationOutcome::Failed {
                        attempts,
                        last_target: tried_target,
                        rejections,
                    });
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frequency::FrequencyTable;
    use crate::core::sampler::create_rng;
    use proptest::prelude::*;

    fn population(raw: &[&str]) -> BarcodePopulation {
        let k = raw[0].len();
        BarcodePopulation::from_strs(raw, k).unwrap().0
    }

    fn sampler_for(population: &BarcodePopulation) -> WeightedSampler {
        let table = FrequencyTable::from_population(population.as_slice()).unwrap();
        WeightedSampler::new(&table).unwrap()
    }

    #[test]
    fn test_homopolymer_candidate_always_rejected() {
        let pop = population(&["CTGCATGC", "GCTGCTAC"]);
        let generator = BarcodeGenerator::default();
        let candidate = Barcode::parse("AAAAGCTA").unwrap();

        // Far from everything, yet rejected for the run of four
        let rejection = generator.check_candidate(&candidate, &pop, 0.0).unwrap();
        assert_eq!(rejection, Some(Rejection::Homopolymer));
    }

    #[test]
    fn test_check_candidate_reasons() {
        let pop = population(&["ACGTACGT", "TGCATGCA"]);
        let generator = BarcodeGenerator::default();

        let dup = Barcode::parse("acgtacgt").unwrap();
        assert_eq!(generator.check_candidate(&dup, &pop, 3.0).unwrap(), Some(Rejection::Duplicate));

        // One mismatch from ACGTACGT
        let close = Barcode::parse("ACGTACGA").unwrap();
        assert_eq!(generator.check_candidate(&close, &pop, 3.0).unwrap(), Some(Rejection::MinDistance));

        // Distances 8 and 8: median 8
        let far = Barcode::parse("GATCGATC").unwrap();
        assert_eq!(generator.check_candidate(&far, &pop, 8.0).unwrap(), None);
        assert_eq!(generator.check_candidate(&far, &pop, 8.5).unwrap(), Some(Rejection::MedianDistance));
    }

    #[test]
    fn test_target_below_floor_fails_without_sampling() {
        let pop = population(&["ACGTACGT", "TGCATGCA"]);
        let sampler = sampler_for(&pop);
        let mut rng = create_rng(Some(1));

        let outcome = BarcodeGenerator::default()
            .generate(&pop, 2.9, &sampler, &mut rng)
            .unwrap();
        match outcome {
            GenerationOutcome::Failed { attempts, .. } => assert_eq!(attempts, 0),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_relaxes_until_reachable() {
        // Every sampled base differs from both members at its position, so each
        // candidate sits at distance 8 from both and only the target decides.
        let pop = population(&["ACGTACGT", "TGCATGCA"]);
        let sampler = sampler_for(&pop);
        let mut rng = create_rng(Some(99));

        let outcome = BarcodeGenerator::default()
            .generate(&pop, 11.0, &sampler, &mut rng)
            .unwrap();
        match outcome {
            GenerationOutcome::Accepted {
                barcode,
                attempts,
                target,
                rejections,
            } => {
                // 11, 10 and 9 are out of reach: three relax steps of 10 tries
                assert_eq!(attempts, 31);
                assert_eq!(target, 8.0);
                assert_eq!(rejections.median_distance, 30);
                assert_eq!(rejections.total(), 30);
                assert_eq!(barcode.len(), 8);
                assert!(!pop.contains(&barcode));
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_constraints_fail_within_bound() {
        let pop = population(&["ACGTACGT", "TGCATGCA"]);
        let sampler = sampler_for(&pop);
        let mut rng = create_rng(Some(5));
        let generator = BarcodeGenerator::new(GeneratorConfig {
            min_hamming: 9,
            ..GeneratorConfig::default()
        });

        let outcome = generator.generate(&pop, 5.0, &sampler, &mut rng).unwrap();
        match outcome {
            GenerationOutcome::Failed {
                attempts,
                last_target,
                rejections,
            } => {
                // max_tries * (target_dist - 2)
                assert_eq!(attempts, 30);
                assert_eq!(last_target, 3.0);
                assert_eq!(rejections.min_distance, 30);
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(outcome.barcode().is_none());
    }

    #[test]
    fn test_rejects_empty_population() {
        let pop = BarcodePopulation::new(8);
        let table = FrequencyTable::from_population(&[Barcode::parse("ACGTACGT").unwrap()]).unwrap();
        let sampler = WeightedSampler::new(&table).unwrap();
        let mut rng = create_rng(Some(1));

        let err = BarcodeGenerator::default()
            .generate(&pop, 4.0, &sampler, &mut rng)
            .unwrap_err();
        assert!(matches!(err, BarcodeError::EmptyPopulation));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_accepted_barcodes_meet_constraints(seed in any::<u64>()) {
            let pop = population(&[
                "ACGTACGT", "TTGACCAG", "GATCGATC", "CCATGGTA",
                "AGCTTCGA", "GTCAAGCT", "CATGCTAG", "TCAGGACT",
            ]);
            let sampler = sampler_for(&pop);
            let generator = BarcodeGenerator::default();
            let mut rng = create_rng(Some(seed));

            let outcome = generator.generate(&pop, 5.0, &sampler, &mut rng).unwrap();
            if let Some(barcode) = outcome.barcode() {
                let distances = HammingAnalyzer::distances_to(barcode, pop.as_slice()).unwrap();
                prop_assert_eq!(barcode.len(), 8);
                prop_assert!(!pop.contains(barcode));
                prop_assert!(!barcode.has_homopolymer(3));
                prop_assert!(distances.iter().all(|&d| d >= 2));
                prop_assert!(outcome.attempts() <= 10 * 3);
            }
        }
    }
}

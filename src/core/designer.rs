// designer.rs - Set evaluation and sequential extension of a barcode population

use crate::core::distance::{DistanceReport, HammingAnalyzer};
use crate::core::frequency::FrequencyTable;
use crate::core::generator::{BarcodeGenerator, GenerationOutcome, GeneratorConfig, RejectionTally};
use crate::core::sampler::WeightedSampler;
use crate::data::{Barcode, BarcodePopulation};
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use tracing::{info, warn};

/// Distance statistics and composition of the original population
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: DistanceReport,
    pub table: FrequencyTable,
}

impl Evaluation {
    /// Starting median target for every generation request
    pub fn target(&self) -> f64 {
        self.report.mean_median
    }
}

/// Population grown by a design run, plus one outcome per request in order
#[derive(Debug, Clone)]
pub struct DesignResult {
    pub population: BarcodePopulation,
    pub outcomes: Vec<GenerationOutcome>,
    pub target: f64,
}

impl DesignResult {
    /// Accepted barcodes in generation order; failures are skipped
    pub fn new_barcodes(&self) -> Vec<&Barcode> {
        self.outcomes.iter().filter_map(|o| o.barcode()).collect()
    }

    pub fn accepted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.accepted()
    }

    pub fn total_attempts(&self) -> usize {
        self.outcomes.iter().map(|o| o.attempts()).sum()
    }

    pub fn rejections(&self) -> RejectionTally {
        let mut tally = RejectionTally::default();
        for outcome in &self.outcomes {
            tally += outcome.rejections();
        }
        tally
    }
}

/// Evaluates a population and extends it one barcode at a time
#[derive(Debug, Clone)]
pub struct BarcodeSetDesigner {
    analyzer: HammingAnalyzer,
    generator: BarcodeGenerator,
    show_progress: bool,
}

impl BarcodeSetDesigner {
    /// Pairs closer than `config.min_hamming` are reported as bad pairs
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            analyzer: HammingAnalyzer::new(config.min_hamming),
            generator: BarcodeGenerator::new(config),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn generator(&self) -> &BarcodeGenerator {
        &self.generator
    }

    pub fn evaluate(&self, population: &BarcodePopulation) -> Result<Evaluation> {
        let report = self.analyzer.analyze(population.as_slice())?;
        let table = FrequencyTable::from_population(population.as_slice())?;

        for pair in &report.bad_pairs {
            warn!(
                "barcodes {} and {} are only {} apart (threshold {})",
                pair.first,
                pair.second,
                pair.distance,
                self.analyzer.warn_threshold()
            );
        }
        info!(
            "evaluated {} barcodes: mean median {:.3}, minimum {}, {} bad pairs",
            population.len(),
            report.mean_median,
            report.global_min,
            report.bad_pairs.len()
        );

        Ok(Evaluation { report, table })
    }

    /// Run `count` generation requests against a growing population.
    ///
    /// The target and frequency table come from `evaluation` and stay fixed;
    /// each accepted barcode is appended before the next request so later
    /// candidates are checked against it. Failed requests add nothing.
    pub fn design<R: Rng + ?Sized>(
        &self,
        mut population: BarcodePopulation,
        evaluation: &Evaluation,
        count: usize,
        rng: &mut R,
    ) -> Result<DesignResult> {
        let target = evaluation.target();
        let sampler = WeightedSampler::new(&evaluation.table)?;

        let pb = if self.show_progress {
            let pb = ProgressBar::new(count as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut outcomes = Vec::with_capacity(count);
        for request in 0..count {
            let outcome = self.generator.generate(&population, target, &sampler, rng)?;

            match &outcome {
                GenerationOutcome::Accepted { barcode, .. } => {
                    population.push(barcode.clone())?;
                }
                GenerationOutcome::Failed {
                    attempts,
                    last_target,
                    ..
                } => {
                    warn!(
                        "request {} failed after {} attempts (last target {})",
                        request + 1,
                        attempts,
                        last_target
                    );
                }
            }

            outcomes.push(outcome);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let result = DesignResult {
            population,
            outcomes,
            target,
        };
        info!(
            "generated {} of {} barcodes in {} attempts",
            result.accepted(),
            count,
            result.total_attempts()
        );
        Ok(result)
    }
}

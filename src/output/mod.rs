// mod.rs - Report writers for evaluation and design runs

use crate::core::{BadPair, DesignResult, DistanceReport, Evaluation, FrequencyTable, RejectionTally};
use crate::data::{Barcode, DuplicateReport, Nucleotide};
use crate::error::{BarcodeError, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DISTRIBUTIONS_FILE: &str = "barcode_nt_distributions.csv";
pub const DISTANCES_FILE: &str = "barcode_distances.csv";
pub const BAD_PAIRS_FILE: &str = "bad_pairs.csv";

/// Where a run writes its files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub distributions: PathBuf,
    pub distances: PathBuf,
    pub bad_pairs: PathBuf,
    pub new_barcodes: PathBuf,
}

impl OutputPaths {
    /// Fixed report names under `dir`, new barcodes in `<outname>.csv`
    pub fn new(dir: &Path, outname: &str) -> Self {
        Self {
            distributions: dir.join(DISTRIBUTIONS_FILE),
            distances: dir.join(DISTANCES_FILE),
            bad_pairs: dir.join(BAD_PAIRS_FILE),
            new_barcodes: dir.join(format!("{}.csv", outname)),
        }
    }
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                BarcodeError::Input(format!(
                    "Failed to create parent directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

fn create_file(file_path: &Path) -> Result<BufWriter<File>> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| {
        BarcodeError::Input(format!(
            "Failed to create output file '{}': {}",
            file_path.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn csv_writer(file_path: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    Ok(WriterBuilder::new()
        .has_headers(false)
        .from_writer(create_file(file_path)?))
}

/// Percentages per position, columns in A, G, C, T order
pub fn write_frequency_table(file_path: &Path, table: &FrequencyTable) -> Result<()> {
    let mut writer = csv_writer(file_path)?;

    let mut header = vec!["position".to_string()];
    header.extend(Nucleotide::ALL.iter().map(|n| n.to_string()));
    writer.write_record(&header)?;

    for row in table.rows() {
        let mut record = vec![row.position.to_string()];
        record.extend(row.percentages.iter().map(|p| format!("{:.1}", p)));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    println!("✅ Nucleotide distributions written to: {}", file_path.display());
    Ok(())
}

/// Median of `count` integer distances: a whole number for odd counts, always
/// with a decimal for even counts (`3.0`, `2.5`)
fn format_median(value: f64, count: usize) -> String {
    if count % 2 == 1 {
        format!("{}", value)
    } else {
        format!("{:?}", value)
    }
}

/// Per-barcode statistics in ranked order
pub fn write_distance_report(file_path: &Path, report: &DistanceReport) -> Result<()> {
    let mut writer = csv_writer(file_path)?;
    writer.write_record(["barcode", "median_hamming_dist", "min_hamming_dist"])?;

    // Each median is taken over the other n - 1 barcodes
    let others = report.stats.len().saturating_sub(1);
    for stat in &report.stats {
        writer.write_record([
            stat.barcode.to_string(),
            format_median(stat.median_distance, others),
            stat.min_distance.to_string(),
        ])?;
    }

    writer.flush()?;
    println!("✅ Barcode distances written to: {}", file_path.display());
    Ok(())
}

/// Close pairs as `barcode1,barcode2`, no header
pub fn write_bad_pairs(file_path: &Path, pairs: &[BadPair]) -> Result<()> {
    let mut writer = csv_writer(file_path)?;

    for pair in pairs {
        writer.write_record([pair.first.as_str(), pair.second.as_str()])?;
    }

    writer.flush()?;
    println!("✅ Bad pairs written to: {}", file_path.display());
    Ok(())
}

/// One barcode per line, no header
pub fn write_new_barcodes<'a, I>(file_path: &Path, barcodes: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Barcode>,
{
    let mut writer = create_file(file_path)?;
    let mut written = 0;
    for barcode in barcodes {
        writeln!(writer, "{}", barcode)?;
        written += 1;
    }

    writer.flush()?;
    println!("✅ {} new barcodes written to: {}", written, file_path.display());
    Ok(written)
}

/// Machine-readable account of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub input_file: String,
    pub barcode_length: usize,
    pub unique_barcodes: usize,
    pub duplicates: Vec<Barcode>,
    pub mean_median_distance: f64,
    pub min_distance: usize,
    pub bad_pairs: usize,
    pub seed: Option<u64>,
    pub requested: usize,
    pub accepted: usize,
    pub failed: usize,
    pub attempts: usize,
    pub rejections: RejectionTally,
}

impl RunSummary {
    pub fn new(
        input_file: &Path,
        k: usize,
        duplicates: &DuplicateReport,
        evaluation: &Evaluation,
        seed: Option<u64>,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            input_file: input_file.display().to_string(),
            barcode_length: k,
            unique_barcodes: evaluation.report.stats.len(),
            duplicates: duplicates.duplicates.clone(),
            mean_median_distance: evaluation.report.mean_median,
            min_distance: evaluation.report.global_min,
            bad_pairs: evaluation.report.bad_pairs.len(),
            seed,
            requested: 0,
            accepted: 0,
            failed: 0,
            attempts: 0,
            rejections: RejectionTally::default(),
        }
    }

    pub fn with_design(mut self, result: &DesignResult) -> Self {
        self.requested = result.outcomes.len();
        self.accepted = result.accepted();
        self.failed = result.failed();
        self.attempts = result.total_attempts();
        self.rejections = result.rejections();
        self
    }
}

pub fn write_summary(file_path: &Path, summary: &RunSummary) -> Result<()> {
    let mut writer = create_file(file_path)?;
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()?;
    println!("✅ Run summary written to: {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BarcodeSetDesigner, GeneratorConfig, HammingAnalyzer};
    use crate::data::BarcodePopulation;
    use std::fs;
    use tempfile::tempdir;

    fn evaluation() -> (BarcodePopulation, DuplicateReport, Evaluation) {
        let (population, duplicates) =
            BarcodePopulation::from_strs(&["ACGT", "TGCA", "ACGA", "ACGT"], 4).unwrap();
        let evaluation = BarcodeSetDesigner::new(GeneratorConfig::default())
            .evaluate(&population)
            .unwrap();
        (population, duplicates, evaluation)
    }

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::new(Path::new("out"), "batch2");
        assert_eq!(paths.distributions, Path::new("out/barcode_nt_distributions.csv"));
        assert_eq!(paths.new_barcodes, Path::new("out/batch2.csv"));
    }

    #[test]
    fn test_frequency_table_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(DISTRIBUTIONS_FILE);
        let (_, _, evaluation) = evaluation();

        write_frequency_table(&path, &evaluation.table).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "position,A,G,C,T");
        assert_eq!(lines[1], "1,66.7,0.0,0.0,33.3");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_distance_and_bad_pair_files() {
        let dir = tempdir().unwrap();
        let (_, _, evaluation) = evaluation();
        let paths = OutputPaths::new(dir.path(), "new_barcodes");

        write_distance_report(&paths.distances, &evaluation.report).unwrap();
        write_bad_pairs(&paths.bad_pairs, &evaluation.report.bad_pairs).unwrap();

        let distances = fs::read_to_string(&paths.distances).unwrap();
        assert_eq!(
            distances.lines().collect::<Vec<_>>(),
            vec![
                "barcode,median_hamming_dist,min_hamming_dist",
                "ACGA,2.0,1",
                "ACGT,2.5,1",
                "TGCA,3.5,3",
            ]
        );

        let bad_pairs = fs::read_to_string(&paths.bad_pairs).unwrap();
        assert_eq!(bad_pairs, "ACGT,ACGA\n");
    }

    #[test]
    fn test_bad_pair_rows_have_two_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(BAD_PAIRS_FILE);
        let (population, _) =
            BarcodePopulation::from_strs(&["ACGTAC", "ACGTAA", "TGCATG", "ACGTTT"], 6).unwrap();
        let report = HammingAnalyzer::new(3).analyze(population.as_slice()).unwrap();

        write_bad_pairs(&path, &report.bad_pairs).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ACGTAC,ACGTAA\nACGTAC,ACGTTT\nACGTAA,ACGTTT\n");
        for line in content.lines() {
            assert_eq!(line.split(',').count(), 2);
        }
    }

    #[test]
    fn test_odd_count_medians_are_whole_numbers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DISTANCES_FILE);
        // Four barcodes: every median is over three distances
        let (population, _) =
            BarcodePopulation::from_strs(&["ACGT", "TGCA", "ACGA", "GGCC"], 4).unwrap();
        let report = HammingAnalyzer::default().analyze(population.as_slice()).unwrap();

        write_distance_report(&path, &report).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        for line in content.lines().skip(1) {
            let median = line.split(',').nth(1).unwrap();
            assert!(!median.contains('.'), "unexpected median {}", median);
        }
        assert_eq!(format_median(3.0, 2), "3.0");
        assert_eq!(format_median(2.5, 4), "2.5");
        assert_eq!(format_median(3.0, 3), "3");
    }

    #[test]
    fn test_new_barcodes_and_summary() {
        let dir = tempdir().unwrap();
        let (population, duplicates, evaluation) = evaluation();
        let path = dir.path().join("new.csv");

        let extra = [Barcode::parse("GATC").unwrap(), Barcode::parse("CTAG").unwrap()];
        let written = write_new_barcodes(&path, extra.iter()).unwrap();
        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "GATC\nCTAG\n");

        let summary = RunSummary::new(Path::new("in.txt"), population.k(), &duplicates, &evaluation, Some(7));
        let summary_path = dir.path().join("summary.json");
        write_summary(&summary_path, &summary).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
        assert_eq!(json["unique_barcodes"], 3);
        assert_eq!(json["duplicates"][0], "ACGT");
        assert_eq!(json["seed"], 7);
        assert_eq!(json["rejections"]["homopolymer"], 0);
    }
}

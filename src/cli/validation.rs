// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::GeneratorConfig;
use crate::output::OutputPaths;
use std::path::{Path, PathBuf};

/// Settings for one run, checked and resolved from the arguments
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub barcodes_path: PathBuf,
    pub klength: usize,
    pub new_count: usize,
    pub generator: GeneratorConfig,
    pub output: OutputPaths,
    pub summary_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let barcodes = args
        .barcodes
        .as_deref()
        .ok_or("--barcodes is required (or set 'barcodes' in the config file)")?;
    let barcodes_path = PathBuf::from(barcodes);
    if !barcodes_path.is_file() {
        return Err(format!("Barcode file '{}' does not exist", barcodes));
    }

    if args.klength == 0 {
        return Err("--klength must be at least 1".to_string());
    }
    if args.max_tries == 0 {
        return Err("--max-tries must be at least 1".to_string());
    }
    if args.max_homopolymer == 0 {
        return Err("--max-homopolymer must be at least 1".to_string());
    }
    if !args.min_target.is_finite() || args.min_target < 1.0 {
        return Err(format!("--min-target must be at least 1, got {}", args.min_target));
    }
    if args.min_hamming > args.klength {
        return Err(format!(
            "--min-hamming {} cannot be reached by barcodes of length {}",
            args.min_hamming, args.klength
        ));
    }
    if matches!(args.threads, Some(0)) {
        return Err("--threads must be at least 1".to_string());
    }
    if args.outname.is_empty() || args.outname.contains(['/', '\\']) {
        return Err(format!("--outname '{}' must be a plain file name", args.outname));
    }

    Ok(ValidationResult {
        barcodes_path,
        klength: args.klength,
        new_count: args.new,
        generator: GeneratorConfig {
            min_hamming: args.min_hamming,
            max_tries: args.max_tries,
            max_homopolymer: args.max_homopolymer,
            min_target: args.min_target,
        },
        output: OutputPaths::new(Path::new(&args.output_dir), &args.outname),
        summary_path: args.summary.as_ref().map(PathBuf::from),
        seed: args.seed,
    })
}

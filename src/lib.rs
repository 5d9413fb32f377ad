// lib.rs - barcode-designer library root

//! # barcode-designer - Evaluation and extension of DNA barcode sets
//!
//! Barcodes are short fixed-length DNA sequences used to tag samples that are
//! sequenced together. This library measures how well a set of barcodes is
//! separated and designs new barcodes that fit into it.
//!
//! ## Features
//!
//! - **Set evaluation**: per-barcode median and minimum Hamming distances,
//!   the set's mean median and minimum, and pairs closer than a threshold
//! - **Composition profile**: nucleotide percentages at every position
//! - **Barcode design**: rank-inverted weighted sampling with rejection on
//!   distance and homopolymer constraints and an adaptively relaxed target
//! - **List comparison**: repeats within and overlap between two lists
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use barcode_designer::prelude::*;
//!
//! let entries = read_barcode_list(std::path::Path::new("barcodes.txt"))?;
//! let (population, _duplicates) = BarcodePopulation::from_entries(&entries, 8)?;
//!
//! let designer = BarcodeSetDesigner::new(GeneratorConfig::default());
//! let evaluation = designer.evaluate(&population)?;
//! println!("mean median distance: {}", evaluation.report.mean_median);
//!
//! let mut rng = create_rng(Some(42));
//! let result = designer.design(population, &evaluation, 12, &mut rng)?;
//! for barcode in result.new_barcodes() {
//!     println!("{}", barcode);
//! }
//! # Ok::<(), BarcodeError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod logging;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{create_rng, hamming_distance, median, BarcodeGenerator, BarcodeSetDesigner};
    pub use crate::core::{DesignResult, DistanceReport, Evaluation, FrequencyTable, HammingAnalyzer};
    pub use crate::core::{GenerationOutcome, GeneratorConfig, RejectionTally};
    pub use crate::data::loaders::{read_barcode_list, read_two_column_lists};
    pub use crate::data::{Barcode, BarcodePopulation, DuplicateReport, Nucleotide};
    pub use crate::error::{BarcodeError, Result};
    pub use crate::output::OutputPaths;
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use crate::core::{BarcodeSetDesigner, GenerationOutcome, GeneratorConfig, HammingAnalyzer};
pub use data::{Barcode, BarcodePopulation, Nucleotide};
pub use error::BarcodeError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

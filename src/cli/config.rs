// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub barcodes: Option<String>,
    pub outname: Option<String>,
    pub output_dir: Option<String>,
    pub summary: Option<String>,

    // Design
    pub klength: Option<usize>,
    pub new: Option<usize>,
    pub min_hamming: Option<usize>,
    pub max_tries: Option<usize>,
    pub max_homopolymer: Option<usize>,
    pub min_target: Option<f64>,
    pub seed: Option<u64>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub dry_run: Option<bool>,
    pub quiet: Option<bool>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# bcdesign.toml - Configuration file for bcdesign
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Barcode list, one barcode per line
barcodes = "barcodes.txt"

# File name, without extension, for the new barcodes
outname = "new_barcodes"

# Directory for all output files
output_dir = "."

# JSON run summary
# summary = "run_summary.json"

# =============================================================================
# DESIGN
# =============================================================================

# Barcode length
klength = 8

# Number of new barcodes to design
new = 96

# Minimum Hamming distance between any two barcodes
min_hamming = 2

# Failed attempts before the median target is lowered by one
max_tries = 10

# Longest allowed run of one nucleotide
max_homopolymer = 3

# Give up on a barcode once the median target drops below this
min_target = 3.0

# Random seed for reproducible designs (omit for system entropy)
# seed = 42

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without computation
dry_run = false

# Hide the progress bar
quiet = false
"#
        .to_string()
    }
}

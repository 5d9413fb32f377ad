// error.rs - Error types for barcode evaluation and design

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarcodeError {
    #[error("Cannot compute Hamming distance between '{left}' and '{right}': lengths differ ({} vs {})", left.len(), right.len())]
    LengthMismatch { left: String, right: String },

    #[error("Barcode '{barcode}' on line {line} has length {actual}, expected {expected}")]
    InvalidLength {
        barcode: String,
        expected: usize,
        actual: usize,
        line: usize,
    },

    #[error("Barcode '{barcode}' contains invalid base '{base}' (allowed: A, C, G, T)")]
    InvalidBase { barcode: String, base: char },

    #[error("Barcode population is empty")]
    EmptyPopulation,

    #[error("At least 2 unique barcodes are needed to compute distances, found {found}")]
    TooFewBarcodes { found: usize },

    #[error("Barcode '{0}' is already present in the population")]
    DuplicateBarcode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed input: {0}")]
    Input(String),

    #[error("Sampling error: {0}")]
    Sampling(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BarcodeError>;

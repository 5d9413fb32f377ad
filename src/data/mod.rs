// mod.rs - Data structures module

pub mod barcode;
pub mod loaders;
pub mod population;

// Re-export main types for convenience
pub use barcode::{Barcode, Nucleotide};
pub use loaders::ListEntry;
pub use population::{BarcodePopulation, DuplicateReport};

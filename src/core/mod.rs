// mod.rs - Core logic module

pub mod designer;
pub mod distance;
pub mod frequency;
pub mod generator;
pub mod overlap;
pub mod sampler;

// Re-export main types for convenience
pub use designer::{BarcodeSetDesigner, DesignResult, Evaluation};
pub use distance::{hamming_distance, median, BadPair, DistanceReport, DistanceStat, HammingAnalyzer};
pub use frequency::{FrequencyTable, PositionProbability};
pub use generator::{
    BarcodeGenerator, GenerationOutcome, GeneratorConfig, GeneratorState, Rejection, RejectionTally,
};
pub use overlap::{check_lists, OverlapReport};
pub use sampler::{create_rng, rank_inverted_weights, WeightedSampler};

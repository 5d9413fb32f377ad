// barcode.rs - Nucleotide alphabet and canonical barcode type

use crate::error::{BarcodeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four DNA bases.
///
/// Declaration order (A, G, C, T) is the column order of the frequency report
/// and the tie-break order of the weighted sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nucleotide {
    A,
    G,
    C,
    T,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::G, Nucleotide::C, Nucleotide::T];

    /// Parse a base, ignoring case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Nucleotide::A),
            'G' => Some(Nucleotide::G),
            'C' => Some(Nucleotide::C),
            'T' => Some(Nucleotide::T),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::G => 'G',
            Nucleotide::C => 'C',
            Nucleotide::T => 'T',
        }
    }

    /// Position of this base in [`Nucleotide::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A barcode in canonical (uppercase) form over A/C/G/T.
///
/// Length is not checked here; the population owns the fixed-length invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    /// Validate the alphabet and canonicalise to uppercase
    pub fn parse(raw: &str) -> Result<Self> {
        let mut canonical = String::with_capacity(raw.len());
        for c in raw.chars() {
            let base = Nucleotide::from_char(c).ok_or_else(|| BarcodeError::InvalidBase {
                barcode: raw.to_string(),
                base: c,
            })?;
            canonical.push(base.as_char());
        }
        Ok(Self(canonical))
    }

    pub fn from_nucleotides(bases: &[Nucleotide]) -> Self {
        Self(bases.iter().map(|b| b.as_char()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bases in order. Always valid since the alphabet is checked on construction.
    pub fn bases(&self) -> impl Iterator<Item = Nucleotide> + '_ {
        self.0.chars().filter_map(Nucleotide::from_char)
    }

    /// Length of the longest run of one repeated base
    pub fn longest_run(&self) -> usize {
        let bytes = self.0.as_bytes();
        if bytes.is_empty() {
            return 0;
        }

        let mut max_run = 1;
        let mut current_run = 1;
        for window in bytes.windows(2) {
            if window[0] == window[1] {
                current_run += 1;
                max_run = max_run.max(current_run);
            } else {
                current_run = 1;
            }
        }
        max_run
    }

    /// True when some base repeats more than `max_run` times in a row
    pub fn has_homopolymer(&self, max_run: usize) -> bool {
        self.longest_run() > max_run
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// csv.rs - Two-column CSV loader for comparing independent barcode lists

use super::ListEntry;
use crate::error::{BarcodeError, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Two barcode lists read side by side from one CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwoColumnLists {
    pub first: Vec<ListEntry>,
    pub second: Vec<ListEntry>,
}

/// Load a headerless two-column CSV. Either cell may be empty on a given line
/// and is then skipped; extra columns are ignored.
pub fn read_two_column_lists(file_path: &Path) -> Result<TwoColumnLists> {
    let file = File::open(file_path).map_err(|e| {
        BarcodeError::Input(format!(
            "Failed to open CSV file '{}': {}",
            file_path.display(),
            e
        ))
    })?;

    let lists = parse_two_column_lists(file)?;
    println!(
        "✅ CSV loaded: comparing lists of {} and {} barcodes",
        lists.first.len(),
        lists.second.len()
    );
    Ok(lists)
}

/// Parse two-column lists from any reader
pub fn parse_two_column_lists<R: Read>(input: R) -> Result<TwoColumnLists> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut lists = TwoColumnLists::default();

    for record in reader.records() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(0);

        for (column, target) in [&mut lists.first, &mut lists.second].into_iter().enumerate() {
            if let Some(value) = record.get(column) {
                if !value.is_empty() {
                    target.push(ListEntry {
                        line,
                        value: value.to_string(),
                    });
                }
            }
        }
    }

    Ok(lists)
}

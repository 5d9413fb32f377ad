// list.rs - Single-column barcode list loader

use super::ListEntry;
use crate::error::{BarcodeError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read a newline-delimited barcode list.
///
/// Blank lines are skipped and surrounding whitespace trimmed. Anything after
/// a first comma is ignored so single-column CSV exports load unchanged.
pub fn read_barcode_list(file_path: &Path) -> Result<Vec<ListEntry>> {
    let file = File::open(file_path).map_err(|e| {
        BarcodeError::Input(format!(
            "Failed to open barcode list '{}': {}",
            file_path.display(),
            e
        ))
    })?;

    let entries = parse_barcode_list(file)?;
    println!(
        "📋 Loaded {} barcodes from '{}'",
        entries.len(),
        file_path.display()
    );
    Ok(entries)
}

/// Parse a barcode list from any reader
pub fn parse_barcode_list<R: Read>(input: R) -> Result<Vec<ListEntry>> {
    let reader = BufReader::new(input);
    let mut entries = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            BarcodeError::Input(format!("Failed to read line {}: {}", line_num + 1, e))
        })?;
        let value = line.split(',').next().unwrap_or("").trim();
        if value.is_empty() {
            continue;
        }
        entries.push(ListEntry {
            line: line_num + 1,
            value: value.to_string(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_blank_lines_and_keeps_line_numbers() {
        let input = "ACGTACGT\n\n  ttgcaacg \r\nGGATCCAA,\n";
        let entries = parse_barcode_list(input.as_bytes()).unwrap();

        assert_eq!(
            entries,
            vec![
                ListEntry { line: 1, value: "ACGTACGT".to_string() },
                ListEntry { line: 3, value: "ttgcaacg".to_string() },
                ListEntry { line: 4, value: "GGATCCAA".to_string() },
            ]
        );
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ACGT").unwrap();
        writeln!(file, "TGCA").unwrap();

        let entries = read_barcode_list(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].value, "TGCA");
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let err = read_barcode_list(Path::new("/nonexistent/barcodes.txt")).unwrap_err();
        assert!(matches!(err, BarcodeError::Input(_)));
    }
}
